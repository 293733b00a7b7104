//! Pipeline orchestration: combine pass, growth pass, and run summaries.

pub mod runner;

pub use runner::{run_all, run_growth, run_organism, GrowthSummary, OrganismSummary, RunSummary};
