//! Executing the combine and growth passes over configured organisms.

use crate::collect::{collect_runs, IncompleteDate};
use crate::combine::{combine_runs, write_combined_xlsx};
use crate::config::RunConfig;
use crate::data::Table;
use crate::error::{PlateError, Result};
use crate::growth::{filter_growing, GrowthFilterResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of the combine pass for one organism.
#[derive(Debug, Clone, Serialize)]
pub struct OrganismSummary {
    pub organism: String,
    /// Dates with every plate present, merged into the output.
    pub n_dates: usize,
    /// Dates skipped because a plate was never scanned.
    pub incomplete: Vec<IncompleteDate>,
    pub csv_path: PathBuf,
    pub xlsx_path: Option<PathBuf>,
}

impl std::fmt::Display for OrganismSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.organism)?;
        writeln!(f, "  Dates combined:  {}", self.n_dates)?;
        for inc in &self.incomplete {
            writeln!(f, "  Skipped {}: missing {}", inc.date, inc.missing.join(", "))?;
        }
        writeln!(f, "  Wrote {}", self.csv_path.display())?;
        if let Some(xlsx) = &self.xlsx_path {
            writeln!(f, "  Wrote {}", xlsx.display())?;
        }
        Ok(())
    }
}

/// Outcome of the growth pass for one combined table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub name: String,
    pub result: GrowthFilterResult,
    pub output_path: PathBuf,
}

impl std::fmt::Display for GrowthSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(
            f,
            "  Growing wells:   {} of {} (threshold > {})",
            self.result.n_growing, self.result.n_well_columns, self.result.threshold
        )?;
        writeln!(f, "  Wrote {}", self.output_path.display())?;
        Ok(())
    }
}

/// Aggregate outcome of a full two-pass run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub combined: Vec<OrganismSummary>,
    pub growth: Vec<GrowthSummary>,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Combine pass")?;
        for summary in &self.combined {
            write!(f, "{}", summary)?;
        }
        writeln!(f, "Growth pass")?;
        for summary in &self.growth {
            write!(f, "{}", summary)?;
        }
        Ok(())
    }
}

/// Combine one organism's plate exports and write the combined outputs.
pub fn run_organism(config: &RunConfig, organism: &str) -> Result<OrganismSummary> {
    let dir = config.organism_dir(organism);
    let collected = collect_runs(&dir, &config.plates)?;
    if collected.runs.is_empty() {
        warn!("{}: no complete plate runs found", dir.display());
    }

    let table = combine_runs(&collected.runs, &config.plates, &config.sheet)?;

    std::fs::create_dir_all(config.results_dir())?;
    let csv_path = config.combined_csv_path(organism);
    table.to_csv(&csv_path)?;

    let xlsx_path = if config.write_xlsx {
        let path = config.combined_xlsx_path(organism);
        write_combined_xlsx(&table, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(OrganismSummary {
        organism: organism.to_string(),
        n_dates: table.n_rows(),
        incomplete: collected.incomplete,
        csv_path,
        xlsx_path,
    })
}

/// Filter a previously combined table down to its growing wells.
///
/// Re-reads the combined CSV rather than reusing in-memory state, so the pass
/// also works on tables produced by earlier runs.
pub fn run_growth(config: &RunConfig, name: &str) -> Result<GrowthSummary> {
    let input = config.combined_csv_path(name);
    let table = Table::from_csv(&input)?;

    let (filtered, result) = filter_growing(&table, &config.plates, config.growth_threshold)?;

    let output_path = config.growing_csv_path(name);
    filtered.to_csv(&output_path)?;

    Ok(GrowthSummary {
        name: name.to_string(),
        result,
        output_path,
    })
}

/// Run both passes over every configured organism.
pub fn run_all(config: &RunConfig) -> Result<RunSummary> {
    if config.organisms.is_empty() {
        return Err(PlateError::EmptyData(
            "No organisms configured".to_string(),
        ));
    }

    let mut combined = Vec::with_capacity(config.organisms.len());
    for organism in &config.organisms {
        combined.push(run_organism(config, organism)?);
    }

    let mut growth = Vec::with_capacity(config.organisms.len());
    for organism in &config.organisms {
        growth.push(run_growth(config, organism)?);
    }

    Ok(RunSummary { combined, growth })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_rejects_empty_organism_list() {
        let config = RunConfig::new("Data", vec![]);
        assert!(matches!(
            run_all(&config),
            Err(PlateError::EmptyData(_))
        ));
    }

    #[test]
    fn test_run_organism_missing_directory() {
        let config = RunConfig::new("/nonexistent-platemerge-test", vec!["X".to_string()]);
        assert!(matches!(
            run_organism(&config, "X"),
            Err(PlateError::Io(_))
        ));
    }
}
