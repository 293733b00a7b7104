//! platemerge - Phenotype MicroArray plate combiner CLI
//!
//! Command-line interface for combining plate scan exports and filtering
//! combined tables down to growing wells.

use clap::{Parser, Subcommand};
use platemerge::config::RunConfig;
use platemerge::data::Table;
use platemerge::error::Result;
use platemerge::growth::{filter_growing, DEFAULT_GROWTH_THRESHOLD};
use platemerge::pipeline::{run_all, run_organism};
use std::path::PathBuf;

/// Combine and growth-filter Phenotype MicroArray plate scans
#[derive(Parser)]
#[command(name = "platemerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full combine + growth pipeline from a YAML configuration file
    Run {
        /// Path to run configuration YAML
        #[arg(short, long)]
        config: PathBuf,

        /// Output format for the run summary: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Combine one organism's plate exports into a single table
    Combine {
        /// Root of the data tree (one subdirectory per organism)
        #[arg(short, long)]
        data_root: PathBuf,

        /// Organism to process
        #[arg(short, long)]
        organism: String,

        /// Output directory (default: <data_root>/results)
        #[arg(short, long)]
        results_dir: Option<PathBuf>,

        /// Plate types making up one complete run per date
        #[arg(short, long, num_args = 1.., default_values = ["PM1", "PM2A"])]
        plates: Vec<String>,

        /// Also write the combined table as a spreadsheet with typed cells
        #[arg(long)]
        xlsx: bool,
    },

    /// Filter a combined table down to its growing wells
    Growing {
        /// Path to a combined CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (default: <input stem>_growing.csv next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Growth threshold (a well is kept when its maximum strictly exceeds this)
        #[arg(short, long, default_value_t = DEFAULT_GROWTH_THRESHOLD)]
        threshold: f64,

        /// Plate types whose well columns are subject to filtering
        #[arg(short, long, num_args = 1.., default_values = ["PM1", "PM2A"])]
        plates: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, format } => cmd_run(&config, &format),
        Commands::Combine {
            data_root,
            organism,
            results_dir,
            plates,
            xlsx,
        } => cmd_combine(data_root, &organism, results_dir, plates, xlsx),
        Commands::Growing {
            input,
            output,
            threshold,
            plates,
        } => cmd_growing(&input, output, threshold, plates),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the full pipeline from configuration
fn cmd_run(config_path: &PathBuf, format: &str) -> Result<()> {
    eprintln!("Loading run configuration from {:?}...", config_path);
    let config = RunConfig::from_yaml_file(config_path)?;

    eprintln!(
        "Processing {} organism(s) under {:?}...",
        config.organisms.len(),
        config.data_root
    );
    let summary = run_all(&config)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print!("{}", summary),
    }

    Ok(())
}

/// Combine one organism's exports
fn cmd_combine(
    data_root: PathBuf,
    organism: &str,
    results_dir: Option<PathBuf>,
    plates: Vec<String>,
    xlsx: bool,
) -> Result<()> {
    let mut config = RunConfig::new(data_root, vec![organism.to_string()]);
    config.results_dir = results_dir;
    config.plates = plates;
    config.write_xlsx = xlsx;

    eprintln!("Scanning {:?}...", config.organism_dir(organism));
    let summary = run_organism(&config, organism)?;

    eprintln!("Done! {} date(s) combined", summary.n_dates);
    for inc in &summary.incomplete {
        eprintln!("  Skipped {}: missing {}", inc.date, inc.missing.join(", "));
    }
    eprintln!("Wrote {}", summary.csv_path.display());
    if let Some(path) = &summary.xlsx_path {
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}

/// Growth-filter a combined table
fn cmd_growing(
    input: &PathBuf,
    output: Option<PathBuf>,
    threshold: f64,
    plates: Vec<String>,
) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_growing.csv", stem))
    });

    eprintln!("Reading {:?}...", input);
    let table = Table::from_csv(input)?;
    eprintln!("Loaded {} rows x {} columns", table.n_rows(), table.n_columns());

    let (filtered, result) = filter_growing(&table, &plates, threshold)?;
    filtered.to_csv(&output)?;

    eprint!("{}", result);
    eprintln!("Wrote {}", output.display());

    Ok(())
}
