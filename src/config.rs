//! Run configuration: where the data lives and which organisms to process.

use crate::error::Result;
use crate::growth::DEFAULT_GROWTH_THRESHOLD;
use crate::plate::SheetSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_plates() -> Vec<String> {
    vec!["PM1".to_string(), "PM2A".to_string()]
}

fn default_growth_threshold() -> f64 {
    DEFAULT_GROWTH_THRESHOLD
}

fn default_write_xlsx() -> bool {
    true
}

/// Configuration for a full combine + growth-filter run.
///
/// Input exports are expected under `<data_root>/<organism>/*.xlsx`; outputs
/// land in `results_dir` (default `<data_root>/results`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Root of the data tree, one subdirectory per organism.
    pub data_root: PathBuf,
    /// Output directory; defaults to `<data_root>/results`.
    #[serde(default)]
    pub results_dir: Option<PathBuf>,
    /// Organisms to process, each a subdirectory of `data_root`.
    pub organisms: Vec<String>,
    /// Plate types that make up one complete run per date.
    #[serde(default = "default_plates")]
    pub plates: Vec<String>,
    /// Well absorbance must strictly exceed this to count as growing.
    #[serde(default = "default_growth_threshold")]
    pub growth_threshold: f64,
    /// Also write the combined table as a spreadsheet with typed cells.
    #[serde(default = "default_write_xlsx")]
    pub write_xlsx: bool,
    /// Layout of the export sheets.
    #[serde(default)]
    pub sheet: SheetSchema,
}

impl RunConfig {
    /// Create a config with defaults for everything but the data root and organisms.
    pub fn new<P: Into<PathBuf>>(data_root: P, organisms: Vec<String>) -> Self {
        Self {
            data_root: data_root.into(),
            results_dir: None,
            organisms,
            plates: default_plates(),
            growth_threshold: default_growth_threshold(),
            write_xlsx: default_write_xlsx(),
            sheet: SheetSchema::default(),
        }
    }

    /// Load from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Effective output directory.
    pub fn results_dir(&self) -> PathBuf {
        self.results_dir
            .clone()
            .unwrap_or_else(|| self.data_root.join("results"))
    }

    /// Input directory for one organism.
    pub fn organism_dir(&self, organism: &str) -> PathBuf {
        self.data_root.join(organism)
    }

    /// Combined CSV output path for one organism.
    pub fn combined_csv_path(&self, organism: &str) -> PathBuf {
        self.results_dir().join(format!("{}.csv", organism))
    }

    /// Combined spreadsheet output path for one organism.
    pub fn combined_xlsx_path(&self, organism: &str) -> PathBuf {
        self.results_dir().join(format!("{}.xlsx", organism))
    }

    /// Growing-wells CSV output path for one combined table.
    pub fn growing_csv_path(&self, name: &str) -> PathBuf {
        self.results_dir().join(format!("{}_growing.csv", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_applies_defaults() {
        let config = RunConfig::from_yaml(
            "data_root: Data\norganisms:\n  - Ecoli\n  - CG23\n",
        )
        .unwrap();

        assert_eq!(config.data_root, PathBuf::from("Data"));
        assert_eq!(config.organisms, vec!["Ecoli", "CG23"]);
        assert_eq!(config.plates, vec!["PM1", "PM2A"]);
        assert_eq!(config.growth_threshold, 0.3);
        assert!(config.write_xlsx);
        assert_eq!(config.sheet, SheetSchema::default());
    }

    #[test]
    fn test_paths() {
        let config = RunConfig::new("Data", vec!["Ecoli".to_string()]);
        assert_eq!(config.results_dir(), PathBuf::from("Data/results"));
        assert_eq!(config.organism_dir("Ecoli"), PathBuf::from("Data/Ecoli"));
        assert_eq!(
            config.combined_csv_path("Ecoli"),
            PathBuf::from("Data/results/Ecoli.csv")
        );
        assert_eq!(
            config.growing_csv_path("Ecoli"),
            PathBuf::from("Data/results/Ecoli_growing.csv")
        );
    }

    #[test]
    fn test_explicit_results_dir() {
        let mut config = RunConfig::new("Data", vec![]);
        config.results_dir = Some(PathBuf::from("out"));
        assert_eq!(config.combined_xlsx_path("X"), PathBuf::from("out/X.xlsx"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = RunConfig::new("Data", vec!["Ecoli".to_string()]);
        config.growth_threshold = 0.25;
        config.plates = vec!["PM1".to_string()];

        let restored = RunConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(restored.growth_threshold, 0.25);
        assert_eq!(restored.plates, vec!["PM1"]);
    }
}
