//! Growth filtering of combined tables.
//!
//! A well counts as growing when its absorbance ever strictly exceeds the
//! threshold across the run history. Everything else is removed; metadata
//! columns always pass through.

use crate::data::Table;
use crate::error::{PlateError, Result};
use crate::plate::well_columns;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Absorbance above this is read as growth.
pub const DEFAULT_GROWTH_THRESHOLD: f64 = 0.3;

/// Statistics from one growth-filter pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthFilterResult {
    /// Well columns present in the input.
    pub n_well_columns: usize,
    /// Well columns whose maximum exceeded the threshold.
    pub n_growing: usize,
    /// Well columns removed.
    pub n_removed: usize,
    /// Rows in the table (unchanged by filtering).
    pub n_rows: usize,
    /// Threshold applied.
    pub threshold: f64,
}

impl std::fmt::Display for GrowthFilterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Growth Filter Result")?;
        writeln!(f, "  Threshold:       > {}", self.threshold)?;
        writeln!(f, "  Well columns:    {}", self.n_well_columns)?;
        writeln!(f, "  Growing wells:   {}", self.n_growing)?;
        writeln!(f, "  Removed wells:   {}", self.n_removed)?;
        writeln!(f, "  Rows:            {}", self.n_rows)?;
        Ok(())
    }
}

/// Keep only well columns whose maximum value strictly exceeds `threshold`.
///
/// Well columns are recognized by the declared naming scheme (plate prefix +
/// coordinate); all other columns pass through unfiltered. Row order and row
/// count are preserved, so the pass is idempotent at a fixed threshold.
pub fn filter_growing(
    table: &Table,
    plates: &[String],
    threshold: f64,
) -> Result<(Table, GrowthFilterResult)> {
    if !threshold.is_finite() {
        return Err(PlateError::InvalidParameter(
            "Growth threshold must be finite".to_string(),
        ));
    }

    let well_names: HashSet<String> = well_columns(plates).into_iter().collect();

    let mut keep: Vec<usize> = Vec::with_capacity(table.n_columns());
    let mut n_well_columns = 0;
    let mut n_growing = 0;

    for (idx, name) in table.columns().iter().enumerate() {
        if !well_names.contains(name) {
            keep.push(idx);
            continue;
        }
        n_well_columns += 1;
        // a well with no numeric readings cannot show growth
        let grew = table.column_max(idx).is_some_and(|max| max > threshold);
        if grew {
            n_growing += 1;
            keep.push(idx);
        }
    }

    let filtered = table.select_columns(&keep)?;
    let result = GrowthFilterResult {
        n_well_columns,
        n_growing,
        n_removed: n_well_columns - n_growing,
        n_rows: table.n_rows(),
        threshold,
    };

    Ok((filtered, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;

    fn pm_plates() -> Vec<String> {
        vec!["PM1".to_string(), "PM2A".to_string()]
    }

    fn table_with_wells(wells: &[(&str, Vec<f64>)]) -> Table {
        let mut columns = vec!["organism".to_string(), "date".to_string()];
        columns.extend(wells.iter().map(|(name, _)| name.to_string()));
        let n_rows = wells.first().map(|(_, v)| v.len()).unwrap_or(0);

        let mut table = Table::new(columns);
        for r in 0..n_rows {
            let mut row = vec![
                Cell::Text("Ecoli".to_string()),
                Cell::Text(format!("04/{:02}", r + 1)),
            ];
            row.extend(wells.iter().map(|(_, v)| Cell::Number(v[r])));
            table.push_row(row).unwrap();
        }
        table
    }

    #[test]
    fn test_strict_threshold_boundary() {
        let table = table_with_wells(&[
            ("PM1 A1", vec![0.1, 0.3, 0.2]),     // max exactly 0.3: removed
            ("PM1 A2", vec![0.1, 0.30001, 0.2]), // just above: kept
        ]);

        let (filtered, result) = filter_growing(&table, &pm_plates(), 0.3).unwrap();

        assert_eq!(
            filtered.columns(),
            &["organism", "date", "PM1 A2"]
        );
        assert_eq!(result.n_well_columns, 2);
        assert_eq!(result.n_growing, 1);
        assert_eq!(result.n_removed, 1);
        assert_eq!(result.n_rows, 3);
    }

    #[test]
    fn test_metadata_columns_unconditional() {
        // metadata never exceeds anything numeric, still kept
        let table = table_with_wells(&[("PM1 A1", vec![0.0, 0.0])]);
        let (filtered, _) = filter_growing(&table, &pm_plates(), 0.3).unwrap();
        assert_eq!(filtered.columns(), &["organism", "date"]);
        assert_eq!(filtered.n_rows(), 2);
    }

    #[test]
    fn test_unknown_columns_pass_through() {
        let table = table_with_wells(&[("PM3 A1", vec![0.01]), ("PM1 A1", vec![0.01])]);
        let (filtered, result) = filter_growing(&table, &pm_plates(), 0.3).unwrap();
        // PM3 is not a declared plate, so its column is not a well column
        assert_eq!(filtered.columns(), &["organism", "date", "PM3 A1"]);
        assert_eq!(result.n_well_columns, 1);
    }

    #[test]
    fn test_idempotent() {
        let table = table_with_wells(&[
            ("PM1 A1", vec![0.5, 0.1]),
            ("PM1 B7", vec![0.05, 0.02]),
            ("PM2A H12", vec![0.31, 0.29]),
        ]);

        let (once, first) = filter_growing(&table, &pm_plates(), 0.3).unwrap();
        let (twice, second) = filter_growing(&once, &pm_plates(), 0.3).unwrap();

        assert_eq!(once, twice);
        assert_eq!(first.n_growing, second.n_well_columns);
        assert_eq!(second.n_removed, 0);
    }

    #[test]
    fn test_all_missing_well_removed() {
        let mut table = Table::new(vec!["organism".to_string(), "PM1 A1".to_string()]);
        table
            .push_row(vec![Cell::Text("Ecoli".to_string()), Cell::Missing])
            .unwrap();

        let (filtered, result) = filter_growing(&table, &pm_plates(), 0.3).unwrap();
        assert_eq!(filtered.columns(), &["organism"]);
        assert_eq!(result.n_removed, 1);
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let table = table_with_wells(&[("PM1 A1", vec![0.5])]);
        assert!(filter_growing(&table, &pm_plates(), f64::NAN).is_err());
        assert!(filter_growing(&table, &pm_plates(), f64::INFINITY).is_err());
    }
}
