//! A delimited table of typed cells, the carrier between pipeline passes.

use crate::error::{PlateError, Result};
use std::fmt;
use std::path::Path;

/// One table cell: free text, a numeric value, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Parse a raw CSV field: empty is missing, numeric parses as a number,
    /// anything else stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Missing
        } else if let Ok(v) = trimmed.parse::<f64>() {
            Cell::Number(v)
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// Numeric value, if this cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Missing => Ok(()),
        }
    }
}

/// An ordered table with named columns and typed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(PlateError::DimensionMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    #[inline]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column index).
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Cell at (row, column name).
    pub fn get_named(&self, row: usize, column: &str) -> Option<&Cell> {
        self.column_index(column).and_then(|c| self.get(row, c))
    }

    /// Maximum numeric value in a column, ignoring text and missing cells.
    ///
    /// `None` if the column holds no numeric cell at all.
    pub fn column_max(&self, col: usize) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.get(col).and_then(Cell::as_number))
            .fold(None, |acc, v| match acc {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }

    /// Project the table onto a subset of column indices, preserving row order.
    pub fn select_columns(&self, indices: &[usize]) -> Result<Self> {
        for &idx in indices {
            if idx >= self.columns.len() {
                return Err(PlateError::InvalidParameter(format!(
                    "Column index {} out of bounds",
                    idx
                )));
            }
        }
        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self { columns, rows })
    }

    /// Load a table from a CSV file with a header row.
    ///
    /// Each field is typed by [`Cell::parse`]: empty fields become missing,
    /// numeric fields become numbers, everything else stays text.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if columns.is_empty() {
            return Err(PlateError::EmptyData("CSV has no header".to_string()));
        }

        let mut table = Self::new(columns);
        for record in reader.records() {
            let record = record?;
            let row: Vec<Cell> = record.iter().map(Cell::parse).collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Write the table to a CSV file, header row first.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_table() -> Table {
        let mut table = Table::new(vec![
            "organism".to_string(),
            "PM1 A1".to_string(),
            "PM1 A2".to_string(),
        ]);
        table
            .push_row(vec![
                Cell::Text("Ecoli".to_string()),
                Cell::Number(0.12),
                Cell::Missing,
            ])
            .unwrap();
        table
            .push_row(vec![
                Cell::Text("Ecoli".to_string()),
                Cell::Number(0.45),
                Cell::Number(0.3),
            ])
            .unwrap();
        table
    }

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse("0.25"), Cell::Number(0.25));
        assert_eq!(Cell::parse("Ecoli"), Cell::Text("Ecoli".to_string()));
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("  "), Cell::Missing);
        assert_eq!(Cell::parse("08:30"), Cell::Text("08:30".to_string()));
        assert_eq!(Cell::parse("04/15"), Cell::Text("04/15".to_string()));
    }

    #[test]
    fn test_push_row_width_checked() {
        let mut table = sample_table();
        let err = table.push_row(vec![Cell::Missing]).unwrap_err();
        assert!(matches!(
            err,
            PlateError::DimensionMismatch { expected: 3, actual: 1 }
        ));
    }

    #[test]
    fn test_column_max() {
        let table = sample_table();
        let idx = table.column_index("PM1 A1").unwrap();
        assert_eq!(table.column_max(idx), Some(0.45));
        // text column has no numeric cells
        assert_eq!(table.column_max(0), None);
    }

    #[test]
    fn test_select_columns() {
        let table = sample_table();
        let subset = table.select_columns(&[0, 2]).unwrap();
        assert_eq!(subset.columns(), &["organism", "PM1 A2"]);
        assert_eq!(subset.n_rows(), 2);
        assert_eq!(subset.get(1, 1), Some(&Cell::Number(0.3)));

        assert!(table.select_columns(&[7]).is_err());
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");

        let table = sample_table();
        table.to_csv(&path).unwrap();
        let loaded = Table::from_csv(&path).unwrap();

        assert_eq!(loaded.columns(), table.columns());
        assert_eq!(loaded.n_rows(), 2);
        assert_eq!(loaded.get(0, 1), Some(&Cell::Number(0.12)));
        assert_eq!(loaded.get(0, 2), Some(&Cell::Missing));
        assert_eq!(loaded.get_named(1, "PM1 A2"), Some(&Cell::Number(0.3)));
    }
}
