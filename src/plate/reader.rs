//! Reading the fixed data region of an absorbance reader export.

use crate::error::{PlateError, Result};
use crate::plate::coords::{PLATE_COLS, PLATE_ROWS, WELLS_PER_PLATE};
use calamine::{open_workbook, Data, DataType as _, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout of a plate export sheet.
///
/// The reader software emits a fixed-shape sheet: a block of header rows,
/// then one row per plate row with a blank leading column, a row-label
/// column (A..H), the twelve measurement columns, and a trailing wavelength
/// marker column. The whole region is validated against these dimensions
/// before any cell is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSchema {
    /// Rows above the data grid (instrument metadata plus the column header row).
    pub header_rows: usize,
    /// Rows in the data grid.
    pub grid_rows: usize,
    /// Measurement columns in the data grid.
    pub grid_cols: usize,
    /// Non-data columns to the left of the grid (blank + row labels).
    pub leading_cols: usize,
    /// Non-data columns to the right of the grid (wavelength marker).
    pub trailing_cols: usize,
}

impl Default for SheetSchema {
    /// The Biolog export layout: data in C25:N32.
    fn default() -> Self {
        Self {
            header_rows: 24,
            grid_rows: PLATE_ROWS,
            grid_cols: PLATE_COLS,
            leading_cols: 2,
            trailing_cols: 1,
        }
    }
}

impl SheetSchema {
    /// Total rows the sheet must span.
    pub fn total_rows(&self) -> usize {
        self.header_rows + self.grid_rows
    }

    /// Total columns the sheet must span.
    pub fn total_cols(&self) -> usize {
        self.leading_cols + self.grid_cols + self.trailing_cols
    }
}

/// The 96 absorbance values of one plate, in row-major well order.
#[derive(Debug, Clone, PartialEq)]
pub struct WellReading {
    values: Vec<f64>,
}

impl WellReading {
    /// Wrap a flat vector of well values; must hold exactly one value per well.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() != WELLS_PER_PLATE {
            return Err(PlateError::DimensionMismatch {
                expected: WELLS_PER_PLATE,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Values in row-major well order (A1..A12, B1.., .., H12).
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a flat well index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}

/// Read one plate export, validating its shape against `schema`.
///
/// Opens the first worksheet, checks that the used range spans exactly the
/// declared dimensions, then extracts the measurement grid row-major. Any
/// deviation in shape is a [`PlateError::ShapeMismatch`]; a non-numeric cell
/// inside the grid is a [`PlateError::InvalidCell`].
pub fn read_plate<P: AsRef<Path>>(path: P, schema: &SheetSchema) -> Result<WellReading> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PlateError::EmptyData(format!("{:?} has no worksheets", path)))??;

    let (end_row, end_col) = range.end().ok_or_else(|| {
        PlateError::EmptyData(format!("{:?} first worksheet is empty", path))
    })?;

    let actual_rows = end_row as usize + 1;
    let actual_cols = end_col as usize + 1;
    if actual_rows != schema.total_rows() || actual_cols != schema.total_cols() {
        return Err(PlateError::ShapeMismatch {
            path: path.to_path_buf(),
            expected: format!("{} rows x {} columns", schema.total_rows(), schema.total_cols()),
            actual: format!("{} rows x {} columns", actual_rows, actual_cols),
        });
    }

    let mut values = Vec::with_capacity(WELLS_PER_PLATE);
    for r in 0..schema.grid_rows {
        for c in 0..schema.grid_cols {
            let row = schema.header_rows + r;
            let col = schema.leading_cols + c;
            let cell = range.get_value((row as u32, col as u32));
            let value = cell.and_then(Data::as_f64).ok_or_else(|| PlateError::InvalidCell {
                path: path.to_path_buf(),
                row,
                col,
                value: cell.map(|d| d.to_string()).unwrap_or_default(),
            })?;
            values.push(value);
        }
    }

    WellReading::new(values)
}
