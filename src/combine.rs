//! Merging per-date plate pairs into one combined table.

use crate::collect::PlateRun;
use crate::data::{Cell, Table};
use crate::error::Result;
use crate::plate::{read_plate, well_columns, SheetSchema};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;

/// Metadata columns leading every combined table, before the well columns.
pub const METADATA_COLUMNS: [&str; 3] = ["organism", "time", "date"];

/// Column names of a combined table: metadata, then every well of every plate.
pub fn combined_columns(plates: &[String]) -> Vec<String> {
    METADATA_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .chain(well_columns(plates))
        .collect()
}

/// Merge complete runs into one table, one row per date.
///
/// Each row holds the run metadata followed by the 96 values of every plate,
/// prefixed per plate ("PM1 A1".."PM2A H12"). Runs are expected in date order,
/// as produced by [`collect_runs`](crate::collect::collect_runs).
pub fn combine_runs(runs: &[PlateRun], plates: &[String], schema: &SheetSchema) -> Result<Table> {
    let mut table = Table::new(combined_columns(plates));

    for run in runs {
        let mut row: Vec<Cell> = Vec::with_capacity(table.n_columns());
        row.push(Cell::Text(run.organism.clone()));
        row.push(Cell::Text(run.time.to_string()));
        row.push(Cell::Text(run.date.to_string()));

        for (_, path) in &run.plate_files {
            let reading = read_plate(path, schema)?;
            row.extend(reading.values().iter().map(|&v| Cell::Number(v)));
        }

        table.push_row(row)?;
    }

    Ok(table)
}

/// Write a combined table as a spreadsheet with typed time and date cells.
///
/// The "time" column is written as an hh:mm time and the "date" column as an
/// mm/dd date (year pinned to 1900, since the scans carry none). Cells that
/// do not parse stay plain text.
pub fn write_combined_xlsx<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let time_fmt = Format::new().set_num_format("hh:mm");
    let date_fmt = Format::new().set_num_format("mm/dd");
    let time_idx = table.column_index("time");
    let date_idx = table.column_index("date");

    for (c, name) in table.columns().iter().enumerate() {
        sheet.write_string(0, c as u16, name)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let out_row = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let out_col = c as u16;
            match cell {
                Cell::Number(v) => {
                    sheet.write_number(out_row, out_col, *v)?;
                }
                Cell::Text(s) => {
                    if time_idx == Some(c) {
                        if let Some((h, m)) = split_two(s, ':') {
                            let t = ExcelDateTime::from_hms(h as u16, m, 0.0)?;
                            sheet.write_datetime_with_format(out_row, out_col, &t, &time_fmt)?;
                            continue;
                        }
                    }
                    if date_idx == Some(c) {
                        if let Some((month, day)) = split_two(s, '/') {
                            let d = ExcelDateTime::from_ymd(1900, month, day)?;
                            sheet.write_datetime_with_format(out_row, out_col, &d, &date_fmt)?;
                            continue;
                        }
                    }
                    sheet.write_string(out_row, out_col, s)?;
                }
                Cell::Missing => {}
            }
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

fn split_two(s: &str, sep: char) -> Option<(u8, u8)> {
    let (a, b) = s.split_once(sep)?;
    Some((a.parse().ok()?, b.parse().ok()?))
}
