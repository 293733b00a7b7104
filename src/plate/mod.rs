//! Plate geometry, filename conventions, and sheet extraction.

pub mod coords;
pub mod filename;
pub mod reader;

pub use coords::{prefixed_labels, well_columns, well_label, PLATE_COLS, PLATE_ROWS, WELLS_PER_PLATE};
pub use filename::{ScanDate, ScanInfo, ScanTime};
pub use reader::{read_plate, SheetSchema, WellReading};
