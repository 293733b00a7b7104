//! Well coordinate labeling for 96-well plates.

use crate::error::{PlateError, Result};

/// Number of rows on a plate (A through H).
pub const PLATE_ROWS: usize = 8;

/// Number of columns on a plate (1 through 12).
pub const PLATE_COLS: usize = 12;

/// Total wells per plate.
pub const WELLS_PER_PLATE: usize = PLATE_ROWS * PLATE_COLS;

const ROW_LETTERS: [char; PLATE_ROWS] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Map a flat row-major well index to its coordinate label.
///
/// Index 0 is "A1", index 11 is "A12", index 12 is "B1", index 95 is "H12",
/// matching the labeling used by the absorbance reader output.
pub fn well_label(index: usize) -> Result<String> {
    if index >= WELLS_PER_PLATE {
        return Err(PlateError::InvalidParameter(format!(
            "Well index {} out of range (plate has {} wells)",
            index, WELLS_PER_PLATE
        )));
    }
    let row = ROW_LETTERS[index / PLATE_COLS];
    let col = index % PLATE_COLS + 1;
    Ok(format!("{}{}", row, col))
}

/// All 96 well labels in row-major order, each prepended with `prefix`.
pub fn prefixed_labels(prefix: &str) -> Vec<String> {
    (0..WELLS_PER_PLATE)
        .map(|i| {
            // index is always in range here
            format!("{}{}", prefix, well_label(i).unwrap())
        })
        .collect()
}

/// The full well-column naming scheme for a set of plate types.
///
/// For plates `["PM1", "PM2A"]` this yields "PM1 A1".."PM1 H12" followed by
/// "PM2A A1".."PM2A H12", the column order used in combined tables.
pub fn well_columns(plates: &[String]) -> Vec<String> {
    plates
        .iter()
        .flat_map(|p| prefixed_labels(&format!("{} ", p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_labels() {
        assert_eq!(well_label(0).unwrap(), "A1");
        assert_eq!(well_label(11).unwrap(), "A12");
        assert_eq!(well_label(12).unwrap(), "B1");
        assert_eq!(well_label(95).unwrap(), "H12");
    }

    #[test]
    fn test_all_labels_unique() {
        let labels: Vec<String> = (0..WELLS_PER_PLATE)
            .map(|i| well_label(i).unwrap())
            .collect();
        let mut sorted = labels.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), WELLS_PER_PLATE);
        assert_eq!(labels[13], "B2");
        assert_eq!(labels[94], "H11");
    }

    #[test]
    fn test_out_of_range() {
        assert!(well_label(96).is_err());
        assert!(well_label(usize::MAX).is_err());
    }

    #[test]
    fn test_prefixed_labels() {
        let labels = prefixed_labels("PM1 ");
        assert_eq!(labels.len(), 96);
        assert_eq!(labels[0], "PM1 A1");
        assert_eq!(labels[95], "PM1 H12");
    }

    #[test]
    fn test_well_columns_scheme() {
        let plates = vec!["PM1".to_string(), "PM2A".to_string()];
        let cols = well_columns(&plates);
        assert_eq!(cols.len(), 192);
        assert_eq!(cols[0], "PM1 A1");
        assert_eq!(cols[96], "PM2A A1");
        assert_eq!(cols[191], "PM2A H12");
    }
}
