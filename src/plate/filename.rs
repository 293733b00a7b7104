//! Parsing of scan export filenames.
//!
//! Exports follow the convention `<organism> <plate> <HH>.<MM> <MM>.<DD>.xlsx`,
//! e.g. `Ecoli PM1 08.30 04.15.xlsx`.

use crate::error::{PlateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time of day a plate was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScanTime {
    pub hour: u8,
    pub minute: u8,
}

impl fmt::Display for ScanTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Calendar date of a scan (no year in the filename convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScanDate {
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for ScanDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

/// Metadata extracted from one scan export filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInfo {
    /// Original filename the record was parsed from.
    pub filename: String,
    /// Organism identifier (first token).
    pub organism: String,
    /// Plate type (second token, e.g. "PM1" or "PM2A").
    pub plate: String,
    pub time: ScanTime,
    pub date: ScanDate,
}

impl ScanInfo {
    /// Parse a filename of the form `<organism> <plate> <HH>.<MM> <MM>.<DD>.xlsx`.
    pub fn parse(filename: &str) -> Result<Self> {
        let err = |reason: &str| PlateError::Filename {
            name: filename.to_string(),
            reason: reason.to_string(),
        };

        let stem = filename
            .strip_suffix(".xlsx")
            .ok_or_else(|| err("missing .xlsx extension"))?;

        let tokens: Vec<&str> = stem.split(' ').collect();
        if tokens.len() != 4 {
            return Err(err(&format!(
                "expected 4 space-separated fields, found {}",
                tokens.len()
            )));
        }

        let (hour, minute) = split_pair(tokens[2]).ok_or_else(|| err("malformed time field"))?;
        if hour >= 24 || minute >= 60 {
            return Err(err("time field out of range"));
        }

        let (month, day) = split_pair(tokens[3]).ok_or_else(|| err("malformed date field"))?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(err("date field out of range"));
        }

        Ok(Self {
            filename: filename.to_string(),
            organism: tokens[0].to_string(),
            plate: tokens[1].to_string(),
            time: ScanTime { hour, minute },
            date: ScanDate { month, day },
        })
    }
}

/// Split a `XX.YY` token into its two numeric halves.
fn split_pair(token: &str) -> Option<(u8, u8)> {
    let (a, b) = token.split_once('.')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}
