//! Directory scanning and pairing of plate exports by experiment date.

use crate::error::Result;
use crate::plate::{ScanDate, ScanInfo, ScanTime};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One complete experiment instance: every declared plate scanned on one date.
#[derive(Debug, Clone)]
pub struct PlateRun {
    pub organism: String,
    /// Scan time of the first declared plate.
    pub time: ScanTime,
    pub date: ScanDate,
    /// One export file per declared plate, in declared plate order.
    pub plate_files: Vec<(String, PathBuf)>,
}

/// A date for which one or more declared plates were never scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteDate {
    pub date: ScanDate,
    pub missing: Vec<String>,
}

/// Outcome of scanning one organism directory.
#[derive(Debug, Clone)]
pub struct CollectedRuns {
    /// Complete runs, ordered by date.
    pub runs: Vec<PlateRun>,
    /// Dates skipped for missing plates, ordered by date.
    pub incomplete: Vec<IncompleteDate>,
}

/// Scan a directory of plate exports and pair them up by date.
///
/// Every regular file must parse under the filename convention; the first
/// malformed name fails the scan. Entries are sorted by (date, time, plate,
/// filename) before grouping so the outcome does not depend on filesystem
/// listing order: when a plate type was scanned twice on one date, the last
/// entry in sorted order wins.
///
/// Dates missing one of the declared plates are reported in
/// [`CollectedRuns::incomplete`] and logged, not silently dropped.
pub fn collect_runs<P: AsRef<Path>>(dir: P, plates: &[String]) -> Result<CollectedRuns> {
    let dir = dir.as_ref();
    let mut entries: Vec<(ScanInfo, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let info = ScanInfo::parse(&name)?;
        entries.push((info, entry.path()));
    }

    entries.sort_by(|(a, _), (b, _)| {
        (a.date, a.time, &a.plate, &a.filename).cmp(&(b.date, b.time, &b.plate, &b.filename))
    });

    let mut by_date: BTreeMap<ScanDate, Vec<(ScanInfo, PathBuf)>> = BTreeMap::new();
    for (info, path) in entries {
        by_date.entry(info.date).or_default().push((info, path));
    }

    let mut runs = Vec::new();
    let mut incomplete = Vec::new();

    for (date, day_entries) in by_date {
        let mut found: Vec<(&ScanInfo, &PathBuf)> = Vec::new();
        let mut missing: Vec<String> = Vec::new();

        for plate in plates {
            let matches: Vec<_> = day_entries
                .iter()
                .filter(|(info, _)| &info.plate == plate)
                .collect();
            match matches.last() {
                Some((info, path)) => {
                    if matches.len() > 1 {
                        warn!(
                            "{}: {} {} scans found for {}, using {}",
                            dir.display(),
                            matches.len(),
                            plate,
                            date,
                            info.filename
                        );
                    }
                    found.push((info, path));
                }
                None => missing.push(plate.clone()),
            }
        }

        if missing.is_empty() {
            let first = found[0].0;
            runs.push(PlateRun {
                organism: first.organism.clone(),
                time: first.time,
                date,
                plate_files: found
                    .iter()
                    .map(|(info, path)| (info.plate.clone(), (*path).clone()))
                    .collect(),
            });
        } else {
            warn!(
                "{}: skipping {} (missing {})",
                dir.display(),
                date,
                missing.join(", ")
            );
            incomplete.push(IncompleteDate { date, missing });
        }
    }

    Ok(CollectedRuns { runs, incomplete })
}
