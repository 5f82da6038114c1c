// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Filesystem partition offset lookup.
//!
//! This is not a partition table parser. The first line of `partitions.csv`
//! mentioning `spiffs` or `littlefs` anywhere is taken as the filesystem
//! partition and its fourth comma-separated field as the offset.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

/// Offset used when the partition table gives no answer.
pub const FALLBACK_FS_OFFSET: &str = "0x250000";

/// Name of the partition table description in the project directory.
pub const PARTITIONS_CSV: &str = "partitions.csv";

const FS_MARKERS: [&str; 2] = ["spiffs", "littlefs"];
const OFFSET_COLUMN: usize = 3;

/// Where a filesystem offset came from.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OffsetSource {
    PartitionTable,
    Fallback,
}

/// Resolved filesystem offset, kept as the hex string esptool receives.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FsOffset {
    pub offset: String,
    pub source: OffsetSource,
}

impl FsOffset {
    pub fn fallback() -> Self {
        Self {
            offset: FALLBACK_FS_OFFSET.to_string(),
            source: OffsetSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == OffsetSource::Fallback
    }
}

impl fmt::Display for FsOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.offset)
    }
}

/// Scan partition table lines for the filesystem offset.
///
/// Returns `None` when no line matches or the matching line has no usable
/// fourth field. Scanning always stops at the first matching line.
pub fn scan_offset<I, S>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = lines
        .into_iter()
        .find(|line| FS_MARKERS.iter().any(|m| line.as_ref().contains(m)))?;

    let field = line.as_ref().split(',').nth(OFFSET_COLUMN)?.trim();
    if field.is_empty() {
        log::debug!("filesystem partition line has an empty offset field");
        None
    } else {
        Some(field.to_string())
    }
}

/// Resolve the filesystem offset from the partition table at `csv_path`.
///
/// A missing file falls back to [`FALLBACK_FS_OFFSET`]; other I/O errors
/// are returned.
pub fn resolve_fs_offset(csv_path: &Path) -> io::Result<FsOffset> {
    let file = match File::open(csv_path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no partition table at {}", csv_path.display());
            return Ok(FsOffset::fallback());
        }
        Err(e) => return Err(e),
    };

    let lines = BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<String>>>()?;

    match scan_offset(&lines) {
        Some(offset) => {
            log::debug!("filesystem offset {} from {}", offset, csv_path.display());
            Ok(FsOffset {
                offset,
                source: OffsetSource::PartitionTable,
            })
        }
        None => Ok(FsOffset::fallback()),
    }
}
