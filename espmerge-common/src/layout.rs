// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Flash layout for the merged image.
//!
//! esptool writes every image at its absolute offset, so entry order does
//! not change the output. It is still kept stable (bootloader, partition
//! table, application, OTA data, filesystem) so logs read the same way on
//! every run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::artifacts::Artifacts;
use crate::partitions::FsOffset;

// --- Flash layout constants ---

pub const BOOTLOADER_OFFSET: &str = "0x0000";
pub const PARTITION_TABLE_OFFSET: &str = "0x8000";
pub const OTA_DATA_OFFSET: &str = "0xe000";
pub const FIRMWARE_OFFSET: &str = "0x10000";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Bootloader,
    PartitionTable,
    Application,
    OtaData,
    Filesystem,
}

/// One image written at an absolute flash offset.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashEntry {
    pub kind: ImageKind,
    pub offset: String,
    pub path: PathBuf,
}

impl FlashEntry {
    fn new(kind: ImageKind, offset: &str, path: &Path) -> Self {
        Self {
            kind,
            offset: offset.to_string(),
            path: path.to_path_buf(),
        }
    }
}

/// Ordered list of images handed to `merge_bin`.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FlashLayout {
    entries: Vec<FlashEntry>,
}

impl FlashLayout {
    /// Build the layout for a set of artifacts.
    ///
    /// Required artifacts are always included without checking the disk.
    /// Optional ones are included only when present. The filesystem image
    /// goes at `fs_offset`.
    pub fn assemble(artifacts: &Artifacts, fs_offset: &FsOffset) -> Self {
        let mut layout = Self::default();

        let images = [
            (ImageKind::Bootloader, BOOTLOADER_OFFSET, &artifacts.bootloader),
            (ImageKind::PartitionTable, PARTITION_TABLE_OFFSET, &artifacts.partitions),
            (ImageKind::Application, FIRMWARE_OFFSET, &artifacts.firmware),
            (ImageKind::OtaData, OTA_DATA_OFFSET, &artifacts.ota_data),
            (ImageKind::Filesystem, fs_offset.offset.as_str(), &artifacts.filesystem),
        ];

        for (kind, offset, artifact) in images {
            if artifact.required || artifact.is_present() {
                layout.push(FlashEntry::new(kind, offset, &artifact.path));
            } else {
                log::debug!("{} missing, skipped", artifact.path.display());
            }
        }

        layout
    }

    fn push(&mut self, entry: FlashEntry) {
        log::trace!("layout: {} -> {}", entry.offset, entry.path.display());
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FlashEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, kind: ImageKind) -> Option<&FlashEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Flatten into `offset path offset path ...` arguments.
    pub fn to_args(&self) -> Vec<OsString> {
        self.entries
            .iter()
            .flat_map(|e| [OsString::from(&e.offset), e.path.clone().into_os_string()])
            .collect()
    }
}
