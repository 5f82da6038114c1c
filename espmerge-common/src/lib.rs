// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and utilities for espmerge.
//!
//! Everything here is pure host-side logic with no process execution:
//! - `artifacts`: the build outputs the merge step consumes
//! - `layout`: flash offsets and the ordered layout handed to esptool
//! - `partitions`: filesystem offset lookup in `partitions.csv`
//! - `merge`: the `esptool.py merge_bin` command line
//! - `env`: build/project directories and the esptool package lookup

pub mod artifacts;
pub mod env;
pub mod layout;
pub mod merge;
pub mod partitions;

// Re-export commonly used types
pub use artifacts::{Artifact, Artifacts};
pub use env::{BuildEnv, ToolLocator};
pub use layout::{FlashEntry, FlashLayout, ImageKind};
pub use merge::MergeCommand;
pub use partitions::{FsOffset, OffsetSource};

pub use layout::{BOOTLOADER_OFFSET, FIRMWARE_OFFSET, OTA_DATA_OFFSET, PARTITION_TABLE_OFFSET};
pub use merge::{CHIP, FLASH_MODE, FLASH_SIZE, OUTPUT_NAME};
pub use partitions::FALLBACK_FS_OFFSET;
