// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build artifacts consumed by the merge step.
//!
//! All file names are fixed; only the build directory varies between runs.

use std::path::{Path, PathBuf};

pub const BOOTLOADER_BIN: &str = "bootloader.bin";
pub const PARTITIONS_BIN: &str = "partitions.bin";
pub const FIRMWARE_BIN: &str = "firmware.bin";
pub const OTA_DATA_BIN: &str = "ota_data_initial.bin";
pub const FS_BIN: &str = "littlefs.bin";

/// A single build output and whether the layout may omit it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub required: bool,
}

impl Artifact {
    fn required(path: PathBuf) -> Self {
        Self {
            path,
            required: true,
        }
    }

    fn optional(path: PathBuf) -> Self {
        Self {
            path,
            required: false,
        }
    }

    /// Whether the file is on disk right now.
    ///
    /// Only consulted for optional artifacts: required ones are handed to
    /// esptool unchecked and any absence surfaces as a tool failure.
    pub fn is_present(&self) -> bool {
        self.path.exists()
    }
}

/// The full set of artifacts expected in a build directory.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub bootloader: Artifact,
    pub partitions: Artifact,
    pub firmware: Artifact,
    pub ota_data: Artifact,
    pub filesystem: Artifact,
}

impl Artifacts {
    /// Reference every artifact inside `build_dir`. Nothing is touched on disk.
    pub fn in_build_dir(build_dir: &Path) -> Self {
        Self {
            bootloader: Artifact::required(build_dir.join(BOOTLOADER_BIN)),
            partitions: Artifact::required(build_dir.join(PARTITIONS_BIN)),
            firmware: Artifact::required(build_dir.join(FIRMWARE_BIN)),
            ota_data: Artifact::optional(build_dir.join(OTA_DATA_BIN)),
            filesystem: Artifact::optional(build_dir.join(FS_BIN)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_flags() {
        let a = Artifacts::in_build_dir(Path::new("/build"));
        assert!(a.bootloader.required);
        assert!(a.partitions.required);
        assert!(a.firmware.required);
        assert!(!a.ota_data.required);
        assert!(!a.filesystem.required);
    }

    #[test]
    fn test_paths_are_inside_build_dir() {
        let a = Artifacts::in_build_dir(Path::new("/build"));
        assert_eq!(a.firmware.path, Path::new("/build/firmware.bin"));
        assert_eq!(a.filesystem.path, Path::new("/build/littlefs.bin"));
    }
}
