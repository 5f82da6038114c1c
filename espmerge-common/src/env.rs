// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build environment: directories handed over by the build tool, and the
//! lookup of the esptool package it installed.

use std::path::{Path, PathBuf};

use crate::artifacts::Artifacts;
use crate::merge::OUTPUT_NAME;
use crate::partitions::PARTITIONS_CSV;

/// Package holding esptool inside the PlatformIO packages directory.
pub const ESPTOOL_PACKAGE: &str = "tool-esptoolpy";
/// Entry script relative to the package directory.
pub const ESPTOOL_SCRIPT: &str = "esptool.py";

/// Environment variable overriding the PlatformIO core directory.
pub const CORE_DIR_VAR: &str = "PLATFORMIO_CORE_DIR";

/// Paths and names supplied by the surrounding build.
#[derive(Debug, Clone)]
pub struct BuildEnv {
    pub build_dir: PathBuf,
    pub project_dir: PathBuf,
    /// Interpreter used to run esptool.
    pub python: PathBuf,
    /// Program name; `<build_dir>/<progname>.bin` is the binary this step follows.
    pub progname: String,
}

impl BuildEnv {
    pub fn output_path(&self) -> PathBuf {
        self.build_dir.join(OUTPUT_NAME)
    }

    pub fn partitions_csv(&self) -> PathBuf {
        self.project_dir.join(PARTITIONS_CSV)
    }

    /// Primary binary whose production triggers the merge.
    pub fn trigger_target(&self) -> PathBuf {
        self.build_dir.join(format!("{}.bin", self.progname))
    }

    pub fn artifacts(&self) -> Artifacts {
        Artifacts::in_build_dir(&self.build_dir)
    }
}

/// Finds the installed esptool package.
///
/// Candidates, first hit wins:
/// 1. an explicitly configured package directory (used as given)
/// 2. `<core_dir>/packages/tool-esptoolpy`
/// 3. `<home>/.platformio/packages/tool-esptoolpy`
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    pub explicit: Option<PathBuf>,
    pub core_dir: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
}

impl ToolLocator {
    /// Locator seeded from the process environment.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            core_dir: std::env::var_os(CORE_DIR_VAR).map(PathBuf::from),
            home_dir: dirs::home_dir(),
        }
    }

    fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let core = self
            .core_dir
            .iter()
            .map(|d| d.join("packages").join(ESPTOOL_PACKAGE));
        let home = self
            .home_dir
            .iter()
            .map(|d| d.join(".platformio").join("packages").join(ESPTOOL_PACKAGE));
        core.chain(home)
    }

    /// Installed package directory, if any.
    pub fn package_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.explicit {
            return Some(dir.clone());
        }
        let found = self.candidates().find(|d| d.is_dir());
        if found.is_none() {
            log::debug!("{} package not found", ESPTOOL_PACKAGE);
        }
        found
    }

    /// Path to `esptool.py`.
    ///
    /// Without a package directory this is the bare script name; running it
    /// then fails in the interpreter, which reports the missing file.
    pub fn esptool_script(&self) -> PathBuf {
        self.package_dir()
            .unwrap_or_default()
            .join(ESPTOOL_SCRIPT)
    }
}

/// Default build directory for a PlatformIO environment.
pub fn pio_build_dir(project_dir: &Path, pio_env: &str) -> PathBuf {
    project_dir.join(".pio").join("build").join(pio_env)
}
