// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The `esptool.py merge_bin` invocation.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::layout::FlashLayout;

pub const CHIP: &str = "esp32c3";
pub const FLASH_MODE: &str = "dio";
pub const FLASH_SIZE: &str = "4MB";

/// File name of the merged image inside the build directory.
/// Fixed literal, not derived from the project version.
pub const OUTPUT_NAME: &str = "full_install_v1.0.1.bin";

/// A fully resolved merge command, not yet executed.
#[derive(Debug, Clone)]
pub struct MergeCommand {
    pub interpreter: PathBuf,
    pub script: PathBuf,
    pub output: PathBuf,
    pub layout: FlashLayout,
}

impl MergeCommand {
    pub fn new(interpreter: &Path, script: &Path, output: &Path, layout: FlashLayout) -> Self {
        Self {
            interpreter: interpreter.to_path_buf(),
            script: script.to_path_buf(),
            output: output.to_path_buf(),
            layout,
        }
    }

    /// Full argument vector, interpreter first.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![
            self.interpreter.clone().into(),
            self.script.clone().into(),
            "--chip".into(),
            CHIP.into(),
            "merge_bin".into(),
            "-o".into(),
            self.output.clone().into(),
            "--flash_mode".into(),
            FLASH_MODE.into(),
            "--flash_size".into(),
            FLASH_SIZE.into(),
        ];
        argv.extend(self.layout.to_args());
        argv
    }

    /// Build the process to spawn. Arguments are passed directly, no shell.
    pub fn to_command(&self) -> Command {
        let argv = self.argv();
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        cmd
    }
}

impl fmt::Display for MergeCommand {
    /// Shell-like rendering with the interpreter, script and output quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" \"{}\" --chip {} merge_bin -o \"{}\" --flash_mode {} --flash_size {}",
            self.interpreter.display(),
            self.script.display(),
            CHIP,
            self.output.display(),
            FLASH_MODE,
            FLASH_SIZE,
        )?;
        for entry in self.layout.entries() {
            write!(f, " {} {}", entry.offset, entry.path.display())?;
        }
        Ok(())
    }
}
