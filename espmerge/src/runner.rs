// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! External process execution for the esptool merge.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use espmerge_common::MergeCommand;

/// Spinner refresh interval while esptool runs.
const TICK_MS: u64 = 100;

/// Run the merge command to completion.
///
/// esptool output is captured and replayed once the process exits so it
/// does not interleave with the spinner. A spawn failure or non-zero exit
/// is an error.
pub fn execute(cmd: &MergeCommand) -> Result<()> {
    let mut process = cmd.to_command();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("esptool merge_bin");
    pb.enable_steady_tick(Duration::from_millis(TICK_MS));

    let output = match process.output() {
        Ok(output) => output,
        Err(e) => {
            pb.abandon();
            return Err(e)
                .with_context(|| format!("Failed to start {}", cmd.interpreter.display()));
        }
    };
    pb.finish_and_clear();

    io::stdout().write_all(&output.stdout)?;
    io::stderr().write_all(&output.stderr)?;
    io::stdout().flush()?;

    log::debug!("esptool exited with {}", output.status);
    if !output.status.success() {
        bail!(
            "Merge command ({}) failed with {}; see output",
            cmd,
            output.status
        );
    }

    Ok(())
}
