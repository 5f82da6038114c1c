// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Post-build tool merging ESP32-C3 build artifacts into one flashable image.
//!
//! Usage:
//!   espmerge --build-dir .pio/build/esp32c3 merge
//!   espmerge --pio-env esp32c3 merge --dry-run
//!   espmerge --pio-env esp32c3 layout --json

mod cli;
mod commands;
mod runner;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Cli::parse();
    cli::run(args)
}
