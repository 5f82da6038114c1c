// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use espmerge_common::env::pio_build_dir;
use espmerge_common::{BuildEnv, ToolLocator};

use crate::commands;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "espmerge")]
#[command(about = "Merge ESP32-C3 build artifacts into a single flashable image")]
pub struct Cli {
    #[command(flatten)]
    pub env: EnvArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Values normally provided by the build tool through its environment.
#[derive(Args)]
pub struct EnvArgs {
    /// Build directory holding the compiled artifacts
    #[arg(long, env = "BUILD_DIR", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Project directory holding partitions.csv
    #[arg(long, env = "PROJECT_DIR", value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// PlatformIO environment, used to derive the build directory
    #[arg(long, env = "PIOENV", value_name = "ENV")]
    pub pio_env: Option<String>,

    /// Python interpreter running esptool
    #[arg(long, env = "PYTHONEXE", default_value = "python3")]
    pub python: PathBuf,

    /// Program name of the primary firmware binary
    #[arg(long, env = "PROGNAME", default_value = "firmware")]
    pub progname: String,

    /// esptool package directory (e.g., ~/.platformio/packages/tool-esptoolpy)
    #[arg(long, env = "ESPTOOL_PACKAGE_DIR", value_name = "DIR")]
    pub esptool_dir: Option<PathBuf>,
}

impl EnvArgs {
    /// Resolve the build environment. A build directory is required, either
    /// directly or through the PlatformIO environment name.
    pub fn build_env(&self) -> Result<BuildEnv> {
        let build_dir = match (&self.build_dir, &self.pio_env) {
            (Some(dir), _) => dir.clone(),
            (None, Some(env)) => pio_build_dir(&self.project_dir, env),
            (None, None) => bail!("No build directory: pass --build-dir or --pio-env"),
        };

        Ok(BuildEnv {
            build_dir,
            project_dir: self.project_dir.clone(),
            python: self.python.clone(),
            progname: self.progname.clone(),
        })
    }
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Merge the build artifacts into one image with esptool
    Merge {
        /// Print the esptool command without running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the resolved flash layout
    Layout {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let env = cli.env.build_env()?;
    log::debug!("build environment: {:?}", env);

    match cli.command {
        Commands::Merge { dry_run } => {
            let locator = ToolLocator::from_env(cli.env.esptool_dir.clone());
            commands::merge(&env, &locator, dry_run)
        }
        Commands::Layout { json } => commands::layout(&env, json),
    }
}
