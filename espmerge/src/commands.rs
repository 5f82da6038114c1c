// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for image assembly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crc::{Crc, CRC_32_ISO_HDLC};
use serde::Serialize;

use espmerge_common::layout::ImageKind;
use espmerge_common::partitions::resolve_fs_offset;
use espmerge_common::{BuildEnv, FlashLayout, FsOffset, MergeCommand, ToolLocator};

use crate::runner;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// JSON shape printed by `layout --json`.
#[derive(Serialize)]
struct LayoutReport<'a> {
    output: &'a Path,
    filesystem_offset: &'a FsOffset,
    images: &'a FlashLayout,
}

fn resolve_offset(env: &BuildEnv) -> Result<FsOffset> {
    let csv = env.partitions_csv();
    resolve_fs_offset(&csv).with_context(|| format!("Failed to read {}", csv.display()))
}

/// Merge all build artifacts into the output image.
pub fn merge(env: &BuildEnv, locator: &ToolLocator, dry_run: bool) -> Result<()> {
    let output = env.output_path();
    let script = locator.esptool_script();

    println!();
    println!("Starting dynamic binary merging...");
    log::info!("post-build merge for {}", env.trigger_target().display());

    let fs_offset = resolve_offset(env)?;
    if fs_offset.is_fallback() {
        println!("Offset calculated from partition sizes: {}", fs_offset);
    }

    let layout = FlashLayout::assemble(&env.artifacts(), &fs_offset);

    if let Some(ota) = layout.find(ImageKind::OtaData) {
        println!("OTA data found at offset {}", ota.offset);
    }
    match layout.find(ImageKind::Filesystem) {
        Some(fs) => println!("File System found at offset {}", fs.offset),
        None => {
            println!("Warning: littlefs.bin not found!");
            log::warn!("merged image will have no filesystem partition");
        }
    }

    let cmd = MergeCommand::new(&env.python, &script, &output, layout);
    println!("Executing: {}", cmd);

    if dry_run {
        println!("Dry run, esptool not started.");
        return Ok(());
    }

    runner::execute(&cmd)?;

    let (size, crc32) = image_summary(&output)?;
    println!(
        "Success! Merged binary created: {} ({} bytes, CRC32: 0x{:08x})",
        output.display(),
        size,
        crc32
    );
    println!();

    Ok(())
}

/// Print the flash layout that `merge` would use.
pub fn layout(env: &BuildEnv, json: bool) -> Result<()> {
    let fs_offset = resolve_offset(env)?;
    let layout = FlashLayout::assemble(&env.artifacts(), &fs_offset);

    if json {
        let output = env.output_path();
        let report = LayoutReport {
            output: &output,
            filesystem_offset: &fs_offset,
            images: &layout,
        };
        let text = serde_json::to_string_pretty(&report)
            .with_context(|| format!("Failed to encode layout for {}", output.display()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Flash layout:");
    for entry in layout.entries() {
        println!("  {:>9}  {}", entry.offset, entry.path.display());
    }
    println!(
        "Filesystem offset: {} ({})",
        fs_offset,
        if fs_offset.is_fallback() {
            "fallback"
        } else {
            "partitions.csv"
        }
    );
    if layout.find(ImageKind::Filesystem).is_none() {
        println!("Warning: littlefs.bin not found!");
    }
    println!("Output: {}", env.output_path().display());

    Ok(())
}

fn image_summary(path: &Path) -> Result<(usize, u32)> {
    let image = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((image.len(), CRC32.checksum(&image)))
}
