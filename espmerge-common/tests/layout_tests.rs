// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Flash layout assembly against scratch build directories.

use std::fs;
use std::path::Path;

use espmerge_common::layout::ImageKind;
use espmerge_common::{Artifacts, FlashLayout, FsOffset, OffsetSource};
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), [0xFFu8; 16]).unwrap();
}

fn offsets(layout: &FlashLayout) -> Vec<&str> {
    layout.entries().iter().map(|e| e.offset.as_str()).collect()
}

fn table_offset(offset: &str) -> FsOffset {
    FsOffset {
        offset: offset.to_string(),
        source: OffsetSource::PartitionTable,
    }
}

// =============================================================================
// Mandatory images
// =============================================================================

#[test]
fn test_mandatory_only() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "bootloader.bin");
    touch(dir.path(), "partitions.bin");
    touch(dir.path(), "firmware.bin");

    let layout = FlashLayout::assemble(
        &Artifacts::in_build_dir(dir.path()),
        &table_offset("0x290000"),
    );

    assert_eq!(offsets(&layout), ["0x0000", "0x8000", "0x10000"]);
    assert_eq!(layout.entries()[0].path, dir.path().join("bootloader.bin"));
    assert_eq!(layout.entries()[1].path, dir.path().join("partitions.bin"));
    assert_eq!(layout.entries()[2].path, dir.path().join("firmware.bin"));
}

#[test]
fn test_mandatory_images_are_not_checked() {
    let dir = tempdir().unwrap();

    let layout = FlashLayout::assemble(&Artifacts::in_build_dir(dir.path()), &FsOffset::fallback());

    assert_eq!(offsets(&layout), ["0x0000", "0x8000", "0x10000"]);
}

// =============================================================================
// Optional images
// =============================================================================

#[test]
fn test_ota_data_after_firmware() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "firmware.bin");
    touch(dir.path(), "ota_data_initial.bin");

    let layout = FlashLayout::assemble(&Artifacts::in_build_dir(dir.path()), &FsOffset::fallback());

    assert_eq!(offsets(&layout), ["0x0000", "0x8000", "0x10000", "0xe000"]);
    let ota = layout.find(ImageKind::OtaData).unwrap();
    assert_eq!(ota.path, dir.path().join("ota_data_initial.bin"));
}

#[test]
fn test_filesystem_absent_never_in_layout() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "ota_data_initial.bin");

    let layout = FlashLayout::assemble(
        &Artifacts::in_build_dir(dir.path()),
        &table_offset("0x290000"),
    );

    assert!(layout.find(ImageKind::Filesystem).is_none());
    assert!(!offsets(&layout).contains(&"0x290000"));
    assert_eq!(layout.len(), 4);
}

#[test]
fn test_filesystem_present_is_last() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "ota_data_initial.bin");
    touch(dir.path(), "littlefs.bin");

    let layout = FlashLayout::assemble(
        &Artifacts::in_build_dir(dir.path()),
        &table_offset("0x290000"),
    );

    assert_eq!(
        offsets(&layout),
        ["0x0000", "0x8000", "0x10000", "0xe000", "0x290000"]
    );
    let last = layout.entries().last().unwrap();
    assert_eq!(last.kind, ImageKind::Filesystem);
    assert_eq!(last.path, dir.path().join("littlefs.bin"));
}

#[test]
fn test_filesystem_uses_fallback_offset() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "littlefs.bin");

    let layout = FlashLayout::assemble(&Artifacts::in_build_dir(dir.path()), &FsOffset::fallback());

    assert_eq!(offsets(&layout), ["0x0000", "0x8000", "0x10000", "0x250000"]);
}

// =============================================================================
// Argument flattening
// =============================================================================

#[test]
fn test_to_args_pairs_offset_and_path() {
    let dir = tempdir().unwrap();

    let layout = FlashLayout::assemble(&Artifacts::in_build_dir(dir.path()), &FsOffset::fallback());
    let args = layout.to_args();

    assert_eq!(args.len(), 6);
    assert_eq!(args[0], "0x0000");
    assert_eq!(args[1], dir.path().join("bootloader.bin").into_os_string());
    assert_eq!(args[4], "0x10000");
    assert_eq!(args[5], dir.path().join("firmware.bin").into_os_string());
}

#[test]
fn test_layout_json_shape() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "littlefs.bin");

    let layout = FlashLayout::assemble(
        &Artifacts::in_build_dir(dir.path()),
        &table_offset("0x290000"),
    );
    let json = serde_json::to_value(&layout).unwrap();

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["kind"], "bootloader");
    assert_eq!(entries[3]["kind"], "filesystem");
    assert_eq!(entries[3]["offset"], "0x290000");
}

// =============================================================================
// Inclusion follows the required flag
// =============================================================================

#[test]
fn test_required_artifact_included_when_absent() {
    let dir = tempdir().unwrap();
    let mut artifacts = Artifacts::in_build_dir(dir.path());
    artifacts.ota_data.required = true;

    let layout = FlashLayout::assemble(&artifacts, &FsOffset::fallback());

    assert_eq!(offsets(&layout), ["0x0000", "0x8000", "0x10000", "0xe000"]);
}

#[test]
fn test_optional_artifact_skipped_when_absent() {
    let dir = tempdir().unwrap();
    let mut artifacts = Artifacts::in_build_dir(dir.path());
    artifacts.firmware.required = false;

    let layout = FlashLayout::assemble(&artifacts, &FsOffset::fallback());

    assert_eq!(offsets(&layout), ["0x0000", "0x8000"]);
    assert!(layout.find(ImageKind::Application).is_none());
}
