//! Generate UniFFI Swift bindings for the emoji picker
//!
//! Run: cargo run --bin generate-bindings
//!
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ DEPENDENCY MAP - Output paths must match Package.swift expectations         │
//! │                                                                             │
//! │ Inputs:                                                                     │
//! │   target/release/libpicker.dylib     ← Built library for bindgen            │
//! │                                                                             │
//! │ Outputs (paths match Package.swift):                                        │
//! │   Sources/EmojiPickerFFI/pickerFFI.h         ← C header                     │
//! │   Sources/EmojiPickerFFI/module.modulemap    ← Clang module map             │
//! │   Sources/EmojiPickerFFI/libpicker.a         ← Universal static lib         │
//! │   Sources/EmojiPicker/picker.swift           ← Swift bindings               │
//! └─────────────────────────────────────────────────────────────────────────────┘

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() -> Result<()> {
    let rust_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let project_root = rust_dir.parent().context("No parent directory")?;

    // Build with the same deployment target as the Swift package
    env::set_var("MACOSX_DEPLOYMENT_TARGET", "14.0");

    println!("Building Rust library...");
    run_cmd("cargo", &["build", "--release"], rust_dir)?;

    println!("Generating Swift bindings...");
    run_cmd(
        "cargo",
        &[
            "run",
            "--bin",
            "uniffi-bindgen",
            "generate",
            "--library",
            "target/release/libpicker.dylib",
            "--language",
            "swift",
            "--out-dir",
            "generated",
        ],
        rust_dir,
    )?;

    let ffi_dest = project_root.join("Sources/EmojiPickerFFI");
    let swift_dest = project_root.join("Sources/EmojiPicker");
    let generated = rust_dir.join("generated");
    fs::create_dir_all(&ffi_dest)?;
    fs::create_dir_all(&swift_dest)?;

    // Swift 6 concurrency + module import
    println!("Copying generated Swift file...");
    let swift_content = fs::read_to_string(generated.join("picker.swift"))
        .context("Read picker.swift")?
        .replace(
            "private var initializationResult",
            "nonisolated(unsafe) private var initializationResult",
        )
        .replace("#if canImport(pickerFFI)", "#if canImport(EmojiPickerFFI)")
        .replace("import pickerFFI", "import EmojiPickerFFI");
    fs::write(swift_dest.join("picker.swift"), swift_content).context("Write picker.swift")?;

    fs::copy(generated.join("pickerFFI.h"), ffi_dest.join("pickerFFI.h")).context("Copy header")?;

    println!("Writing modulemap...");
    fs::write(
        ffi_dest.join("module.modulemap"),
        "module EmojiPickerFFI {\n    header \"pickerFFI.h\"\n    export *\n}\n",
    )
    .context("Write modulemap")?;

    println!("Building universal static library...");
    for target in ["aarch64-apple-darwin", "x86_64-apple-darwin"] {
        run_cmd("cargo", &["build", "--release", "--target", target], rust_dir)?;
    }

    run_cmd(
        "lipo",
        &[
            "-create",
            "target/aarch64-apple-darwin/release/libpicker.a",
            "target/x86_64-apple-darwin/release/libpicker.a",
            "-output",
            &ffi_dest.join("libpicker.a").to_string_lossy(),
        ],
        rust_dir,
    )?;

    println!("Done! Bindings regenerated successfully.");
    println!("Generated files:");
    println!("  - {}/picker.swift", swift_dest.display());
    println!("  - {}/pickerFFI.h", ffi_dest.display());
    println!("  - {}/module.modulemap", ffi_dest.display());
    println!("  - {}/libpicker.a", ffi_dest.display());
    Ok(())
}

fn run_cmd(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    if !status.success() {
        bail!("{} failed with status: {}", program, status);
    }
    Ok(())
}
