//! Record tree dump for `--inspect`

use anyhow::{bail, Context, Result};
use fxp::{Data, Preset};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::error;

use crate::file_utils::collect_preset_files;

/// Handle `--inspect`: print the tree of every input
pub fn handle(path: &Path) -> Result<()> {
    let inputs = collect_preset_files(path)?;
    if inputs.is_empty() {
        println!("No .fxp or .fxb files found in '{}'", path.display());
        return Ok(());
    }

    for input in &inputs {
        match inspect_file(input) {
            Ok(tree) => {
                println!("{}:", input.display());
                print!("{}", tree);
            }
            Err(e) => error!("Failed to inspect {}: {:#}", input.display(), e),
        }
    }

    Ok(())
}

fn inspect_file(input: &Path) -> Result<String> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    if !fxp::is_fxp(&data) {
        bail!("{} is not a VST preset container", input.display());
    }
    let preset = fxp::parse(&data).context("Failed to parse preset")?;
    Ok(describe(&preset))
}

/// Human-readable tree of a record and its nested presets
pub fn describe(preset: &Preset) -> String {
    let mut out = String::new();
    describe_into(&mut out, preset, 1);
    out
}

fn describe_into(out: &mut String, preset: &Preset, depth: usize) {
    let indent = "  ".repeat(depth);

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "{}{} version={} fx_id={} fx_version={} count={} byte_size={}",
        indent,
        preset.kind(),
        preset.version,
        preset.fx_id_display(),
        preset.fx_version,
        preset.count,
        preset.byte_size,
    );

    match &preset.data {
        Data::Params { name, params } => {
            let _ = writeln!(out, "{}  name: {:?}", indent, name.as_str());
            let _ = writeln!(out, "{}  params: {:?}", indent, params);
        }
        Data::Chunk { name, chunk } => {
            let _ = writeln!(out, "{}  name: {:?}", indent, name.as_str());
            let _ = writeln!(out, "{}  chunk: {} bytes", indent, chunk.len());
        }
        Data::Bank { presets, .. } => {
            let _ = writeln!(out, "{}  presets: {}", indent, presets.len());
            for child in presets {
                describe_into(out, child, depth + 2);
            }
        }
        Data::BankChunk { chunk, .. } => {
            let _ = writeln!(out, "{}  chunk: {} bytes", indent, chunk.len());
        }
    }
}
