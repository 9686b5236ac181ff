//! Batch conversion command
//!
//! Metadata problems abort the run before any file is read. After that every
//! input is handled on its own: a failure is logged and the batch moves on.

use anyhow::{Context, Result};
use aupreset::{Metadata, AUPRESET_EXTENSION};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::cli::{Cli, MetadataArgs};
use crate::config::Config;
use crate::file_utils::{collect_preset_files, preset_name};

/// Result of converting one input
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Created(PathBuf),
    /// Parsed fine, but the variant has no `.aupreset` form
    Skipped(fxp::Kind),
}

/// Per-run counts
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} failed",
            self.created, self.skipped, self.failed
        )
    }
}

/// Handle a conversion run
pub fn handle(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let metadata = resolve_metadata(&cli.metadata, &config)?;
    debug!(?metadata, "Resolved Audio Unit metadata");

    let inputs = collect_preset_files(&cli.path)?;
    if inputs.is_empty() {
        info!("No .fxp or .fxb files found in '{}'", cli.path.display());
        return Ok(());
    }

    if let Some(dir) = &cli.output {
        if !cli.dry_run {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        }
    }

    let summary = run_batch(&inputs, cli.output.as_deref(), &metadata, cli.dry_run);
    info!("{}", summary);

    Ok(())
}

/// Work out the Audio Unit metadata
///
/// With `--example`, the codes come from the example file. The state key is
/// taken from the flag, then the example's guess, then the config file.
/// Without an example each value comes from its flag or the config file.
pub fn resolve_metadata(args: &MetadataArgs, config: &Config) -> Result<Metadata> {
    if let Some(example) = &args.example {
        let inferred = aupreset::infer_from_example(example)
            .with_context(|| format!("Failed to infer metadata from {}", example.display()))?;

        let state_key = args
            .state_key
            .clone()
            .or_else(|| inferred.state_key.clone())
            .or_else(|| config.state_key.clone())
            .ok_or(aupreset::Error::MissingMetadata("state key"))
            .context("Provide --state-key; it could not be inferred from the example")?;

        return Ok(inferred.with_state_key(state_key));
    }

    let code = |flag: &Option<String>, configured: &Option<String>, what: &'static str| {
        let text = flag
            .as_deref()
            .or(configured.as_deref())
            .ok_or(aupreset::Error::MissingMetadata(what))
            .with_context(|| format!("Must provide a {} or an example aupreset", what))?;
        fxp::encode_tag(text).with_context(|| format!("Invalid {} code", what))
    };

    let au_type = code(&args.au_type, &config.au_type, "type")?;
    let subtype = code(&args.subtype, &config.subtype, "subtype")?;
    let manufacturer = code(&args.manufacturer, &config.manufacturer, "manufacturer")?;

    let state_key = args
        .state_key
        .clone()
        .or_else(|| config.state_key.clone())
        .ok_or(aupreset::Error::MissingMetadata("state key"))
        .context("Must provide a state key or an example aupreset to infer one from")?;

    Ok(Metadata {
        au_type,
        subtype,
        manufacturer,
        state_key,
    })
}

/// Convert every input, logging each outcome
pub fn run_batch(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    metadata: &Metadata,
    dry_run: bool,
) -> Summary {
    let mut summary = Summary::default();

    for input in inputs {
        debug!("Opening preset file {}", input.display());

        match convert_file(input, output_dir, metadata, dry_run) {
            Ok(Outcome::Created(path)) => {
                summary.created += 1;
                if dry_run {
                    info!("Would create {}", path.display());
                } else {
                    info!("Created {}", path.display());
                }
            }
            Ok(Outcome::Skipped(kind)) => {
                summary.skipped += 1;
                let record = if kind.is_bank() { "bank" } else { "preset" };
                warn!(
                    "Skipping {}: {} {} is not in opaque chunk format and can not be converted",
                    input.display(),
                    kind,
                    record
                );
            }
            Err(e) => {
                summary.failed += 1;
                error!("Failed to convert {}: {:#}", input.display(), e);
            }
        }
    }

    summary
}

/// Convert one file, writing `<stem>.aupreset` next to it or into `output_dir`
pub fn convert_file(
    input: &Path,
    output_dir: Option<&Path>,
    metadata: &Metadata,
    dry_run: bool,
) -> Result<Outcome> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let preset = fxp::parse(&data).context("Failed to parse preset")?;

    let name = preset_name(input);
    let document = match aupreset::convert(&preset, &name, metadata) {
        Ok(document) => document,
        Err(aupreset::Error::UnsupportedVariant(kind)) => return Ok(Outcome::Skipped(kind)),
        Err(e) => return Err(e.into()),
    };

    let xml = aupreset::to_xml(&document)?;

    let dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new("."));
    let output = dir.join(format!("{}.{}", name, AUPRESET_EXTENSION));

    if !dry_run {
        fs::write(&output, xml).with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(Outcome::Created(output))
}
