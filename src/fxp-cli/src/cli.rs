//! CLI argument definitions for fxp2aupreset

use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fxp2aupreset")]
#[command(about = ".fxp/.fxb to .aupreset converter", long_about = None)]
pub struct Cli {
    /// Directory of .fxp and .fxb files to convert (or a single file)
    pub path: PathBuf,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    /// Directory for the .aupreset files (defaults to next to each input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Parse and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the record tree of each input instead of converting
    #[arg(long, conflicts_with = "dry_run")]
    pub inspect: bool,

    /// Config file (defaults to <config dir>/fxp2aupreset/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Audio Unit metadata for the produced presets
#[derive(Args, Debug, Default, Clone)]
pub struct MetadataArgs {
    /// The four-character type code for the preset's audio unit
    #[arg(short = 't', long = "type", env = "FXP2AU_TYPE")]
    pub au_type: Option<String>,

    /// The four-character subtype code for the preset's audio unit
    #[arg(short, long, env = "FXP2AU_SUBTYPE")]
    pub subtype: Option<String>,

    /// The four-character manufacturer code for the preset's audio unit
    #[arg(short, long, env = "FXP2AU_MANUFACTURER")]
    pub manufacturer: Option<String>,

    /// The key in the aupreset that stores the preset's state
    #[arg(short = 'k', long, env = "FXP2AU_STATE_KEY")]
    pub state_key: Option<String>,

    /// An example .aupreset file from which to infer type, subtype,
    /// manufacturer and state key
    #[arg(short = 'x', long, value_name = "FILE")]
    pub example: Option<PathBuf>,
}
