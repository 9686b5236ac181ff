//! fxp2aupreset: converts VST 2 opaque chunk presets into Audio Unit presets

mod cli;
mod commands;
mod config;
mod file_utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.inspect {
        return commands::inspect::handle(&cli.path);
    }

    commands::convert::handle(&cli)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "fxp2aupreset=debug,aupreset=debug"
    } else {
        "fxp2aupreset=info,aupreset=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
