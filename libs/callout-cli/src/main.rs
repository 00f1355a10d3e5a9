//! # Callouts
//!
//! `callouts process` turns exported placement records and meshes into a
//! JSON document of map-overlay polygons; `callouts status` lists what has
//! been exported and processed. Logging honours `RUST_LOG` (default `info`).

mod args;
mod commands;
mod maps;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::{CliArgs, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    tracing::debug!(?args, "Starting");

    match &args.command {
        Command::Process(process) => commands::process(process),
        Command::Status(status) => commands::status(status),
    }
}
