mod commands;

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use photoload_core::config::IngestConfig;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: photoload <photos_src> <database_dest>";

/// photoload — load per-folder album metadata into a relational database
#[derive(Parser, Debug)]
#[command(
    name = "photoload",
    about,
    override_usage = USAGE,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Root of the photo folder tree
    source: PathBuf,
    /// Directory that holds the database file
    destination: PathBuf,
}

/// Exactly two positional paths; anything else, flags included, is `None`.
fn parse_args<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).ok()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let Some(cli) = parse_args(std::env::args_os()) else {
        println!("{USAGE}");
        return Ok(());
    };

    init_tracing();
    let config = IngestConfig::from_env();
    commands::load::run(&cli.source, &cli.destination, config)
}
