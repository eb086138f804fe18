//! Command-line front end to the pixelization library.
//!
//! Grid settings are loaded from `config.ron` and can be overridden with the
//! global flags, e.g. `sphpix --nside 64 --scheme ring neighbours 1000`.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sphpix_config::{CliArgs, Config};
use tracing::{error, info};

use crate::commands::Command;

/// Pixel index conversions, geometry and neighbours on the sphere.
#[derive(Parser, Debug)]
#[command(name = "sphpix", version)]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

fn config_dir(args: &CliArgs) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("sphpix")))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load or create config, then apply CLI overrides
    let config_dir = config_dir(&cli.args);
    let mut config = match config_dir.as_deref() {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&cli.args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    sphpix_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    info!(
        nside = config.grid.nside,
        scheme = %config.grid.scheme,
        "sphpix starting"
    );

    match commands::run(&cli.command, &config.grid) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
