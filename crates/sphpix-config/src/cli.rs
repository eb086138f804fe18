//! Command-line overrides shared by the sphpix binaries.

use std::path::PathBuf;

use clap::Args;
use sphpix_index::IndexScheme;

use crate::Config;

/// Global command-line overrides.
///
/// CLI values override settings loaded from `config.ron`. Flatten into a
/// binary's own parser with `#[command(flatten)]`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Resolution: pixels along one edge of a base face.
    #[arg(long, global = true)]
    pub nside: Option<i64>,

    /// Index scheme (xy, ring, nested).
    #[arg(long, global = true)]
    pub scheme: Option<IndexScheme>,

    /// Read and print angles in degrees (true) or radians (false).
    #[arg(long, global = true)]
    pub degrees: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(nside) = args.nside {
            self.grid.nside = nside;
        }
        if let Some(scheme) = args.scheme {
            self.grid.scheme = scheme;
        }
        if let Some(degrees) = args.degrees {
            self.grid.degrees = degrees;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
