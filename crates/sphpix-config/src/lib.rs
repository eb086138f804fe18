//! Configuration for the sphpix tools.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Missing fields fall back to defaults and unknown fields are
//! ignored, so files written by older or newer versions still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GridConfig};
pub use error::ConfigError;
