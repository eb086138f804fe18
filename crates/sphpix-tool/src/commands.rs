//! Subcommands of the `sphpix` tool. Each renders its result as text.

use std::fmt::Write as _;

use clap::Subcommand;
use sphpix_config::{ConfigError, GridConfig};
use sphpix_index::{
    Direction, HealpixError, IndexScheme, Nside, convert_resolution, pixel_area_sq_deg,
    pixel_to_point, point_to_pixel, point_to_radec, point_to_radec_deg, radec_deg_to_point,
    radec_to_point, side_length_arcmin,
};
use tracing::debug;

/// Failures reported to the user.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The configuration could not be loaded or is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An index operation rejected its input.
    #[error(transparent)]
    Index(#[from] HealpixError),
}

/// What to compute.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Describe the configured grid.
    Info,

    /// Re-express a pixel index in another scheme.
    Convert {
        /// Pixel index in the configured scheme.
        pix: i64,
        /// Target scheme (xy, ring, nested).
        #[arg(long)]
        to: IndexScheme,
    },

    /// Find the pixel containing a sky position.
    Locate {
        /// Right ascension.
        #[arg(long, allow_negative_numbers = true)]
        ra: f64,
        /// Declination.
        #[arg(long, allow_negative_numbers = true)]
        dec: f64,
    },

    /// Position of a point inside a pixel (its centre by default).
    Center {
        /// Pixel index in the configured scheme.
        pix: i64,
        /// Offset towards the north-east edge, in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        dx: f64,
        /// Offset towards the north-west edge, in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        dy: f64,
    },

    /// List the pixels adjacent to a pixel.
    Neighbours {
        /// Pixel index in the configured scheme.
        pix: i64,
    },

    /// Map a pixel to the pixel containing its centre at another resolution.
    Rescale {
        /// Pixel index in the configured scheme.
        pix: i64,
        /// Target resolution.
        #[arg(long)]
        to_nside: i64,
    },
}

/// Run `command` against the grid described by `grid`.
pub fn run(command: &Command, grid: &GridConfig) -> Result<String, ToolError> {
    let nside = grid.resolution()?;
    let scheme = grid.scheme;
    debug!(%nside, %scheme, ?command, "running command");

    let mut out = String::new();
    match *command {
        Command::Info => {
            let _ = writeln!(out, "{nside} ({scheme})");
            let _ = writeln!(out, "pixels: {}", nside.npix());
            match nside.order() {
                Some(order) => {
                    let _ = writeln!(out, "order: {order}");
                }
                None => {
                    let _ = writeln!(out, "order: none (NESTED unavailable)");
                }
            }
            let _ = writeln!(out, "side: {:.4} arcmin", side_length_arcmin(nside));
            let _ = write!(out, "area: {:.6} sq deg", pixel_area_sq_deg(nside));
        }
        Command::Convert { pix, to } => {
            let converted = sphpix_index::convert_index(pix, scheme, to, nside)?;
            let _ = write!(out, "{converted}");
        }
        Command::Locate { ra, dec } => {
            let point = if grid.degrees {
                radec_deg_to_point(ra, dec)
            } else {
                radec_to_point(ra, dec)
            };
            let hit = point_to_pixel(point, nside)?;
            let pix = scheme.from_xy(hit.pixel, nside)?;
            let _ = write!(out, "{pix} dx={:.6} dy={:.6}", hit.dx, hit.dy);
        }
        Command::Center { pix, dx, dy } => {
            let xy = scheme.to_xy(pix, nside)?;
            let point = pixel_to_point(xy, nside, dx, dy)?;
            let (ra, dec) = if grid.degrees {
                point_to_radec_deg(point)
            } else {
                point_to_radec(point)
            };
            let _ = writeln!(out, "xyz: {:.9} {:.9} {:.9}", point.x, point.y, point.z);
            let _ = write!(out, "ra: {ra:.9} dec: {dec:.9}");
        }
        Command::Neighbours { pix } => {
            let mut lines = Vec::with_capacity(Direction::ALL.len());
            for direction in Direction::ALL {
                if let Some(q) = scheme.neighbour(pix, direction, nside)? {
                    lines.push(format!("{direction}\t{q}"));
                }
            }
            out = lines.join("\n");
        }
        Command::Rescale { pix, to_nside } => {
            let target = Nside::new(to_nside)?;
            let xy = scheme.to_xy(pix, nside)?;
            let moved = convert_resolution(xy, nside, target)?;
            let _ = write!(out, "{}", scheme.from_xy(moved, target)?);
        }
    }
    Ok(out)
}
