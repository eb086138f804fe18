//! Hierarchical equal-area pixelization of the sphere: XY, RING and NESTED
//! indices, pixel ↔ point geometry, neighbours, and resolution helpers.
//!
//! The sphere is split into twelve base faces, each subdivided into
//! `nside × nside` pixels of equal area. Pick a resolution once as an
//! [`Nside`] and pass it to every call; the index width (`i32` or `i64`) is
//! fixed by its type parameter.

mod base_face;
mod error;
mod geometry;
mod neighbor;
mod nested;
mod nside;
mod resolution;
mod ring;
mod scheme;
mod xy;

pub use base_face::{BaseFace, FaceClass};
pub use error::{HealpixError, ParseNameError};
pub use geometry::{
    LocatedPixel, angular_distance, pixel_center, pixel_to_point, pixel_to_radec,
    pixel_to_radec_deg, point_to_pixel, point_to_radec, point_to_radec_deg, radec_deg_to_pixel,
    radec_deg_to_point, radec_to_pixel, radec_to_point,
};
pub use neighbor::{
    Direction, Neighbours, base_neighbour, directional_neighbours, neighbour, neighbours_xy,
};
pub use nested::{nested_to_xy, xy_to_nested};
pub use nside::{Nside, PixelIndex};
pub use resolution::{
    convert_resolution, nside_for_side_length_arcmin, pixel_area_sq_deg, pixel_area_steradians,
    side_length_arcmin,
};
pub use ring::{decompose_ring, pixels_in_ring, ring_to_xy, xy_to_ring};
pub use scheme::{IndexScheme, convert_index, nested_to_ring, ring_to_nested};
pub use xy::{FacePixel, compose_xy, decompose_xy};

/// Re-exported so callers can name points without depending on `glam`.
pub use glam::DVec3;
