//! Moving between resolutions, and sizing helpers.

use std::f64::consts::PI;

use crate::xy::FacePixel;
use crate::{HealpixError, Nside, PixelIndex};

const ARCMIN_PER_RADIAN: f64 = 10_800.0 / PI;
const SQ_DEG_PER_STERADIAN: f64 = (180.0 / PI) * (180.0 / PI);
const SPHERE_STERADIANS: f64 = 4.0 * PI;

/// Map an XY pixel to the XY pixel at `out_nside` containing its centre.
///
/// Both resolutions share the index type. Going coarser, every fine pixel
/// of a coarse block maps to that block; going finer, the result is the
/// fine pixel under the coarse pixel's centre.
pub fn convert_resolution<I: PixelIndex>(
    pix: I,
    nside: Nside<I>,
    out_nside: Nside<I>,
) -> Result<I, HealpixError> {
    let pixel = FacePixel::from_xy(pix, nside)?;
    let (n, out) = (nside.as_i64() as f64, out_nside.as_i64());
    let rescale = |v: i64| (((v as f64 + 0.5) / n * out as f64).floor() as i64).clamp(0, out - 1);
    let moved = FacePixel::from_parts(pixel.face(), rescale(pixel.x()), rescale(pixel.y()));
    Ok(I::from_i64(moved.to_xy_unchecked(out)))
}

/// Nominal side length of a pixel, in arc-minutes: the square root of its
/// solid angle.
#[must_use]
pub fn side_length_arcmin<I: PixelIndex>(nside: Nside<I>) -> f64 {
    pixel_area_steradians(nside).sqrt() * ARCMIN_PER_RADIAN
}

/// Resolution (fractional) whose pixels have a side of `arcmin`.
///
/// Round up and pass to [`Nside::new`], or use
/// [`Nside::for_side_length_arcmin`], to get a usable resolution.
#[must_use]
pub fn nside_for_side_length_arcmin(arcmin: f64) -> f64 {
    (SPHERE_STERADIANS * ARCMIN_PER_RADIAN * ARCMIN_PER_RADIAN / (12.0 * arcmin * arcmin)).sqrt()
}

/// Solid angle of one pixel, in steradians.
#[must_use]
pub fn pixel_area_steradians<I: PixelIndex>(nside: Nside<I>) -> f64 {
    SPHERE_STERADIANS / nside.npix_i64() as f64
}

/// Solid angle of one pixel, in square degrees.
#[must_use]
pub fn pixel_area_sq_deg<I: PixelIndex>(nside: Nside<I>) -> f64 {
    pixel_area_steradians(nside) * SQ_DEG_PER_STERADIAN
}
