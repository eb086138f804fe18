//! Mapping between pixels and points on the unit sphere.
//!
//! Polar caps (`|z| >= 2/3`) use the equal-area quadratic projection; the
//! equatorial belt uses a linear projection of `(z, φ)` onto the diagonal
//! grid of each face. A sub-pixel offset `(dx, dy)` in `[0, 1]²` places a
//! point anywhere inside a pixel: `(0, 0)` is its southern corner, `(1, 1)`
//! its northern corner and `(0.5, 0.5)` its centre.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::DVec3;

use crate::xy::FacePixel;
use crate::{BaseFace, FaceClass, HealpixError, Nside, PixelIndex};

const TWO_THIRDS: f64 = 2.0 / 3.0;
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A pixel containing a point, together with the point's offset inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocatedPixel<I: PixelIndex = i64> {
    /// XY index of the containing pixel.
    pub pixel: I,
    /// Offset towards the north-east edge, in \[0, 1\].
    pub dx: f64,
    /// Offset towards the north-west edge, in \[0, 1\].
    pub dy: f64,
}

/// Longitude in `[0, 2π)` of a direction.
#[inline]
fn longitude(p: DVec3) -> f64 {
    let phi = p.y.atan2(p.x);
    if phi < 0.0 { phi + TAU } else { phi }
}

/// Classify a unit vector into a pixel plus offsets.
fn locate(p: DVec3, nside: i64) -> (FacePixel, f64, f64) {
    let nf = nside as f64;
    let phi = longitude(p);
    let phi_t = phi % FRAC_PI_2;
    let column = (((phi - phi_t) / FRAC_PI_2).round() as i64).rem_euclid(4) as u8;

    let (face, xx, yy) = if p.z.abs() >= TWO_THIRDS {
        let north = p.z >= TWO_THIRDS;
        // 1 − |z| from the distance to the axis; subtracting from z loses it
        // entirely for pixels next to the poles at large nside.
        let one_minus_abs_z = (p.x * p.x + p.y * p.y) / (1.0 + p.z.abs());

        // Distances from the face's polar corner along each axis.
        let root = one_minus_abs_z * 3.0 * (nf * (2.0 * phi_t - PI) / PI).powi(2);
        let kx = if root <= 0.0 { 0.0 } else { root.sqrt() };
        let root = one_minus_abs_z * 3.0 * (nf * 2.0 * phi_t / PI).powi(2);
        let ky = if root <= 0.0 { 0.0 } else { root.sqrt() };

        if north {
            (
                BaseFace::in_row(FaceClass::NorthPolar, column),
                nf - kx,
                nf - ky,
            )
        } else {
            (BaseFace::in_row(FaceClass::SouthPolar, column), ky, kx)
        }
    } else {
        // Project into the unit square z ∈ [-2/3, 2/3], φ_t ∈ [0, π/2], then
        // onto its diagonals, each covering [0, 2].
        let z_units = (p.z + TWO_THIRDS) / (4.0 / 3.0);
        let phi_units = phi_t / FRAC_PI_2;
        let xx = (z_units + phi_units) * nf;
        let yy = (z_units - phi_units + 1.0) * nf;

        // The square is cut by an X into four faces.
        match (xx >= nf, yy >= nf) {
            (true, true) => (
                BaseFace::in_row(FaceClass::NorthPolar, column),
                xx - nf,
                yy - nf,
            ),
            (true, false) => (
                BaseFace::in_row(FaceClass::Equatorial, column + 1),
                xx - nf,
                yy,
            ),
            (false, true) => (
                BaseFace::in_row(FaceClass::Equatorial, column),
                xx,
                yy - nf,
            ),
            (false, false) => (BaseFace::in_row(FaceClass::SouthPolar, column), xx, yy),
        }
    };

    let x = xx.floor().clamp(0.0, nf - 1.0);
    let y = yy.floor().clamp(0.0, nf - 1.0);
    let dx = (xx - x).clamp(0.0, 1.0);
    let dy = (yy - y).clamp(0.0, 1.0);
    (FacePixel::from_parts(face, x as i64, y as i64), dx, dy)
}

/// Position on the unit sphere of offset `(dx, dy)` within `pixel`.
fn face_point(pixel: &FacePixel, nside: i64, dx: f64, dy: f64) -> DVec3 {
    let nf = nside as f64;
    let face = pixel.face();
    let column = f64::from(face.column());
    let mut x = pixel.x() as f64 + dx;
    let mut y = pixel.y() as f64 + dy;

    let class = face.class();
    let in_cap = match class {
        FaceClass::NorthPolar => x + y > nf,
        FaceClass::SouthPolar => x + y < nf,
        FaceClass::Equatorial => false,
    };

    let (z, radius, phi) = if in_cap {
        let south = class == FaceClass::SouthPolar;
        if south {
            // Mirror onto the northern layout.
            (x, y) = (nf - y, nf - x);
        }

        // Invert the quadratic projection: the two corner distances fix φ_t,
        // and either one then fixes z.
        let phi_t = if x == nf && y == nf {
            0.0
        } else {
            PI * (nf - y) / (2.0 * ((nf - x) + (nf - y)))
        };
        let vv = if phi_t < FRAC_PI_4 {
            (PI * (nf - x) / ((2.0 * phi_t - PI) * nf) / SQRT_3).abs()
        } else {
            (PI * (nf - y) / (2.0 * phi_t * nf) / SQRT_3).abs()
        };
        let z = (1.0 - vv) * (1.0 + vv);
        let radius = (1.0 + z).sqrt() * vv;
        let z = if south { -z } else { z };
        (z, radius, FRAC_PI_2 * column + phi_t)
    } else {
        let (z_offset, phi_offset) = match class {
            FaceClass::NorthPolar => (0.0, 1.0),
            FaceClass::Equatorial => (-1.0, 0.0),
            FaceClass::SouthPolar => (-2.0, 1.0),
        };
        x /= nf;
        y /= nf;
        let z = TWO_THIRDS * (x + y + z_offset);
        let phi = FRAC_PI_4 * (x - y + phi_offset + 2.0 * column);
        (z, (1.0 - z * z).max(0.0).sqrt(), phi)
    };

    let phi = if phi < 0.0 { phi + TAU } else { phi };
    DVec3::new(radius * phi.cos(), radius * phi.sin(), z)
}

fn check_offset(dx: f64, dy: f64) -> Result<(), HealpixError> {
    let valid = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if valid(dx) && valid(dy) {
        Ok(())
    } else {
        Err(HealpixError::InvalidOffset { dx, dy })
    }
}

fn unit(point: DVec3) -> Result<DVec3, HealpixError> {
    let len = point.length();
    if len.is_finite() && len > 0.0 {
        Ok(point / len)
    } else {
        Err(HealpixError::DegeneratePoint)
    }
}

/// Find the XY pixel containing `point`, and the point's offset inside it.
///
/// `point` need not be unit length but must be finite and non-zero.
pub fn point_to_pixel<I: PixelIndex>(
    point: DVec3,
    nside: Nside<I>,
) -> Result<LocatedPixel<I>, HealpixError> {
    let p = unit(point)?;
    let n = nside.as_i64();
    let (pixel, dx, dy) = locate(p, n);
    Ok(LocatedPixel {
        pixel: I::from_i64(pixel.to_xy_unchecked(n)),
        dx,
        dy,
    })
}

/// Unit-sphere position of offset `(dx, dy)` inside XY pixel `pix`.
pub fn pixel_to_point<I: PixelIndex>(
    pix: I,
    nside: Nside<I>,
    dx: f64,
    dy: f64,
) -> Result<DVec3, HealpixError> {
    check_offset(dx, dy)?;
    let pixel = FacePixel::from_xy(pix, nside)?;
    Ok(face_point(&pixel, nside.as_i64(), dx, dy))
}

/// Unit-sphere position of the centre of XY pixel `pix`.
pub fn pixel_center<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<DVec3, HealpixError> {
    pixel_to_point(pix, nside, 0.5, 0.5)
}

/// Unit vector for right ascension `ra` and declination `dec`, in radians.
#[must_use]
pub fn radec_to_point(ra: f64, dec: f64) -> DVec3 {
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_ra, cos_ra) = ra.sin_cos();
    DVec3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Right ascension in `[0, 2π)` and declination in `[-π/2, π/2]` of a
/// direction, in radians.
#[must_use]
pub fn point_to_radec(point: DVec3) -> (f64, f64) {
    let dec = point.z.atan2(point.x.hypot(point.y));
    (longitude(point), dec)
}

/// [`radec_to_point`] with angles in degrees.
#[must_use]
pub fn radec_deg_to_point(ra_deg: f64, dec_deg: f64) -> DVec3 {
    radec_to_point(ra_deg.to_radians(), dec_deg.to_radians())
}

/// [`point_to_radec`] with angles in degrees.
#[must_use]
pub fn point_to_radec_deg(point: DVec3) -> (f64, f64) {
    let (ra, dec) = point_to_radec(point);
    (ra.to_degrees(), dec.to_degrees())
}

/// XY pixel containing the direction `(ra, dec)`, in radians.
pub fn radec_to_pixel<I: PixelIndex>(
    ra: f64,
    dec: f64,
    nside: Nside<I>,
) -> Result<I, HealpixError> {
    point_to_pixel(radec_to_point(ra, dec), nside).map(|hit| hit.pixel)
}

/// [`radec_to_pixel`] with angles in degrees.
pub fn radec_deg_to_pixel<I: PixelIndex>(
    ra_deg: f64,
    dec_deg: f64,
    nside: Nside<I>,
) -> Result<I, HealpixError> {
    radec_to_pixel(ra_deg.to_radians(), dec_deg.to_radians(), nside)
}

/// `(ra, dec)` in radians of offset `(dx, dy)` inside XY pixel `pix`.
pub fn pixel_to_radec<I: PixelIndex>(
    pix: I,
    nside: Nside<I>,
    dx: f64,
    dy: f64,
) -> Result<(f64, f64), HealpixError> {
    pixel_to_point(pix, nside, dx, dy).map(point_to_radec)
}

/// [`pixel_to_radec`] with angles in degrees.
pub fn pixel_to_radec_deg<I: PixelIndex>(
    pix: I,
    nside: Nside<I>,
    dx: f64,
    dy: f64,
) -> Result<(f64, f64), HealpixError> {
    pixel_to_point(pix, nside, dx, dy).map(point_to_radec_deg)
}

/// Angle in radians between two directions.
///
/// Uses `atan2(|a × b|, a · b)`, which stays accurate for nearly parallel
/// and nearly opposite vectors where `acos` does not.
#[must_use]
pub fn angular_distance(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn nside(n: i64) -> Nside<i64> {
        Nside::new(n).unwrap()
    }

    #[test]
    fn test_centres_roundtrip_nside_4() {
        let n = nside(4);
        assert_eq!(n.npix(), 192);
        for pix in 0..n.npix() {
            let centre = pixel_center(pix, n).unwrap();
            let hit = point_to_pixel(centre, n).unwrap();
            assert_eq!(hit.pixel, pix, "centre of {pix} located in {}", hit.pixel);
        }
    }

    #[test]
    fn test_polar_face_corners_roundtrip_at_high_resolution() {
        let faces = [0, 1, 2, 3, 8, 9, 10, 11];
        let offsets = [(0.5, 0.5), (0.2, 0.8), (0.8, 0.2)];
        for order in [2_u8, 10, 20, 26, 27, 28, 29] {
            let ns = Nside::<i64>::from_order(order).unwrap();
            let n = ns.get();
            let corners = [
                (n - 1, n - 1),
                (n - 2, n - 1),
                (n - 1, n - 2),
                (n - 2, n - 2),
                (0, 0),
                (1, 0),
                (0, 1),
                (1, 1),
                (n - 1, 0),
                (0, n - 1),
            ];
            for face in faces {
                for &(x, y) in &corners {
                    let pix = crate::compose_xy(face, x, y, ns).unwrap();
                    for &(dx, dy) in &offsets {
                        let p = pixel_to_point(pix, ns, dx, dy).unwrap();
                        let hit = point_to_pixel(p, ns).unwrap();
                        assert_eq!(
                            hit.pixel, pix,
                            "order {order} face {face} ({x}, {y}) offset ({dx}, {dy})"
                        );
                    }
                }
            }
        }
        assert_eq!(Nside::<i64>::from_order(29).unwrap().get(), Nside::<i64>::MAX);
    }

    #[test]
    fn test_pole_adjacent_offsets_survive_max_resolution() {
        let ns = Nside::<i64>::new(Nside::<i64>::MAX).unwrap();
        let n = ns.get();
        let pix = crate::compose_xy(0, n - 1, n - 1, ns).unwrap();
        let p = pixel_to_point(pix, ns, 0.25, 0.75).unwrap();
        let hit = point_to_pixel(p, ns).unwrap();
        assert_eq!(hit.pixel, pix);
        assert!((hit.dx - 0.25).abs() < 1e-3, "dx {}", hit.dx);
        assert!((hit.dy - 0.75).abs() < 1e-3, "dy {}", hit.dy);
    }

    #[test]
    fn test_first_face_centre_is_northern() {
        let p = pixel_to_point(0, nside(1), 0.5, 0.5).unwrap();
        assert!(p.z > 0.0);
        assert!((p.z - TWO_THIRDS).abs() < EPSILON);
    }

    #[test]
    fn test_points_are_unit_length() {
        let n = nside(3);
        for pix in 0..n.npix() {
            for &(dx, dy) in &[(0.0, 0.0), (1.0, 1.0), (0.3, 0.9), (1.0, 0.0), (0.5, 0.5)] {
                let p = pixel_to_point(pix, n, dx, dy).unwrap();
                assert!(
                    (p.length() - 1.0).abs() < EPSILON,
                    "pixel {pix} ({dx}, {dy}) has length {}",
                    p.length()
                );
            }
        }
    }

    #[test]
    fn test_interior_offsets_recovered() {
        for n in [1, 2, 5, 8] {
            let ns = nside(n);
            for pix in 0..ns.npix() {
                for &(dx, dy) in &[(0.25, 0.75), (0.9, 0.1), (0.01, 0.02), (0.6, 0.6)] {
                    let p = pixel_to_point(pix, ns, dx, dy).unwrap();
                    let hit = point_to_pixel(p, ns).unwrap();
                    assert_eq!(hit.pixel, pix, "nside {n} pixel {pix} ({dx}, {dy})");
                    assert!((hit.dx - dx).abs() < 1e-6, "dx {} vs {dx}", hit.dx);
                    assert!((hit.dy - dy).abs() < 1e-6, "dy {} vs {dy}", hit.dy);
                }
            }
        }
    }

    #[test]
    fn test_face_corners() {
        let n = nside(1);
        // Southern corner of face 0 sits on the equator at φ = π/4.
        let p = pixel_to_point(0, n, 0.0, 0.0).unwrap();
        assert!(p.z.abs() < EPSILON);
        assert!((longitude(p) - FRAC_PI_4).abs() < EPSILON);

        // Northern corner of face 0 is the north pole.
        let p = pixel_to_point(0, n, 1.0, 1.0).unwrap();
        assert!((p.z - 1.0).abs() < EPSILON);

        // Southern corner of face 8 is the south pole.
        let p = pixel_to_point(8, n, 0.0, 0.0).unwrap();
        assert!((p.z + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_poles_and_equator_land_in_expected_faces() {
        let n = nside(8);
        let north = point_to_pixel(DVec3::Z, n).unwrap();
        let face = FacePixel::from_xy(north.pixel, n).unwrap().face();
        assert_eq!(face.class(), FaceClass::NorthPolar);

        let south = point_to_pixel(DVec3::NEG_Z, n).unwrap();
        let face = FacePixel::from_xy(south.pixel, n).unwrap().face();
        assert_eq!(face.class(), FaceClass::SouthPolar);

        let equator = point_to_pixel(DVec3::X, n).unwrap();
        let face = FacePixel::from_xy(equator.pixel, n).unwrap().face();
        assert_eq!(face.index(), 4);

        let equator = point_to_pixel(DVec3::Y, n).unwrap();
        let face = FacePixel::from_xy(equator.pixel, n).unwrap().face();
        assert_eq!(face.index(), 5);
    }

    #[test]
    fn test_unnormalised_input_is_accepted() {
        let n = nside(4);
        let p = pixel_center(77, n).unwrap();
        assert_eq!(point_to_pixel(p * 42.0, n).unwrap().pixel, 77);
    }

    #[test]
    fn test_degenerate_points_rejected() {
        let n = nside(4);
        assert_eq!(
            point_to_pixel(DVec3::ZERO, n),
            Err(HealpixError::DegeneratePoint)
        );
        assert_eq!(
            point_to_pixel(DVec3::new(f64::NAN, 0.0, 1.0), n),
            Err(HealpixError::DegeneratePoint)
        );
        assert_eq!(
            point_to_pixel(DVec3::new(f64::INFINITY, 0.0, 0.0), n),
            Err(HealpixError::DegeneratePoint)
        );
    }

    #[test]
    fn test_invalid_offsets_rejected() {
        let n = nside(2);
        for (dx, dy) in [(-0.1, 0.5), (0.5, 1.5), (f64::NAN, 0.5)] {
            assert!(matches!(
                pixel_to_point(0, n, dx, dy),
                Err(HealpixError::InvalidOffset { .. })
            ));
        }
        assert!(matches!(
            pixel_to_point(48, n, 0.5, 0.5),
            Err(HealpixError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_radec_roundtrip() {
        for &(ra, dec) in &[(0.0, 0.0), (1.0, 0.5), (3.0, -1.2), (6.0, 1.5), (4.5, -0.1)] {
            let p = radec_to_point(ra, dec);
            assert!((p.length() - 1.0).abs() < EPSILON);
            let (ra2, dec2) = point_to_radec(p);
            assert!((ra - ra2).abs() < EPSILON, "ra {ra} -> {ra2}");
            assert!((dec - dec2).abs() < EPSILON, "dec {dec} -> {dec2}");
        }
    }

    #[test]
    fn test_radec_degrees() {
        let p = radec_deg_to_point(90.0, 0.0);
        assert!((p - DVec3::Y).length() < EPSILON);
        let (ra, dec) = point_to_radec_deg(DVec3::new(0.0, -1.0, 0.0));
        assert!((ra - 270.0).abs() < EPSILON);
        assert!(dec.abs() < EPSILON);
        let (_, dec) = point_to_radec_deg(DVec3::Z);
        assert!((dec - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_radec_pixel_wrappers_agree() {
        let n = nside(16);
        let (ra, dec) = pixel_to_radec(1234, n, 0.5, 0.5).unwrap();
        assert_eq!(radec_to_pixel(ra, dec, n), Ok(1234));
        let (ra_deg, dec_deg) = pixel_to_radec_deg(1234, n, 0.5, 0.5).unwrap();
        assert!((ra_deg - ra.to_degrees()).abs() < EPSILON);
        assert_eq!(radec_deg_to_pixel(ra_deg, dec_deg, n), Ok(1234));
    }

    #[test]
    fn test_angular_distance() {
        assert!(angular_distance(DVec3::X, DVec3::X).abs() < EPSILON);
        assert!((angular_distance(DVec3::X, DVec3::Y) - FRAC_PI_2).abs() < EPSILON);
        assert!((angular_distance(DVec3::X, DVec3::NEG_X) - PI).abs() < EPSILON);
        let tiny = radec_to_point(1e-9, 0.0);
        assert!((angular_distance(DVec3::X, tiny) - 1e-9).abs() < 1e-15);
    }

    #[test]
    fn test_i32_indices() {
        let n = Nside::<i32>::new(64).unwrap();
        let centre = pixel_center(40_000_i32, n).unwrap();
        assert_eq!(point_to_pixel(centre, n).unwrap().pixel, 40_000_i32);
    }
}
