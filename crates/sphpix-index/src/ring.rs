//! XY ↔ RING conversion.
//!
//! RING indices run along iso-latitude rings from the north pole to the
//! south pole, and by increasing longitude within a ring:
//!
//! ```text
//!        0       1       2       3
//!      4   5   6   7   8   9  10  11
//!   12  13  14  15  16  17  18  19
//!     20  21  22  23  24  25  26  27
//!   28  29  30  31  32  33  34  35
//!     36  37  38  39  40  41  42  43
//!       44      45      46      47
//! ```
//!
//! (nside 2). Rings are numbered from 1 at the north pole to `4·nside - 1`
//! at the south pole. Rings `r <= nside` hold `4r` pixels, rings
//! `r >= 3·nside` hold `4(4·nside - r)`, and the equatorial belt holds
//! `4·nside` per ring. Pixels 12, 20, 27 and 28 all belong to base face 4,
//! which wraps around longitude zero.

use crate::xy::FacePixel;
use crate::{BaseFace, FaceClass, HealpixError, Nside, PixelIndex};

/// Ring number of a pixel, 1 at the north pole.
#[inline]
pub(crate) fn ring_of(pixel: &FacePixel, nside: i64) -> i64 {
    pixel.face().ring_row_factor() * nside - (pixel.x() + pixel.y()) - 1
}

/// Number of pixels in `ring` at resolution `nside`.
#[inline]
pub(crate) fn ring_len(ring: i64, nside: i64) -> i64 {
    match FaceClass::of_ring(ring, nside) {
        FaceClass::NorthPolar => 4 * ring,
        FaceClass::Equatorial => 4 * nside,
        FaceClass::SouthPolar => 4 * (4 * nside - ring),
    }
}

impl FacePixel {
    pub(crate) fn to_ring_unchecked(&self, nside: i64) -> i64 {
        let ring = ring_of(self, nside);
        let column = i64::from(self.face().column());
        match FaceClass::of_ring(ring, nside) {
            FaceClass::NorthPolar => {
                // Pixels before this ring, then whole faces before this one
                // in the ring, then the position within the face.
                2 * ring * (ring - 1) + column * ring + (nside - 1 - self.y())
            }
            FaceClass::SouthPolar => {
                // Count from the south pole eastwards, then flip.
                let ri = 4 * nside - ring;
                let from_south = 2 * ri * (ri - 1) + (3 - column) * ri + (ri - 1 - self.x());
                12 * nside * nside - 1 - from_south
            }
            FaceClass::Equatorial => {
                let s = (ring - nside) % 2;
                let f2 = self.face().ring_column_factor();
                let h = self.x() - self.y();
                // F2·nside + h + s is always odd; floor division puts face 4's
                // western half at negative longitude, which wraps to the end
                // of the ring.
                let longitude = (f2 * nside + h + s).div_euclid(2).rem_euclid(4 * nside);
                2 * nside * (nside - 1) + 4 * nside * (ring - nside) + longitude
            }
        }
    }

    pub(crate) fn from_ring_unchecked(pix: i64, nside: i64) -> Self {
        let (ring, longitude) = decompose_ring_unchecked(pix, nside);
        match FaceClass::of_ring(ring, nside) {
            FaceClass::NorthPolar => {
                let column = longitude / ring;
                let within = longitude - column * ring;
                let face = BaseFace::in_row(FaceClass::NorthPolar, column as u8);
                let y = nside - 1 - within;
                let v = face.ring_row_factor() * nside - ring - 1;
                Self::from_parts(face, v - y, y)
            }
            FaceClass::SouthPolar => {
                let ri = 4 * nside - ring;
                let column = longitude / ri;
                let within = longitude - column * ri;
                let face = BaseFace::in_row(FaceClass::SouthPolar, column as u8);
                let y = ri - 1 - within;
                let v = face.ring_row_factor() * nside - ring - 1;
                Self::from_parts(face, v - y, y)
            }
            FaceClass::Equatorial => equatorial_from_ring(ring, longitude, nside),
        }
    }
}

/// Where a pixel of the equatorial belt sits relative to the diamond of the
/// nearest equatorial face, decided by two half-ring comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BeltSlot {
    /// Lower half of a north polar face.
    TopRow,
    /// Upper half of a south polar face.
    BottomRow,
    /// Western half of the equatorial face for this panel.
    LeftSide,
    /// Eastern half of the next equatorial face to the east.
    RightSide,
}

fn equatorial_from_ring(ring: i64, longitude: i64, nside: i64) -> FacePixel {
    let panel = longitude / nside;
    let within = longitude % nside;
    let below_left = within < (ring - nside + 1) / 2;
    let above_left = within < (3 * nside - ring + 1) / 2;
    let slot = match (below_left, above_left) {
        (false, true) => BeltSlot::TopRow,
        (true, false) => BeltSlot::BottomRow,
        (true, true) => BeltSlot::LeftSide,
        (false, false) => BeltSlot::RightSide,
    };
    let panel_column = panel as u8;
    let face = match slot {
        BeltSlot::TopRow => BaseFace::in_row(FaceClass::NorthPolar, panel_column),
        BeltSlot::BottomRow => BaseFace::in_row(FaceClass::SouthPolar, panel_column),
        BeltSlot::LeftSide => BaseFace::in_row(FaceClass::Equatorial, panel_column),
        BeltSlot::RightSide => BaseFace::in_row(FaceClass::Equatorial, panel_column + 1),
    };

    // Face 4 straddles longitude zero: its eastern half is stored at the end
    // of the ring, so measure it from -4·nside instead.
    let longitude = if slot == BeltSlot::RightSide && face.index() == 4 {
        longitude - 4 * nside
    } else {
        longitude
    };

    let s = (ring - nside) % 2;
    let v = face.ring_row_factor() * nside - ring - 1;
    let h = 2 * longitude - face.ring_column_factor() * nside - s + 1;
    let x = (v + h) / 2;
    let y = (v - h) / 2;
    debug_assert!(
        v == x + y && h == x - y,
        "inconsistent belt solve: ring {ring}, longitude {longitude}, nside {nside}"
    );
    debug_assert!((0..nside).contains(&x) && (0..nside).contains(&y));
    FacePixel::from_parts(face, x, y)
}

/// Split a RING index into `(ring, longitude index)` without validation.
pub(crate) fn decompose_ring_unchecked(pix: i64, nside: i64) -> (i64, i64) {
    let polar_cap = 2 * nside * (nside - 1);
    let npix = 12 * nside * nside;
    if pix < polar_cap {
        let ring = (1 + (1 + 2 * pix).isqrt()) >> 1;
        (ring, pix - 2 * ring * (ring - 1))
    } else if pix < npix - polar_cap {
        let ip = pix - polar_cap;
        (ip / (4 * nside) + nside, ip % (4 * nside))
    } else {
        let ip = npix - pix;
        let ri = (1 + (2 * ip - 1).isqrt()) >> 1;
        (4 * nside - ri, 4 * ri - (ip - 2 * ri * (ri - 1)))
    }
}

/// Split a RING index into its ring number (1 at the north pole) and its
/// longitude index within that ring (0 at the westernmost pixel).
pub fn decompose_ring<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<(i64, i64), HealpixError> {
    let pix = nside.check_index(pix)?;
    Ok(decompose_ring_unchecked(pix, nside.as_i64()))
}

/// Number of pixels in `ring` (1-based) at `nside`.
pub fn pixels_in_ring<I: PixelIndex>(ring: i64, nside: Nside<I>) -> Result<i64, HealpixError> {
    let n = nside.as_i64();
    if !(1..4 * n).contains(&ring) {
        return Err(HealpixError::RingOutOfRange {
            ring,
            max: 4 * n - 1,
            nside: n,
        });
    }
    Ok(ring_len(ring, n))
}

/// Convert an XY index to the RING scheme.
pub fn xy_to_ring<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
    let pixel = FacePixel::from_xy(pix, nside)?;
    Ok(I::from_i64(pixel.to_ring_unchecked(nside.as_i64())))
}

/// Convert a RING index to the XY scheme.
pub fn ring_to_xy<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
    let pix = nside.check_index(pix)?;
    let n = nside.as_i64();
    Ok(I::from_i64(FacePixel::from_ring_unchecked(pix, n).to_xy_unchecked(n)))
}
