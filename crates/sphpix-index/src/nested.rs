//! XY ↔ NESTED conversion by bit interleaving.
//!
//! Within a face, bit `i` of `x` becomes bit `2i` of the NESTED local index
//! and bit `i` of `y` becomes bit `2i + 1`. Any aligned run of `4^k`
//! consecutive NESTED indices therefore covers a `2^k × 2^k` block of the
//! face, at every level of subdivision.

use crate::xy::FacePixel;
use crate::{HealpixError, Nside, PixelIndex};

/// Spread the low 32 bits of `v` into the even bit positions.
#[inline]
pub(crate) fn spread_bits(v: i64) -> i64 {
    let mut r = (v as u64) & 0xffff_ffff;
    r = (r ^ (r << 16)) & 0x0000_ffff_0000_ffff;
    r = (r ^ (r << 8)) & 0x00ff_00ff_00ff_00ff;
    r = (r ^ (r << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    r = (r ^ (r << 2)) & 0x3333_3333_3333_3333;
    r = (r ^ (r << 1)) & 0x5555_5555_5555_5555;
    r as i64
}

/// Gather the even bit positions of `v` into the low 32 bits.
#[inline]
pub(crate) fn compress_bits(v: i64) -> i64 {
    let mut r = (v as u64) & 0x5555_5555_5555_5555;
    r = (r ^ (r >> 1)) & 0x3333_3333_3333_3333;
    r = (r ^ (r >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    r = (r ^ (r >> 4)) & 0x00ff_00ff_00ff_00ff;
    r = (r ^ (r >> 8)) & 0x0000_ffff_0000_ffff;
    r = (r ^ (r >> 16)) & 0x0000_0000_ffff_ffff;
    r as i64
}

impl FacePixel {
    /// NESTED index of this pixel. `nside` must be a power of two.
    #[inline]
    pub(crate) fn to_nested_unchecked(&self, nside: i64) -> i64 {
        i64::from(self.face().index()) * nside * nside
            + spread_bits(self.x())
            + (spread_bits(self.y()) << 1)
    }

    /// Decode a NESTED index. `nside` must be a power of two.
    #[inline]
    pub(crate) fn from_nested_unchecked(pix: i64, nside: i64) -> Self {
        let per_face = nside * nside;
        let face = crate::BaseFace::from_index((pix / per_face) as u8);
        let local = pix & (per_face - 1);
        Self::from_parts(face, compress_bits(local), compress_bits(local >> 1))
    }
}

/// Convert an XY index to the NESTED scheme.
///
/// Fails with [`HealpixError::InvalidResolution`] unless `nside` is a power
/// of two, and with [`HealpixError::IndexOutOfRange`] for a bad index.
pub fn xy_to_nested<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
    nside.require_power_of_two()?;
    let pixel = FacePixel::from_xy(pix, nside)?;
    Ok(I::from_i64(pixel.to_nested_unchecked(nside.as_i64())))
}

/// Convert a NESTED index to the XY scheme.
pub fn nested_to_xy<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
    nside.require_power_of_two()?;
    let pix = nside.check_index(pix)?;
    let n = nside.as_i64();
    Ok(I::from_i64(
        FacePixel::from_nested_unchecked(pix, n).to_xy_unchecked(n),
    ))
}
