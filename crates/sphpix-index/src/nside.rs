//! Validated resolutions and the integer widths pixel indices may use.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::HealpixError;
use crate::resolution::nside_for_side_length_arcmin;

/// An integer type that can hold pixel indices.
///
/// All arithmetic is done in `i64`; values are narrowed to the index type
/// only after they have been checked against [`Nside::npix`], which in turn
/// is bounded by [`PixelIndex::MAX_NSIDE`].
pub trait PixelIndex: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Largest resolution whose pixel arithmetic fits this width.
    const MAX_NSIDE: i64;

    /// Width of the type in bits.
    const BITS: u32;

    /// Widen to `i64`.
    fn to_i64(self) -> i64;

    /// Narrow from `i64`. Only called on values already known to fit.
    fn from_i64(value: i64) -> Self;
}

impl PixelIndex for i32 {
    // Largest n with 12·(n+1)² <= i32::MAX.
    const MAX_NSIDE: i64 = 13_376;
    const BITS: u32 = 32;

    #[inline]
    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn from_i64(value: i64) -> Self {
        debug_assert!(i32::try_from(value).is_ok(), "{value} does not fit i32");
        value as i32
    }
}

impl PixelIndex for i64 {
    const MAX_NSIDE: i64 = 1 << 29;
    const BITS: u32 = 64;

    #[inline]
    fn to_i64(self) -> i64 {
        self
    }

    #[inline]
    fn from_i64(value: i64) -> Self {
        value
    }
}

/// A validated resolution: the number of fine pixels along one edge of a
/// base face.
///
/// The index type `I` is chosen once, here; every operation taking this
/// `Nside` accepts and returns pixel indices of type `I`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nside<I: PixelIndex = i64> {
    value: i64,
    _index: PhantomData<I>,
}

impl<I: PixelIndex> Nside<I> {
    /// Largest resolution accepted for this index width.
    pub const MAX: i64 = I::MAX_NSIDE;

    /// Validate a resolution.
    ///
    /// Fails with [`HealpixError::InvalidResolution`] if `value <= 0` and
    /// with [`HealpixError::Overflow`] if the pixel count would not fit `I`.
    pub fn new(value: I) -> Result<Self, HealpixError> {
        Self::from_i64(value.to_i64())
    }

    pub(crate) fn from_i64(value: i64) -> Result<Self, HealpixError> {
        if value <= 0 {
            tracing::debug!(nside = value, "rejected non-positive resolution");
            return Err(HealpixError::InvalidResolution {
                nside: value,
                requirement: "must be positive",
            });
        }
        if value > I::MAX_NSIDE {
            tracing::debug!(
                nside = value,
                max = I::MAX_NSIDE,
                bits = I::BITS,
                "rejected resolution too large for index width"
            );
            return Err(HealpixError::Overflow {
                nside: value,
                max: I::MAX_NSIDE,
                bits: I::BITS,
            });
        }
        Ok(Self {
            value,
            _index: PhantomData,
        })
    }

    /// The resolution `2^order`.
    pub fn from_order(order: u8) -> Result<Self, HealpixError> {
        if order >= 63 {
            return Err(HealpixError::Overflow {
                nside: i64::MAX,
                max: I::MAX_NSIDE,
                bits: I::BITS,
            });
        }
        Self::from_i64(1_i64 << order)
    }

    /// The resolution whose total pixel count is `npix`.
    pub fn from_npix(npix: I) -> Result<Self, HealpixError> {
        let npix = npix.to_i64();
        if npix <= 0 || npix % 12 != 0 {
            return Err(HealpixError::InvalidPixelCount { npix });
        }
        let per_face = npix / 12;
        let root = per_face.isqrt();
        if root * root != per_face {
            return Err(HealpixError::InvalidPixelCount { npix });
        }
        Self::from_i64(root)
    }

    /// The smallest resolution whose pixels have a side no longer than
    /// `arcmin` arc-minutes.
    pub fn for_side_length_arcmin(arcmin: f64) -> Result<Self, HealpixError> {
        if !(arcmin.is_finite() && arcmin > 0.0) {
            return Err(HealpixError::InvalidResolution {
                nside: 0,
                requirement: "requires a positive, finite side length",
            });
        }
        let exact = nside_for_side_length_arcmin(arcmin).ceil();
        if exact > I::MAX_NSIDE as f64 {
            return Err(HealpixError::Overflow {
                nside: i64::MAX,
                max: I::MAX_NSIDE,
                bits: I::BITS,
            });
        }
        Self::from_i64((exact as i64).max(1))
    }

    /// The resolution as the index type.
    #[must_use]
    pub fn get(self) -> I {
        I::from_i64(self.value)
    }

    /// The resolution widened to `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.value
    }

    /// Number of pixels in one base face, `nside²`.
    #[inline]
    #[must_use]
    pub fn pixels_per_face(self) -> i64 {
        self.value * self.value
    }

    /// Total number of pixels, `12·nside²`.
    #[must_use]
    pub fn npix(self) -> I {
        I::from_i64(self.npix_i64())
    }

    #[inline]
    pub(crate) fn npix_i64(self) -> i64 {
        12 * self.pixels_per_face()
    }

    /// Whether the resolution is a power of two (required by NESTED).
    #[must_use]
    pub fn is_power_of_two(self) -> bool {
        (self.value as u64).is_power_of_two()
    }

    /// `log2(nside)` when the resolution is a power of two.
    #[must_use]
    pub fn order(self) -> Option<u8> {
        self.is_power_of_two()
            .then(|| self.value.trailing_zeros() as u8)
    }

    /// Fail with [`HealpixError::InvalidResolution`] unless the resolution
    /// is a power of two.
    pub fn require_power_of_two(self) -> Result<(), HealpixError> {
        if self.is_power_of_two() {
            Ok(())
        } else {
            tracing::debug!(nside = self.value, "NESTED scheme needs a power-of-two nside");
            Err(HealpixError::InvalidResolution {
                nside: self.value,
                requirement: "must be a power of two for the NESTED scheme",
            })
        }
    }

    /// Check that `pix` lies in `[0, 12·nside²)` and widen it.
    pub fn check_index(self, pix: I) -> Result<i64, HealpixError> {
        let index = pix.to_i64();
        let npix = self.npix_i64();
        if (0..npix).contains(&index) {
            Ok(index)
        } else {
            Err(HealpixError::IndexOutOfRange { index, npix })
        }
    }
}

impl<I: PixelIndex> std::fmt::Display for Nside<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nside={}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        for bad in [0_i64, -1, -64] {
            assert!(matches!(
                Nside::<i64>::new(bad),
                Err(HealpixError::InvalidResolution { .. })
            ));
        }
        assert!(matches!(
            Nside::<i32>::new(0),
            Err(HealpixError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_i32_boundary_is_enforced() {
        let max = Nside::<i32>::new(13_376).expect("largest 32-bit nside");
        let npix = max.npix();
        assert!(npix > 0);
        // One more ring of headroom still fits.
        assert!(12_i64 * 13_377 * 13_377 <= i64::from(i32::MAX));

        assert_eq!(
            Nside::<i32>::new(13_377),
            Err(HealpixError::Overflow {
                nside: 13_377,
                max: 13_376,
                bits: 32
            })
        );
        assert!(Nside::<i64>::new(13_377).is_ok());
    }

    #[test]
    fn test_i64_boundary_is_enforced() {
        assert!(Nside::<i64>::new(1 << 29).is_ok());
        assert!(matches!(
            Nside::<i64>::new((1 << 29) + 1),
            Err(HealpixError::Overflow { bits: 64, .. })
        ));
    }

    #[test]
    fn test_npix_and_face_size() {
        let n = Nside::<i64>::new(4).unwrap();
        assert_eq!(n.npix(), 192);
        assert_eq!(n.pixels_per_face(), 16);
        assert_eq!(n.get(), 4);
        assert_eq!(n.to_string(), "nside=4");
    }

    #[test]
    fn test_power_of_two_and_order() {
        let n = Nside::<i64>::new(16).unwrap();
        assert!(n.is_power_of_two());
        assert_eq!(n.order(), Some(4));
        assert!(n.require_power_of_two().is_ok());

        let n = Nside::<i64>::new(6).unwrap();
        assert!(!n.is_power_of_two());
        assert_eq!(n.order(), None);
        assert!(matches!(
            n.require_power_of_two(),
            Err(HealpixError::InvalidResolution { nside: 6, .. })
        ));
    }

    #[test]
    fn test_from_order() {
        assert_eq!(Nside::<i64>::from_order(0).unwrap().as_i64(), 1);
        assert_eq!(Nside::<i64>::from_order(10).unwrap().as_i64(), 1024);
        assert!(Nside::<i64>::from_order(29).is_ok());
        assert!(Nside::<i64>::from_order(30).is_err());
        assert!(Nside::<i32>::from_order(14).is_err());
        assert!(Nside::<i64>::from_order(200).is_err());
    }

    #[test]
    fn test_from_npix() {
        assert_eq!(Nside::<i64>::from_npix(12).unwrap().as_i64(), 1);
        assert_eq!(Nside::<i64>::from_npix(192).unwrap().as_i64(), 4);
        assert_eq!(Nside::<i32>::from_npix(12 * 9).unwrap().as_i64(), 3);
        for bad in [0, 11, 13, 24, -12] {
            assert!(matches!(
                Nside::<i64>::from_npix(bad),
                Err(HealpixError::InvalidPixelCount { .. })
            ));
        }
    }

    #[test]
    fn test_check_index() {
        let n = Nside::<i32>::new(2).unwrap();
        assert_eq!(n.check_index(0), Ok(0));
        assert_eq!(n.check_index(47), Ok(47));
        assert_eq!(
            n.check_index(48),
            Err(HealpixError::IndexOutOfRange { index: 48, npix: 48 })
        );
        assert!(n.check_index(-1).is_err());
    }

    #[test]
    fn test_for_side_length_arcmin() {
        let n = Nside::<i64>::for_side_length_arcmin(60.0).unwrap();
        assert!(crate::side_length_arcmin(n) <= 60.0);
        let coarser = Nside::<i64>::new(n.as_i64() - 1).unwrap();
        assert!(crate::side_length_arcmin(coarser) > 60.0);

        // Anything larger than a base face collapses to nside 1.
        assert_eq!(
            Nside::<i64>::for_side_length_arcmin(1.0e6).unwrap().as_i64(),
            1
        );
        assert!(Nside::<i64>::for_side_length_arcmin(0.0).is_err());
        assert!(Nside::<i64>::for_side_length_arcmin(f64::NAN).is_err());
        assert!(Nside::<i32>::for_side_length_arcmin(1.0e-6).is_err());
    }
}
