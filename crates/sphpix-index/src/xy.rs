//! The XY scheme: a base face plus Cartesian coordinates within it.
//!
//! Within a face, `x` increases towards the north-east edge and `y` towards
//! the north-west edge, so `(0, 0)` is the southernmost pixel and
//! `(nside-1, nside-1)` the northernmost. The linear XY index is
//! `face·nside² + x·nside + y`. Every other scheme converts through this one.

use crate::{BaseFace, HealpixError, Nside, PixelIndex};

/// A fine pixel addressed by its base face and local coordinates.
///
/// Coordinates are only meaningful relative to a resolution; construct with
/// [`FacePixel::new`] to check them against one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacePixel {
    face: BaseFace,
    x: i64,
    y: i64,
}

impl FacePixel {
    /// Construct a `FacePixel`, validating `x` and `y` against `nside`.
    pub fn new<I: PixelIndex>(
        face: BaseFace,
        x: i64,
        y: i64,
        nside: Nside<I>,
    ) -> Result<Self, HealpixError> {
        let n = nside.as_i64();
        if !(0..n).contains(&x) || !(0..n).contains(&y) {
            return Err(HealpixError::CoordinateOutOfRange { x, y, nside: n });
        }
        Ok(Self { face, x, y })
    }

    /// Construct from coordinates the caller has already bounded.
    #[inline]
    pub(crate) fn from_parts(face: BaseFace, x: i64, y: i64) -> Self {
        Self { face, x, y }
    }

    /// The base face.
    #[inline]
    #[must_use]
    pub fn face(&self) -> BaseFace {
        self.face
    }

    /// Local coordinate towards the north-east edge.
    #[inline]
    #[must_use]
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Local coordinate towards the north-west edge.
    #[inline]
    #[must_use]
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Decompose an XY index.
    pub fn from_xy<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<Self, HealpixError> {
        let pix = nside.check_index(pix)?;
        Ok(Self::from_xy_unchecked(pix, nside.as_i64()))
    }

    /// The XY index of this pixel at `nside`.
    ///
    /// Fails if the coordinates do not fit `nside` (the pixel was built for
    /// a finer resolution).
    pub fn to_xy<I: PixelIndex>(&self, nside: Nside<I>) -> Result<I, HealpixError> {
        let checked = Self::new(self.face, self.x, self.y, nside)?;
        Ok(I::from_i64(checked.to_xy_unchecked(nside.as_i64())))
    }

    #[inline]
    pub(crate) fn from_xy_unchecked(pix: i64, nside: i64) -> Self {
        let per_face = nside * nside;
        let face = BaseFace::from_index((pix / per_face) as u8);
        let local = pix % per_face;
        Self {
            face,
            x: local / nside,
            y: local % nside,
        }
    }

    #[inline]
    pub(crate) fn to_xy_unchecked(&self, nside: i64) -> i64 {
        debug_assert!((0..nside).contains(&self.x) && (0..nside).contains(&self.y));
        (i64::from(self.face.index()) * nside + self.x) * nside + self.y
    }
}

impl std::fmt::Display for FacePixel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(face={}, x={}, y={})", self.face, self.x, self.y)
    }
}

/// Compose an XY index from a base face and local coordinates.
///
/// Fails with [`HealpixError::InvalidFace`] if `face` is outside `0..12` and
/// with [`HealpixError::CoordinateOutOfRange`] if `x` or `y` is outside
/// `0..nside`.
pub fn compose_xy<I: PixelIndex>(
    face: i64,
    x: i64,
    y: i64,
    nside: Nside<I>,
) -> Result<I, HealpixError> {
    let face = BaseFace::new(face)?;
    let pixel = FacePixel::new(face, x, y, nside)?;
    Ok(I::from_i64(pixel.to_xy_unchecked(nside.as_i64())))
}

/// Split an XY index into its base face and local coordinates.
pub fn decompose_xy<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<FacePixel, HealpixError> {
    FacePixel::from_xy(pix, nside)
}
