//! The twelve base faces of the pixelization and their latitude classes.

use crate::HealpixError;

/// Latitude class of a base face.
///
/// Also names the three latitude bands a ring can fall in: the north polar
/// cap, the equatorial belt and the south polar cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceClass {
    /// Faces 0–3, meeting at the north pole.
    NorthPolar,
    /// Faces 4–7, centred on the equator.
    Equatorial,
    /// Faces 8–11, meeting at the south pole.
    SouthPolar,
}

impl FaceClass {
    /// The band containing `ring` at resolution `nside`.
    ///
    /// Rings `1..=nside` form the north cap, `3·nside..4·nside` the south
    /// cap, and everything in between the equatorial belt.
    #[inline]
    #[must_use]
    pub(crate) fn of_ring(ring: i64, nside: i64) -> FaceClass {
        debug_assert!((1..4 * nside).contains(&ring), "ring {ring} out of range");
        if ring <= nside {
            FaceClass::NorthPolar
        } else if ring >= 3 * nside {
            FaceClass::SouthPolar
        } else {
            FaceClass::Equatorial
        }
    }
}

const FACE_CLASS: [FaceClass; 12] = [
    FaceClass::NorthPolar,
    FaceClass::NorthPolar,
    FaceClass::NorthPolar,
    FaceClass::NorthPolar,
    FaceClass::Equatorial,
    FaceClass::Equatorial,
    FaceClass::Equatorial,
    FaceClass::Equatorial,
    FaceClass::SouthPolar,
    FaceClass::SouthPolar,
    FaceClass::SouthPolar,
    FaceClass::SouthPolar,
];

/// One of the twelve top-level pixels.
///
/// Faces are numbered row by row from north to south, and within a row by
/// increasing longitude: `0..4` north polar, `4..8` equatorial, `8..12`
/// south polar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseFace(u8);

impl BaseFace {
    /// Number of base faces.
    pub const COUNT: usize = 12;

    /// All twelve faces in index order.
    pub const ALL: [BaseFace; 12] = [
        BaseFace(0),
        BaseFace(1),
        BaseFace(2),
        BaseFace(3),
        BaseFace(4),
        BaseFace(5),
        BaseFace(6),
        BaseFace(7),
        BaseFace(8),
        BaseFace(9),
        BaseFace(10),
        BaseFace(11),
    ];

    /// Validate a face index.
    pub fn new(index: i64) -> Result<Self, HealpixError> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < Self::COUNT)
            .map(BaseFace)
            .ok_or(HealpixError::InvalidFace { face: index })
    }

    /// Build from an index the caller has already bounded to `0..12`.
    #[inline]
    pub(crate) const fn from_index(index: u8) -> Self {
        debug_assert!(index < 12);
        BaseFace(index)
    }

    /// Face index in `0..12`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Latitude class of this face.
    #[inline]
    #[must_use]
    pub fn class(self) -> FaceClass {
        FACE_CLASS[usize::from(self.0)]
    }

    /// Row of the face: 0 north, 1 equatorial, 2 south.
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / 4
    }

    /// Position of the face within its row, increasing with longitude.
    #[inline]
    #[must_use]
    pub const fn column(self) -> u8 {
        self.0 % 4
    }

    /// Face in `class`'s row at `column` (taken modulo 4).
    #[inline]
    #[must_use]
    pub(crate) const fn in_row(class: FaceClass, column: u8) -> Self {
        let row = match class {
            FaceClass::NorthPolar => 0,
            FaceClass::Equatorial => 4,
            FaceClass::SouthPolar => 8,
        };
        BaseFace(row + column % 4)
    }

    /// `F1` in the ring formulas: the ring just below the face's northern
    /// corner is `F1·nside`.
    #[inline]
    pub(crate) const fn ring_row_factor(self) -> i64 {
        self.row() as i64 + 2
    }

    /// `F2` in the ring formulas: twice the longitude of the face centre in
    /// units of π/4.
    #[inline]
    pub(crate) const fn ring_column_factor(self) -> i64 {
        2 * self.column() as i64 - (self.row() as i64 % 2) + 1
    }
}

impl std::fmt::Display for BaseFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
