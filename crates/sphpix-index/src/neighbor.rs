//! Adjacent pixels across face edges and corners.
//!
//! A step that stays inside the face just moves `(x, y)`. A step off the
//! face looks up the adjacent base face by face class and crossing
//! direction. Polar faces meet each other at the poles with their axes
//! swapped, so crossing a polar face's pole-side edges (the upper edges of
//! a north face, the lower edges of a south face) transposes the local
//! coordinates.
//!
//! Where only three faces meet at a corner, the diagonal step across that
//! corner has no pixel and is omitted, so results hold between six and
//! eight entries.

use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::ParseNameError;
use crate::xy::FacePixel;
use crate::{BaseFace, FaceClass, HealpixError, Nside, PixelIndex};

/// Up to eight neighbour indices, without heap allocation.
pub type Neighbours<I> = SmallVec<[I; 8]>;

/// A compass direction in the local `(x, y)` grid of a face.
///
/// `x` grows towards the north-east and `y` towards the north-west, so the
/// four edge directions are the axis steps and north is `(+1, +1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `(+1, 0)`
    NorthEast,
    /// `(+1, +1)`
    North,
    /// `(0, +1)`
    NorthWest,
    /// `(-1, +1)`
    West,
    /// `(-1, 0)`
    SouthWest,
    /// `(-1, -1)`
    South,
    /// `(0, -1)`
    SouthEast,
    /// `(+1, -1)`
    East,
}

impl Direction {
    /// All eight directions, anticlockwise from north-east.
    pub const ALL: [Direction; 8] = [
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::East,
    ];

    /// Step in local face coordinates.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::NorthEast => (1, 0),
            Direction::North => (1, 1),
            Direction::NorthWest => (0, 1),
            Direction::West => (-1, 1),
            Direction::SouthWest => (-1, 0),
            Direction::South => (-1, -1),
            Direction::SouthEast => (0, -1),
            Direction::East => (1, -1),
        }
    }

    /// Direction for a unit step, or `None` for `(0, 0)` and longer steps.
    #[must_use]
    pub const fn from_offset(dx: i64, dy: i64) -> Option<Direction> {
        match (dx, dy) {
            (1, 0) => Some(Direction::NorthEast),
            (1, 1) => Some(Direction::North),
            (0, 1) => Some(Direction::NorthWest),
            (-1, 1) => Some(Direction::West),
            (-1, 0) => Some(Direction::SouthWest),
            (-1, -1) => Some(Direction::South),
            (0, -1) => Some(Direction::SouthEast),
            (1, -1) => Some(Direction::East),
            _ => None,
        }
    }

    /// The reverse step.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::NorthEast => Direction::SouthWest,
            Direction::North => Direction::South,
            Direction::NorthWest => Direction::SouthEast,
            Direction::West => Direction::East,
            Direction::SouthWest => Direction::NorthEast,
            Direction::South => Direction::North,
            Direction::SouthEast => Direction::NorthWest,
            Direction::East => Direction::West,
        }
    }

    /// Whether the step crosses a pixel edge rather than a corner.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthWest | Direction::SouthEast
        )
    }

    /// Short compass abbreviation, e.g. `"NE"`.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Direction::NorthEast => "NE",
            Direction::North => "N",
            Direction::NorthWest => "NW",
            Direction::West => "W",
            Direction::SouthWest => "SW",
            Direction::South => "S",
            Direction::SouthEast => "SE",
            Direction::East => "E",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Direction {
    type Err = ParseNameError;

    /// Accepts abbreviations (`ne`) and full names (`north-east`,
    /// `northeast`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| {
                let full = format!("{d:?}").to_ascii_lowercase();
                key == d.abbreviation().to_ascii_lowercase() || key == full
            })
            .ok_or_else(|| ParseNameError {
                kind: "direction",
                name: s.to_owned(),
                expected: "ne, n, nw, w, sw, s, se, e",
            })
    }
}

/// Base face across the edge or corner of `face` in direction `toward`.
///
/// Returns `None` for corners where only three faces meet.
#[must_use]
pub fn base_neighbour(face: BaseFace, toward: Direction) -> Option<BaseFace> {
    use Direction as D;
    use FaceClass::{Equatorial, NorthPolar, SouthPolar};

    let column = face.column();
    let (class, column) = match (face.class(), toward) {
        (NorthPolar, D::NorthEast) => (NorthPolar, column + 1),
        (NorthPolar, D::North) => (NorthPolar, column + 2),
        (NorthPolar, D::NorthWest) => (NorthPolar, column + 3),
        (NorthPolar, D::SouthWest) => (Equatorial, column),
        (NorthPolar, D::South) => (SouthPolar, column),
        (NorthPolar, D::SouthEast) => (Equatorial, column + 1),
        (NorthPolar, D::East | D::West) => return None,

        (Equatorial, D::NorthEast) => (NorthPolar, column),
        (Equatorial, D::NorthWest) => (NorthPolar, column + 3),
        (Equatorial, D::SouthWest) => (SouthPolar, column + 3),
        (Equatorial, D::SouthEast) => (SouthPolar, column),
        (Equatorial, D::East) => (Equatorial, column + 1),
        (Equatorial, D::West) => (Equatorial, column + 3),
        (Equatorial, D::North | D::South) => return None,

        (SouthPolar, D::NorthEast) => (Equatorial, column + 1),
        (SouthPolar, D::North) => (NorthPolar, column),
        (SouthPolar, D::NorthWest) => (Equatorial, column),
        (SouthPolar, D::SouthWest) => (SouthPolar, column + 3),
        (SouthPolar, D::South) => (SouthPolar, column + 2),
        (SouthPolar, D::SouthEast) => (SouthPolar, column + 1),
        (SouthPolar, D::East | D::West) => return None,
    };
    Some(BaseFace::in_row(class, column))
}

/// -1 below the face, +1 above it, 0 inside.
#[inline]
fn crossing(v: i64, nside: i64) -> i64 {
    if v < 0 {
        -1
    } else if v >= nside {
        1
    } else {
        0
    }
}

impl FacePixel {
    pub(crate) fn step_unchecked(&self, direction: Direction, nside: i64) -> Option<FacePixel> {
        let (dx, dy) = direction.offset();
        let (x, y) = (self.x() + dx, self.y() + dy);
        let (cross_x, cross_y) = (crossing(x, nside), crossing(y, nside));
        if cross_x == 0 && cross_y == 0 {
            return Some(FacePixel::from_parts(self.face(), x, y));
        }

        let toward = Direction::from_offset(cross_x, cross_y)?;
        let face = base_neighbour(self.face(), toward)?;
        let (mut nx, mut ny) = (x.rem_euclid(nside), y.rem_euclid(nside));

        let transpose = match self.face().class() {
            FaceClass::NorthPolar => cross_x > 0 || cross_y > 0,
            FaceClass::SouthPolar => cross_x < 0 || cross_y < 0,
            FaceClass::Equatorial => false,
        };
        if transpose {
            // The crossed coordinate runs along the shared edge on the far side.
            if cross_x != 0 {
                nx = self.x();
            }
            if cross_y != 0 {
                ny = self.y();
            }
            (nx, ny) = (ny, nx);
        }
        Some(FacePixel::from_parts(face, nx, ny))
    }

    /// The pixel one step away in `direction`, if there is one.
    ///
    /// `self` must have been built for `nside`.
    pub fn neighbour<I: PixelIndex>(
        &self,
        direction: Direction,
        nside: Nside<I>,
    ) -> Result<Option<FacePixel>, HealpixError> {
        let checked = FacePixel::new(self.face(), self.x(), self.y(), nside)?;
        Ok(checked.step_unchecked(direction, nside.as_i64()))
    }

    /// Every existing neighbour with the direction it lies in.
    pub fn neighbours<I: PixelIndex>(
        &self,
        nside: Nside<I>,
    ) -> Result<SmallVec<[(Direction, FacePixel); 8]>, HealpixError> {
        let checked = FacePixel::new(self.face(), self.x(), self.y(), nside)?;
        Ok(checked.neighbours_unchecked(nside.as_i64()))
    }

    pub(crate) fn neighbours_unchecked(&self, nside: i64) -> SmallVec<[(Direction, FacePixel); 8]> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.step_unchecked(d, nside).map(|p| (d, p)))
            .collect()
    }
}

/// XY indices of the pixels adjacent to XY pixel `pix`.
///
/// Ordered as [`Direction::ALL`], with missing corners left out.
pub fn neighbours_xy<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<Neighbours<I>, HealpixError> {
    Ok(directional_neighbours(pix, nside)?
        .into_iter()
        .map(|(_, p)| p)
        .collect())
}

/// XY neighbours of `pix` paired with the direction each lies in.
pub fn directional_neighbours<I: PixelIndex>(
    pix: I,
    nside: Nside<I>,
) -> Result<SmallVec<[(Direction, I); 8]>, HealpixError> {
    let pixel = FacePixel::from_xy(pix, nside)?;
    let n = nside.as_i64();
    Ok(pixel
        .neighbours_unchecked(n)
        .into_iter()
        .map(|(d, p)| (d, I::from_i64(p.to_xy_unchecked(n))))
        .collect())
}

/// XY index of the pixel one step from `pix` in `direction`.
///
/// `Ok(None)` when the step crosses a corner with no pixel behind it.
pub fn neighbour<I: PixelIndex>(
    pix: I,
    direction: Direction,
    nside: Nside<I>,
) -> Result<Option<I>, HealpixError> {
    let pixel = FacePixel::from_xy(pix, nside)?;
    let n = nside.as_i64();
    Ok(pixel
        .step_unchecked(direction, n)
        .map(|p| I::from_i64(p.to_xy_unchecked(n))))
}
