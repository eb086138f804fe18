//! Index schemes as values, so callers can pick one at runtime.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;
use crate::neighbor::{Direction, Neighbours};
use crate::xy::FacePixel;
use crate::{HealpixError, Nside, PixelIndex};

/// One of the three orderings of the pixel set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexScheme {
    /// Face-major, then `x`, then `y`.
    Xy,
    /// By ring from north to south, then by longitude.
    Ring,
    /// Bit-interleaved within each face. Needs a power-of-two nside.
    #[default]
    Nested,
}

impl IndexScheme {
    /// All schemes.
    pub const ALL: [IndexScheme; 3] = [IndexScheme::Xy, IndexScheme::Ring, IndexScheme::Nested];

    /// Lower-case name, as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            IndexScheme::Xy => "xy",
            IndexScheme::Ring => "ring",
            IndexScheme::Nested => "nested",
        }
    }

    /// Whether the scheme only exists for power-of-two resolutions.
    #[must_use]
    pub const fn requires_power_of_two(self) -> bool {
        matches!(self, IndexScheme::Nested)
    }

    fn decode<I: PixelIndex>(self, pix: I, nside: Nside<I>) -> Result<FacePixel, HealpixError> {
        if self.requires_power_of_two() {
            nside.require_power_of_two()?;
        }
        let pix = nside.check_index(pix)?;
        let n = nside.as_i64();
        Ok(match self {
            IndexScheme::Xy => FacePixel::from_xy_unchecked(pix, n),
            IndexScheme::Ring => FacePixel::from_ring_unchecked(pix, n),
            IndexScheme::Nested => FacePixel::from_nested_unchecked(pix, n),
        })
    }

    fn encode(self, pixel: &FacePixel, n: i64) -> i64 {
        match self {
            IndexScheme::Xy => pixel.to_xy_unchecked(n),
            IndexScheme::Ring => pixel.to_ring_unchecked(n),
            IndexScheme::Nested => pixel.to_nested_unchecked(n),
        }
    }

    /// Convert an index in this scheme to XY.
    pub fn to_xy<I: PixelIndex>(self, pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
        let pixel = self.decode(pix, nside)?;
        Ok(I::from_i64(pixel.to_xy_unchecked(nside.as_i64())))
    }

    /// Convert an XY index to this scheme.
    pub fn from_xy<I: PixelIndex>(self, pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
        if self.requires_power_of_two() {
            nside.require_power_of_two()?;
        }
        let pixel = FacePixel::from_xy(pix, nside)?;
        Ok(I::from_i64(self.encode(&pixel, nside.as_i64())))
    }

    /// Split an index in this scheme into face and local coordinates.
    pub fn decompose<I: PixelIndex>(self, pix: I, nside: Nside<I>) -> Result<FacePixel, HealpixError> {
        self.decode(pix, nside)
    }

    /// Neighbours of `pix`, given and returned in this scheme.
    pub fn neighbours<I: PixelIndex>(
        self,
        pix: I,
        nside: Nside<I>,
    ) -> Result<Neighbours<I>, HealpixError> {
        let pixel = self.decode(pix, nside)?;
        let n = nside.as_i64();
        Ok(pixel
            .neighbours_unchecked(n)
            .iter()
            .map(|(_, p)| I::from_i64(self.encode(p, n)))
            .collect())
    }

    /// The neighbour of `pix` in `direction`, in this scheme.
    pub fn neighbour<I: PixelIndex>(
        self,
        pix: I,
        direction: Direction,
        nside: Nside<I>,
    ) -> Result<Option<I>, HealpixError> {
        let pixel = self.decode(pix, nside)?;
        let n = nside.as_i64();
        Ok(pixel
            .step_unchecked(direction, n)
            .map(|p| I::from_i64(self.encode(&p, n))))
    }
}

impl std::fmt::Display for IndexScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexScheme {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "xy" => Ok(IndexScheme::Xy),
            "ring" => Ok(IndexScheme::Ring),
            "nested" | "nest" => Ok(IndexScheme::Nested),
            _ => Err(ParseNameError {
                kind: "index scheme",
                name: s.to_owned(),
                expected: "xy, ring, nested",
            }),
        }
    }
}

/// Re-express `pix` from scheme `from` in scheme `to`.
pub fn convert_index<I: PixelIndex>(
    pix: I,
    from: IndexScheme,
    to: IndexScheme,
    nside: Nside<I>,
) -> Result<I, HealpixError> {
    if to.requires_power_of_two() {
        nside.require_power_of_two()?;
    }
    let pixel = from.decode(pix, nside)?;
    Ok(I::from_i64(to.encode(&pixel, nside.as_i64())))
}

/// Convert a RING index to NESTED.
pub fn ring_to_nested<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
    convert_index(pix, IndexScheme::Ring, IndexScheme::Nested, nside)
}

/// Convert a NESTED index to RING.
pub fn nested_to_ring<I: PixelIndex>(pix: I, nside: Nside<I>) -> Result<I, HealpixError> {
    convert_index(pix, IndexScheme::Nested, IndexScheme::Ring, nside)
}
