//! Error types for index conversion and geometry.

/// Errors produced when an input violates the preconditions of an index or
/// geometry operation.
///
/// Every public operation validates its inputs up front and returns one of
/// these instead of producing a partially computed result.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum HealpixError {
    /// The resolution is not usable for the requested operation.
    #[error("invalid resolution: nside {nside} {requirement}")]
    InvalidResolution {
        /// The rejected resolution.
        nside: i64,
        /// What the resolution failed to satisfy.
        requirement: &'static str,
    },

    /// A pixel index outside `[0, 12·nside²)`.
    #[error("pixel index {index} out of range [0, {npix})")]
    IndexOutOfRange {
        /// The rejected index.
        index: i64,
        /// Number of pixels at the resolution in use.
        npix: i64,
    },

    /// The resolution is too large for the selected index width.
    #[error("nside {nside} exceeds the maximum {max} for {bits}-bit pixel indices")]
    Overflow {
        /// The rejected resolution.
        nside: i64,
        /// Largest resolution the index width supports.
        max: i64,
        /// Width of the index type in bits.
        bits: u32,
    },

    /// A base face index outside `[0, 12)`.
    #[error("base face {face} out of range [0, 12)")]
    InvalidFace {
        /// The rejected face index.
        face: i64,
    },

    /// Local face coordinates outside `[0, nside)`.
    #[error("face coordinates ({x}, {y}) out of range for nside {nside}")]
    CoordinateOutOfRange {
        /// Local x coordinate.
        x: i64,
        /// Local y coordinate.
        y: i64,
        /// Resolution in use.
        nside: i64,
    },

    /// A fractional sub-pixel offset outside `[0, 1]` or not finite.
    #[error("sub-pixel offset ({dx}, {dy}) outside [0, 1]")]
    InvalidOffset {
        /// Offset along x.
        dx: f64,
        /// Offset along y.
        dy: f64,
    },

    /// A zero-length or non-finite direction was given where a point on the
    /// sphere was expected.
    #[error("point is zero-length or not finite")]
    DegeneratePoint,

    /// A RING ring number outside `[1, 4·nside − 1]`.
    #[error("ring {ring} out of range [1, {max}] for nside {nside}")]
    RingOutOfRange {
        /// The rejected ring number.
        ring: i64,
        /// Last ring at this resolution.
        max: i64,
        /// Resolution in use.
        nside: i64,
    },

    /// A pixel count that is not `12·nside²` for any valid nside.
    #[error("{npix} is not a valid pixel count (12·nside²)")]
    InvalidPixelCount {
        /// The rejected pixel count.
        npix: i64,
    },
}

/// A name that does not denote any known variant, such as an index scheme
/// or a direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{name}' (expected one of: {expected})")]
pub struct ParseNameError {
    /// What was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub name: String,
    /// Accepted spellings, comma separated.
    pub expected: &'static str,
}
