//! Error types for the scramble-core library.

use thiserror::Error;

/// Failures raised while building a board from map data.
///
/// All of these are fatal at initialization; there is no retry path.
#[derive(Error, Debug)]
pub enum BoardError {
    /// The map parsed but produced no drawable regions.
    #[error("map contains no usable regions")]
    NoRegions,

    /// The frame rectangle has no area to play in.
    #[error("frame has no area: {width}x{height}")]
    EmptyFrame { width: f64, height: f64 },

    /// The map text was not valid GeoJSON of the supported subset.
    #[error("map JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by the perimeter scatter.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Scattering zero pieces would divide the perimeter by zero.
    #[error("cannot scatter zero regions")]
    NoRegions,

    /// An injected permutation did not cover the region list.
    #[error("scatter order has {got} entries, board has {expected} regions")]
    OrderMismatch { got: usize, expected: usize },
}
