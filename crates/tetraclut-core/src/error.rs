//! Error types for tetraclut

use thiserror::Error;

/// Result type for tetraclut operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or evaluating a CLUT
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A corner coordinate falls outside the table grid.
    ///
    /// Signals that the grid samples and the table were built for different
    /// resolutions.
    #[error("Grid access out of range: axis {axis} coordinate {coordinate} >= {grid_points} grid points")]
    GridAccessOutOfRange {
        axis: usize,
        coordinate: usize,
        grid_points: usize,
    },

    /// Invalid grid shape or table contents
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Invalid prelinearization curve
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    /// Buffer size mismatch
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Source bytes do not split into whole pixels
    #[error("Partial pixel: {len} source bytes is not a multiple of {stride} bytes per pixel")]
    PartialPixel { len: usize, stride: usize },
}
