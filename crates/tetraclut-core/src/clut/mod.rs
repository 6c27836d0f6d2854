//! Prelinearized 3D color lookup tables
//!
//! The evaluation path for one pixel is:
//! 1. [`GridSamples`]: locate each input byte on its grid axis (precomputed,
//!    optionally through a [`ToneCurve16`] per channel)
//! 2. [`Tetrahedron`]: pick the tetrahedron of the cube cell from the
//!    ordering of the three fractions
//! 3. [`TetrahedralInterpolator`]: weight the four corners read from the
//!    [`DensityTable`] and fold back to 16 bits

mod curve;
mod grid;
mod interpolator;
mod table;
mod tetrahedron;

pub use curve::ToneCurve16;
pub use grid::{GridSample, GridSamples, MAX_GRID_POINTS};
pub use interpolator::{OverflowPolicy, TetrahedralInterpolator, interpolate};
pub use table::DensityTable;
pub use tetrahedron::Tetrahedron;
