//! # tetraclut - tetrahedral CLUT interpolation
//!
//! Evaluates 3-input color lookup tables for 8-bit RGB pixels using
//! tetrahedral interpolation in 16.16 fixed point.
//!
//! ## Overview
//!
//! - [`DensityTable`]: the sampled grid, any number of 16-bit outputs per
//!   vertex
//! - [`GridSamples`]: every input byte located in the grid ahead of time,
//!   optionally through per-channel [`ToneCurve16`] prelinearization
//! - [`TetrahedralInterpolator`]: picks one of six tetrahedra per pixel and
//!   blends its four vertices
//! - [`Prelin8Transform`]: whole buffers, serial or split over rayon
//!
//! ## Quick Start
//!
//! ```
//! use tetraclut_core::{DensityTable, Prelin8Transform, TransformOptions};
//!
//! // 17 point identity table: output equals input
//! let table = DensityTable::sample([17; 3], 3, |[x, y, z], out| {
//!     out[0] = (x * 4096).min(0xffff) as u16;
//!     out[1] = (y * 4096).min(0xffff) as u16;
//!     out[2] = (z * 4096).min(0xffff) as u16;
//! })
//! .unwrap();
//!
//! let transform = Prelin8Transform::new(table, None, TransformOptions::default()).unwrap();
//!
//! let src = [255u8, 128, 64];
//! let mut dst = [0u8; 3];
//! transform.transform_u8(&src, &mut dst).unwrap();
//! ```

mod batch;
pub mod clut;
pub mod error;
pub mod math;
pub mod transform;

pub use clut::{
    DensityTable, GridSample, GridSamples, MAX_GRID_POINTS, OverflowPolicy,
    TetrahedralInterpolator, Tetrahedron, ToneCurve16, interpolate,
};
pub use error::{Error, Result};
pub use transform::{Layout, Prelin8Transform, TransformOptions};

/// Version of tetraclut-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
