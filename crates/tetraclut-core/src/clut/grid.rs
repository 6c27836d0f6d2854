//! Precomputed grid positions for 8-bit inputs
//!
//! Every possible input byte is located in the grid once, per axis, so that
//! evaluation only needs three table lookups to find its cube and the
//! position inside it.

use tracing::{debug, warn};

use super::curve::ToneCurve16;
use crate::math::fixed::{fixed_rest_to_int, fixed_to_int, from_8_to_16, to_fixed_domain};
use crate::{Error, Result};

/// Largest supported grid resolution per axis
///
/// Keeps `0xffff * (points - 1)` inside an `i32`.
pub const MAX_GRID_POINTS: usize = 0x8000;

/// Position of one input byte along one grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSample {
    /// Lower grid coordinate
    pub node: u32,
    /// Offset toward the next grid line, in 1/65536 of a cell
    pub frac: u16,
}

impl GridSample {
    /// Grid coordinate of the upper cube corner on this axis
    ///
    /// A sample lying on a grid line never touches the next vertex, which
    /// keeps the last node of each axis addressable on its own.
    #[inline]
    pub fn upper(&self) -> u32 {
        if self.frac == 0 { self.node } else { self.node + 1 }
    }

    /// Locate a 16-bit value on an axis with `grid_points` vertices
    ///
    /// `grid_points` must be within `2..=MAX_GRID_POINTS`.
    pub fn locate(value: u16, grid_points: usize) -> Result<Self> {
        if !(2..=MAX_GRID_POINTS).contains(&grid_points) {
            return Err(Error::InvalidGrid(format!(
                "{} grid points, expected 2..={}",
                grid_points, MAX_GRID_POINTS
            )));
        }
        Ok(Self::locate_unchecked(value, grid_points))
    }

    #[inline]
    fn locate_unchecked(value: u16, grid_points: usize) -> Self {
        debug_assert!((2..=MAX_GRID_POINTS).contains(&grid_points));
        let domain = (grid_points - 1) as i32;
        let fixed = to_fixed_domain(value as i32 * domain);
        Self {
            node: fixed_to_int(fixed) as u32,
            frac: fixed_rest_to_int(fixed) as u16,
        }
    }
}

/// Per-axis grid positions for all 256 values of each input channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSamples {
    grid_points: [usize; 3],
    axes: [[GridSample; 256]; 3],
}

impl GridSamples {
    /// Build samples for a grid, optionally through prelinearization curves
    ///
    /// `curves` are applied to the 16-bit expansion of each byte, one curve
    /// per input channel.
    pub fn new(grid_points: [usize; 3], curves: Option<&[ToneCurve16; 3]>) -> Result<Self> {
        for (axis, &points) in grid_points.iter().enumerate() {
            if !(2..=MAX_GRID_POINTS).contains(&points) {
                return Err(Error::InvalidGrid(format!(
                    "axis {} has {} grid points, expected 2..={}",
                    axis, points, MAX_GRID_POINTS
                )));
            }
        }

        if let Some(curves) = curves {
            for (axis, curve) in curves.iter().enumerate() {
                if !curve.is_monotonic() {
                    warn!(axis, "prelinearization curve is not monotonic");
                }
            }
        }

        let mut axes = [[GridSample::default(); 256]; 3];
        for (axis, samples) in axes.iter_mut().enumerate() {
            let curve = curves.map(|c| &c[axis]);
            for (i, sample) in samples.iter_mut().enumerate() {
                let v16 = from_8_to_16(i as u8);
                let v16 = curve.map_or(v16, |c| c.eval(v16));
                *sample = GridSample::locate_unchecked(v16, grid_points[axis]);
            }
        }

        debug!(
            ?grid_points,
            prelinearized = curves.is_some(),
            "built grid samples"
        );

        Ok(Self { grid_points, axes })
    }

    /// Samples for a grid with the same resolution on every axis
    pub fn uniform(points: usize, curves: Option<&[ToneCurve16; 3]>) -> Result<Self> {
        Self::new([points; 3], curves)
    }

    /// Grid resolution these samples were built for
    pub fn grid_points(&self) -> [usize; 3] {
        self.grid_points
    }

    /// Samples of one axis (0 = red, 1 = green, 2 = blue)
    ///
    /// # Panics
    ///
    /// Panics if `axis > 2`.
    pub fn axis(&self, axis: usize) -> &[GridSample; 256] {
        &self.axes[axis]
    }

    /// Look up the three axis samples for an input pixel
    #[inline]
    pub fn lookup(&self, input: [u8; 3]) -> [GridSample; 3] {
        [
            self.axes[0][input[0] as usize],
            self.axes[1][input[1] as usize],
            self.axes[2][input[2] as usize],
        ]
    }
}
