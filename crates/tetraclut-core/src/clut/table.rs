//! Flattened 3D sample grid with N outputs per vertex

use tracing::debug;

use super::grid::MAX_GRID_POINTS;
use crate::{Error, Result};

/// Color lookup table storing 16-bit samples at every grid vertex
///
/// Storage order is red slowest, blue fastest, output channels innermost,
/// so vertex `(x, y, z)` starts at
/// `((x * gy + y) * gz + z) * output_channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityTable {
    grid_points: [usize; 3],
    output_channels: usize,
    strides: [usize; 3],
    values: Vec<u16>,
}

impl DensityTable {
    /// Create a table from flat vertex data
    pub fn new(grid_points: [usize; 3], output_channels: usize, values: Vec<u16>) -> Result<Self> {
        let expected = Self::checked_len(grid_points, output_channels)?;
        if values.len() != expected {
            return Err(Error::InvalidGrid(format!(
                "expected {} table values for {:?} x {} channels, got {}",
                expected,
                grid_points,
                output_channels,
                values.len()
            )));
        }

        let strides = [
            grid_points[1] * grid_points[2] * output_channels,
            grid_points[2] * output_channels,
            output_channels,
        ];

        debug!(
            ?grid_points,
            output_channels,
            bytes = values.len() * std::mem::size_of::<u16>(),
            "built density table"
        );

        Ok(Self {
            grid_points,
            output_channels,
            strides,
            values,
        })
    }

    /// Create a table with the same resolution on every axis
    pub fn uniform(points: usize, output_channels: usize, values: Vec<u16>) -> Result<Self> {
        Self::new([points; 3], output_channels, values)
    }

    /// Populate every vertex from a sampler
    ///
    /// The sampler receives the vertex coordinates and writes one value per
    /// output channel. Vertices are visited in storage order.
    pub fn sample<F>(grid_points: [usize; 3], output_channels: usize, mut sampler: F) -> Result<Self>
    where
        F: FnMut([usize; 3], &mut [u16]),
    {
        let len = Self::checked_len(grid_points, output_channels)?;
        let mut values = Vec::new();
        values.try_reserve_exact(len).map_err(|e| {
            Error::InvalidGrid(format!("cannot allocate {len} table values: {e}"))
        })?;
        values.resize(len, 0u16);
        let mut vertices = values.chunks_exact_mut(output_channels);

        for x in 0..grid_points[0] {
            for y in 0..grid_points[1] {
                for z in 0..grid_points[2] {
                    if let Some(out) = vertices.next() {
                        sampler([x, y, z], out);
                    }
                }
            }
        }

        Self::new(grid_points, output_channels, values)
    }

    fn checked_len(grid_points: [usize; 3], output_channels: usize) -> Result<usize> {
        if output_channels == 0 {
            return Err(Error::InvalidGrid("table needs at least one output channel".into()));
        }
        for (axis, &points) in grid_points.iter().enumerate() {
            if !(2..=MAX_GRID_POINTS).contains(&points) {
                return Err(Error::InvalidGrid(format!(
                    "axis {} has {} grid points, expected 2..={}",
                    axis, points, MAX_GRID_POINTS
                )));
            }
        }

        grid_points
            .iter()
            .try_fold(output_channels, |acc, &p| acc.checked_mul(p))
            .ok_or_else(|| Error::InvalidGrid("table size overflows".into()))
    }

    /// Grid resolution per axis
    pub fn grid_points(&self) -> [usize; 3] {
        self.grid_points
    }

    /// Number of values stored per vertex
    pub fn output_channels(&self) -> usize {
        self.output_channels
    }

    /// All table values in storage order
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Offset of the first channel of vertex `(x, y, z)` in the flat storage
    #[inline]
    pub fn vertex_offset(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        let coords = [x, y, z];
        let mut offset = 0;
        for axis in 0..3 {
            if coords[axis] >= self.grid_points[axis] {
                return Err(Error::GridAccessOutOfRange {
                    axis,
                    coordinate: coords[axis],
                    grid_points: self.grid_points[axis],
                });
            }
            offset += coords[axis] * self.strides[axis];
        }
        Ok(offset)
    }

    /// All output channel values stored at vertex `(x, y, z)`
    #[inline]
    pub fn density(&self, x: usize, y: usize, z: usize) -> Result<&[u16]> {
        let offset = self.vertex_offset(x, y, z)?;
        Ok(&self.values[offset..offset + self.output_channels])
    }

    /// Values at a vertex offset previously returned by [`Self::vertex_offset`]
    #[inline]
    pub(crate) fn at_offset(&self, offset: usize) -> &[u16] {
        &self.values[offset..offset + self.output_channels]
    }
}
