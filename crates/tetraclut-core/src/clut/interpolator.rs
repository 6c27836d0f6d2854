//! Tetrahedral evaluation of a density table for 8-bit RGB input

use super::grid::GridSamples;
use super::table::DensityTable;
use super::tetrahedron::Tetrahedron;
use crate::math::fixed::{MAX_U16, fold_weighted, fold_weighted_wide};
use crate::{Error, Result};

/// How the weighted sum is folded back to 16 bits
///
/// Cells whose edge deltas times the cell fraction stay below `2^31` give
/// the same result under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// 32-bit wrapping accumulation, keeping the low 16 bits
    ///
    /// Bit-exact with the classic integer kernel, including its results on
    /// steep cells where the accumulator wraps.
    #[default]
    Wrap,
    /// 64-bit accumulation clamped to `0..=0xffff`
    Saturate,
}

impl OverflowPolicy {
    /// Fold edge deltas `c`, weighted by the cell fractions `r`, onto `c0`
    #[inline]
    pub fn fold(self, c0: i32, c: [i32; 3], r: [i32; 3]) -> u16 {
        match self {
            OverflowPolicy::Wrap => fold_weighted(c0, c, r) as u16,
            OverflowPolicy::Saturate => {
                fold_weighted_wide(c0, c, r).clamp(0, MAX_U16 as i64) as u16
            }
        }
    }
}

/// Evaluates a [`DensityTable`] through precomputed [`GridSamples`]
///
/// Borrows both; holds no other state, so one interpolator can be shared
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct TetrahedralInterpolator<'a> {
    table: &'a DensityTable,
    samples: &'a GridSamples,
}

impl<'a> TetrahedralInterpolator<'a> {
    /// Pair a table with grid samples
    ///
    /// Nothing is checked or logged here. Samples built for another
    /// resolution are only an error once an input reaches a vertex the
    /// table does not have, which [`eval`](Self::eval) reports as
    /// [`Error::GridAccessOutOfRange`].
    pub fn new(table: &'a DensityTable, samples: &'a GridSamples) -> Self {
        Self { table, samples }
    }

    /// Whether the samples were built for this table's resolution
    pub fn is_matched(&self) -> bool {
        self.table.grid_points() == self.samples.grid_points()
    }

    /// The table being evaluated
    pub fn table(&self) -> &'a DensityTable {
        self.table
    }

    /// The grid samples used to locate inputs
    pub fn samples(&self) -> &'a GridSamples {
        self.samples
    }

    /// Number of values produced per input
    pub fn output_channels(&self) -> usize {
        self.table.output_channels()
    }

    /// Tetrahedron that would be used for an input
    pub fn classify(&self, input: [u8; 3]) -> Option<Tetrahedron> {
        let [r, g, b] = self.samples.lookup(input);
        Tetrahedron::classify(r.frac as i32, g.frac as i32, b.frac as i32)
    }

    /// Interpolate one input into `out` with the default overflow policy
    #[inline]
    pub fn eval(&self, input: [u8; 3], out: &mut [u16]) -> Result<()> {
        self.eval_with(input, out, OverflowPolicy::default())
    }

    /// Interpolate one input into `out` with an explicit overflow policy
    #[inline]
    pub fn eval_with(&self, input: [u8; 3], out: &mut [u16], overflow: OverflowPolicy) -> Result<()> {
        let tetrahedron = self.classify(input);
        self.eval_in(input, tetrahedron, out, overflow)
    }

    /// Interpolate inside a given tetrahedron
    ///
    /// `None` drops all edge deltas and returns the low corner, which is
    /// what an unordered set of fractions degrades to. Forcing a tetrahedron
    /// that does not contain the point extrapolates.
    pub fn eval_in(
        &self,
        input: [u8; 3],
        tetrahedron: Option<Tetrahedron>,
        out: &mut [u16],
        overflow: OverflowPolicy,
    ) -> Result<()> {
        let channels = self.table.output_channels();
        if out.len() != channels {
            return Err(Error::BufferSize {
                expected: channels,
                actual: out.len(),
            });
        }

        let [sr, sg, sb] = self.samples.lookup(input);
        let low = [sr.node as usize, sg.node as usize, sb.node as usize];
        let high = [sr.upper() as usize, sg.upper() as usize, sb.upper() as usize];
        let rest = [sr.frac as i32, sg.frac as i32, sb.frac as i32];

        let corner = |v: [bool; 3]| {
            let pick = |axis: usize| if v[axis] { high[axis] } else { low[axis] };
            self.table.vertex_offset(pick(0), pick(1), pick(2))
        };

        let c0 = self.table.at_offset(self.table.vertex_offset(low[0], low[1], low[2])?);
        let v3 = self.table.at_offset(self.table.vertex_offset(high[0], high[1], high[2])?);

        let Some(tetrahedron) = tetrahedron else {
            for (o, &c) in out.iter_mut().zip(c0) {
                *o = overflow.fold(c as i32, [0; 3], rest);
            }
            return Ok(());
        };

        let [m1, m2] = tetrahedron.middle_vertices();
        let v1 = self.table.at_offset(corner(m1)?);
        let v2 = self.table.at_offset(corner(m2)?);

        for ch in 0..channels {
            let c0 = c0[ch] as i32;
            let c = tetrahedron.coefficients(c0, v1[ch] as i32, v2[ch] as i32, v3[ch] as i32);
            out[ch] = overflow.fold(c0, c, rest);
        }

        Ok(())
    }
}

/// Interpolate one 8-bit RGB input through a table
///
/// Returns one 16-bit value per output channel, in table channel order.
pub fn interpolate(input: [u8; 3], table: &DensityTable, samples: &GridSamples) -> Result<Vec<u16>> {
    let mut out = vec![0u16; table.output_channels()];
    TetrahedralInterpolator::new(table, samples).eval(input, &mut out)?;
    Ok(out)
}
