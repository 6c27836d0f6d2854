//! Tabulated 16-bit prelinearization curves
//!
//! A curve is applied to each 16-bit-expanded input byte before the value is
//! located in the grid. Only evaluation of an already tabulated curve lives
//! here; building the table from a transfer function is the caller's job.

use crate::math::fixed::{MAX_U16, fixed_rest_to_int, fixed_to_int, linear_interp, to_fixed_domain};
use crate::{Error, Result};

/// A 16-bit tone curve sampled at evenly spaced points over `0..=0xffff`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve16 {
    table: Vec<u16>,
}

impl ToneCurve16 {
    /// Create a curve from a table of at least two entries
    pub fn from_table(table: Vec<u16>) -> Result<Self> {
        if table.len() < 2 {
            return Err(Error::InvalidCurve(format!(
                "curve needs at least 2 entries, got {}",
                table.len()
            )));
        }
        // Keeps `len - 1` times 0xffff inside i32
        if table.len() > 0x8000 {
            return Err(Error::InvalidCurve(format!(
                "curve has {} entries, limit is 32768",
                table.len()
            )));
        }
        Ok(Self { table })
    }

    /// The two-point identity curve
    pub fn identity() -> Self {
        Self {
            table: vec![0, MAX_U16],
        }
    }

    /// Number of table entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false; a curve holds at least two entries
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw table entries
    pub fn table(&self) -> &[u16] {
        &self.table
    }

    /// Check whether the table never decreases
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }

    /// Evaluate the curve at a 16-bit input
    pub fn eval(&self, v: u16) -> u16 {
        let domain = self.table.len() - 1;
        if v == MAX_U16 {
            return self.table[domain];
        }

        let fixed = to_fixed_domain(v as i32 * domain as i32);
        let cell = fixed_to_int(fixed) as usize;
        let rest = fixed_rest_to_int(fixed);

        // v < 0xffff keeps cell strictly below domain
        linear_interp(rest, self.table[cell], self.table[cell + 1])
    }
}

impl Default for ToneCurve16 {
    fn default() -> Self {
        Self::identity()
    }
}
