//! Accuracy measurement in 16-bit LSBs
//!
//! Fixed point output is compared against the float reference rounded to
//! the nearest integer, so a perfect implementation scores 0 and the
//! rounding of the weighted sum costs at most 1.

/// Statistics from an LSB comparison
#[derive(Debug, Clone)]
pub struct LsbStats {
    /// Mean absolute difference
    pub mean: f64,
    /// Maximum absolute difference
    pub max: u32,
    /// 95th percentile absolute difference
    pub p95: u32,
    /// Number of values compared
    pub count: usize,
}

impl LsbStats {
    /// Check if every value matched exactly
    pub fn is_exact(&self) -> bool {
        self.max == 0
    }

    /// Check if every value is within `lsb` of the reference
    pub fn is_within(&self, lsb: u32) -> bool {
        self.max <= lsb
    }

    fn from_diffs(mut diffs: Vec<u32>) -> Self {
        diffs.sort_unstable();

        let count = diffs.len();
        let mean = if count == 0 {
            0.0
        } else {
            diffs.iter().map(|&d| f64::from(d)).sum::<f64>() / count as f64
        };
        let max = diffs.last().copied().unwrap_or(0);
        let p95_idx = (count as f64 * 0.95) as usize;
        let p95 = diffs.get(p95_idx).copied().unwrap_or(max);

        Self {
            mean,
            max,
            p95,
            count,
        }
    }
}

/// Compare fixed point output to float reference values
pub fn compare_to_reference(actual: &[u16], reference: &[f64]) -> LsbStats {
    assert_eq!(actual.len(), reference.len());

    let diffs = actual
        .iter()
        .zip(reference)
        .map(|(&a, &r)| {
            let expected = r.round().clamp(0.0, 65535.0) as i64;
            (i64::from(a) - expected).unsigned_abs() as u32
        })
        .collect();
    LsbStats::from_diffs(diffs)
}

/// Compare two 16-bit buffers value by value
pub fn compare_u16_buffers(reference: &[u16], result: &[u16]) -> LsbStats {
    assert_eq!(reference.len(), result.len());

    let diffs = reference
        .iter()
        .zip(result)
        .map(|(&a, &b)| u32::from(a.abs_diff(b)))
        .collect();
    LsbStats::from_diffs(diffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_buffers() {
        let buf = [0u16, 1, 2, 65535];
        let stats = compare_u16_buffers(&buf, &buf);
        assert!(stats.is_exact());
        assert_eq!(stats.count, 4);
        assert!(stats.mean < 1e-9);
    }

    #[test]
    fn test_reference_rounding() {
        let stats = compare_to_reference(&[10, 10, 10], &[10.4, 9.6, 11.2]);
        assert_eq!(stats.max, 1);
        assert!(stats.is_within(1));
        assert!(!stats.is_exact());
    }

    #[test]
    fn test_empty() {
        let stats = compare_u16_buffers(&[], &[]);
        assert_eq!(stats.max, 0);
        assert_eq!(stats.count, 0);
    }
}
