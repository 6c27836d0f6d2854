//! # clut-tests
//!
//! Reference and property testing for tetraclut.
//!
//! This crate provides:
//! - A floating point tetrahedral interpolator to compare fixed point output
//!   against
//! - Table builders (smooth, random, axis ramps) and input patterns
//! - LSB error statistics
//!
//! ## Test Categories
//!
//! 1. **Reference parity**: fixed point vs float, per grid size
//! 2. **Boundary continuity**: every admissible tetrahedron agrees on
//!    shared faces
//! 3. **Batch transforms**: serial vs parallel, alpha, 8-bit packing
//! 4. **Prelinearization**: curves folded into grid samples

pub mod accuracy;
pub mod patterns;
pub mod reference;

pub use accuracy::{LsbStats, compare_to_reference, compare_u16_buffers};
pub use patterns::{InputPattern, generate_pattern};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for test output
///
/// Honors `RUST_LOG`; defaults to `warn`. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
