//! Fixed-point arithmetic shared by curve and table evaluation

pub mod fixed;

pub use fixed::{
    S15Fixed16, fixed_rest_to_int, fixed_to_int, fold_weighted, fold_weighted_wide, from_8_to_16,
    from_16_to_8, linear_interp, to_fixed_domain,
};
