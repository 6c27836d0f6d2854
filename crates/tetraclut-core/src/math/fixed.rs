//! S15Fixed16 fixed-point helpers
//!
//! Intermediate values use a 32-bit signed representation with 16 fractional
//! bits. Grid positions are produced by [`to_fixed_domain`] and split into an
//! integer node and a 16-bit rest.

/// 32-bit signed fixed-point value with 16 fractional bits
pub type S15Fixed16 = i32;

/// Bias added to the weighted sum before folding back to 16 bits
pub const ROUNDING_BIAS: i32 = 0x8001;

/// Largest 16-bit sample value
pub const MAX_U16: u16 = 0xffff;

/// Expand an 8-bit value to 16 bits (0xAB -> 0xABAB)
#[inline]
pub const fn from_8_to_16(v: u8) -> u16 {
    ((v as u16) << 8) | v as u16
}

/// Reduce a 16-bit value to 8 bits with rounding
#[inline]
pub const fn from_16_to_8(v: u16) -> u8 {
    ((v as u32 * 65281 + 8388608) >> 24) as u8
}

/// Map `0..=0xffff * d` onto `0..=0x10000 * d`
///
/// `a` is a 16-bit value already multiplied by the grid domain (points - 1).
#[inline]
pub const fn to_fixed_domain(a: i32) -> S15Fixed16 {
    a + ((a + 0x7fff) / 0xffff)
}

/// Integer part of a fixed-point value
#[inline]
pub const fn fixed_to_int(x: S15Fixed16) -> i32 {
    x >> 16
}

/// Fractional part of a fixed-point value as a 16-bit integer
#[inline]
pub const fn fixed_rest_to_int(x: S15Fixed16) -> i32 {
    x & 0xffff
}

/// Linear interpolation between two 16-bit values by a 16-bit fraction
#[inline]
pub const fn linear_interp(a: i32, l: u16, h: u16) -> u16 {
    let dif = (h as i64 - l as i64) * a as i64 + 0x8000;
    ((dif >> 16) + l as i64) as u16
}

/// Fold a weighted sum of edge deltas back onto the low corner value
///
/// `rest = c1*rx + c2*ry + c3*rz + 0x8001`, then
/// `c0 + ((rest + (rest >> 16)) >> 16)`, all in wrapping 32-bit arithmetic
/// with arithmetic shifts. The low 16 bits of the result are the
/// interpolated sample. Steep cells overflow `rest`; the wrap is part of the
/// result and must be kept for bit-exact output.
#[inline]
pub const fn fold_weighted(c0: i32, c: [i32; 3], r: [i32; 3]) -> i32 {
    let rest = c[0]
        .wrapping_mul(r[0])
        .wrapping_add(c[1].wrapping_mul(r[1]))
        .wrapping_add(c[2].wrapping_mul(r[2]))
        .wrapping_add(ROUNDING_BIAS);
    c0.wrapping_add(rest.wrapping_add(rest >> 16) >> 16)
}

/// [`fold_weighted`] accumulated in 64 bits
///
/// Never overflows, so the result may fall outside `0..=0xffff` and is left
/// for the caller to clamp.
#[inline]
pub const fn fold_weighted_wide(c0: i32, c: [i32; 3], r: [i32; 3]) -> i64 {
    let rest = c[0] as i64 * r[0] as i64
        + c[1] as i64 * r[1] as i64
        + c[2] as i64 * r[2] as i64
        + ROUNDING_BIAS as i64;
    c0 as i64 + ((rest + (rest >> 16)) >> 16)
}
