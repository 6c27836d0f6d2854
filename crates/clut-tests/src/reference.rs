//! Floating point reference interpolator and table builders
//!
//! The reference locates inputs from the raw bytes in `f64`, independently
//! of `GridSamples`, and walks the same six tetrahedra. It is what the fixed
//! point path approximates.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tetraclut_core::{DensityTable, ToneCurve16};

/// Exact tetrahedral interpolation of `table` at an 8-bit input
///
/// `curves` are applied to the 16-bit expansion of each channel first, like
/// the fixed point path does.
pub fn reference_eval(
    table: &DensityTable,
    curves: Option<&[ToneCurve16; 3]>,
    input: [u8; 3],
) -> Vec<f64> {
    let grid = table.grid_points();

    let mut low = [0usize; 3];
    let mut high = [0usize; 3];
    let mut frac = [0f64; 3];
    for axis in 0..3 {
        let v16 = u16::from(input[axis]) * 257;
        let v16 = curves.map_or(v16, |c| c[axis].eval(v16));
        let pos = f64::from(v16) * (grid[axis] - 1) as f64 / 65535.0;
        low[axis] = (pos.floor() as usize).min(grid[axis] - 1);
        frac[axis] = pos - low[axis] as f64;
        high[axis] = if frac[axis] > 0.0 { low[axis] + 1 } else { low[axis] };
    }

    // Step the axis with the largest fraction first
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| frac[b].total_cmp(&frac[a]));

    let vertex = |v: [usize; 3]| -> Vec<f64> {
        table
            .density(v[0], v[1], v[2])
            .map(|d| d.iter().map(|&x| f64::from(x)).collect())
            .unwrap_or_else(|e| panic!("reference vertex {v:?}: {e}"))
    };

    let mut cursor = low;
    let mut prev = vertex(cursor);
    let mut out = prev.clone();
    for &axis in &order {
        cursor[axis] = high[axis];
        let next = vertex(cursor);
        for ((o, n), p) in out.iter_mut().zip(&next).zip(&prev) {
            *o += (n - p) * frac[axis];
        }
        prev = next;
    }
    out
}

/// Evaluate the reference over a packed RGB8 buffer
pub fn reference_buffer(
    table: &DensityTable,
    curves: Option<&[ToneCurve16; 3]>,
    src: &[u8],
) -> Vec<f64> {
    src.chunks_exact(3)
        .flat_map(|px| reference_eval(table, curves, [px[0], px[1], px[2]]))
        .collect()
}

/// Smooth table with per-seed curvature in every channel
///
/// Values span most of the 16-bit range without clipping much.
pub fn smooth_table(grid_points: [usize; 3], channels: usize, seed: u64) -> DensityTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let params: Vec<[f64; 5]> = (0..channels)
        .map(|_| std::array::from_fn(|_| rng.gen_range(-1.0..1.0)))
        .collect();
    let scale = grid_points.map(|p| 1.0 / (p - 1) as f64);

    DensityTable::sample(grid_points, channels, |[x, y, z], out| {
        let (u, v, w) = (x as f64 * scale[0], y as f64 * scale[1], z as f64 * scale[2]);
        for (o, a) in out.iter_mut().zip(&params) {
            let value = 0.5
                + 0.45 * (3.0 * u * a[0] + 2.0 * v * a[1] + w * a[2]).sin()
                + 0.2 * u * v * a[3]
                + 0.1 * w * w * a[4];
            *o = (value.clamp(0.0, 1.0) * 65535.0).round() as u16;
        }
    })
    .unwrap_or_else(|e| panic!("smooth table {grid_points:?}: {e}"))
}

/// Table with independent uniform random values at every vertex
pub fn random_table(grid_points: [usize; 3], channels: usize, seed: u64) -> DensityTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    DensityTable::sample(grid_points, channels, |_, out| {
        for o in out.iter_mut() {
            *o = rng.r#gen();
        }
    })
    .unwrap_or_else(|e| panic!("random table {grid_points:?}: {e}"))
}

/// Three channel table reproducing its input, `D(x, y, z) = (x, y, z)`
/// scaled to 16 bits
pub fn identity_table(points: usize) -> DensityTable {
    let step = 65535.0 / (points - 1) as f64;
    DensityTable::sample([points; 3], 3, |[x, y, z], out| {
        out[0] = (x as f64 * step).round() as u16;
        out[1] = (y as f64 * step).round() as u16;
        out[2] = (z as f64 * step).round() as u16;
    })
    .unwrap_or_else(|e| panic!("identity table {points}: {e}"))
}

/// Tabulated power curve, `y = x ^ gamma`
pub fn gamma_curve(gamma: f64, entries: usize) -> ToneCurve16 {
    let table = (0..entries)
        .map(|i| {
            let x = i as f64 / (entries - 1) as f64;
            (x.powf(gamma) * 65535.0).round() as u16
        })
        .collect();
    ToneCurve16::from_table(table).unwrap_or_else(|e| panic!("gamma {gamma}: {e}"))
}
