//! Input pattern generation
//!
//! Patterns aimed at the interesting parts of a CLUT cell: vertices, the
//! main diagonal and the faces between tetrahedra.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Input pattern types
#[derive(Debug, Clone, Copy)]
pub enum InputPattern {
    /// Bytes that land exactly on the vertices of a uniform grid
    VertexAligned(usize),
    /// Gray ramp, all three fractions equal
    Grayscale,
    /// Two channels equal, third random (faces between tetrahedra)
    FaceTies(u64),
    /// RGB cube corners (8 colors)
    ColorCube,
    /// Every 8-bit value on one axis, other two fixed
    AxisSweep(usize),
    /// Random pixels with seed
    Random(u64),
    /// All zeros (black)
    Black,
    /// All 255 (white)
    White,
}

/// Generate `count` RGB8 pixels
pub fn generate_pattern(pattern: InputPattern, count: usize) -> Vec<u8> {
    let mut data = vec![0u8; count * 3];

    match pattern {
        InputPattern::VertexAligned(points) => {
            let vertices: Vec<u8> = (0..points)
                .filter_map(|k| {
                    let v = k * 255;
                    (v % (points - 1) == 0).then(|| (v / (points - 1)) as u8)
                })
                .collect();
            let n = vertices.len();
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                chunk[0] = vertices[i % n];
                chunk[1] = vertices[(i / n) % n];
                chunk[2] = vertices[(i / (n * n)) % n];
            }
        }
        InputPattern::Grayscale => {
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                chunk.fill((i % 256) as u8);
            }
        }
        InputPattern::FaceTies(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for chunk in data.chunks_exact_mut(3) {
                let tied: u8 = rng.r#gen();
                let free: u8 = rng.r#gen();
                match rng.gen_range(0..3) {
                    0 => chunk.copy_from_slice(&[tied, tied, free]),
                    1 => chunk.copy_from_slice(&[tied, free, tied]),
                    _ => chunk.copy_from_slice(&[free, tied, tied]),
                }
            }
        }
        InputPattern::ColorCube => {
            let corners: [[u8; 3]; 8] = [
                [0, 0, 0],
                [255, 0, 0],
                [0, 255, 0],
                [0, 0, 255],
                [255, 255, 0],
                [255, 0, 255],
                [0, 255, 255],
                [255, 255, 255],
            ];
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                chunk.copy_from_slice(&corners[i % 8]);
            }
        }
        InputPattern::AxisSweep(axis) => {
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                chunk.copy_from_slice(&[91, 173, 12]);
                chunk[axis % 3] = (i % 256) as u8;
            }
        }
        InputPattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.fill_bytes(&mut data);
        }
        InputPattern::Black => {
            // Already zeros
        }
        InputPattern::White => {
            data.fill(255);
        }
    }

    data
}

/// Standard test sizes, in pixels
pub mod sizes {
    pub const TINY: usize = 64;
    pub const SMALL: usize = 4096;
    pub const MEDIUM: usize = 65_536;
    pub const LARGE: usize = 1920 * 1080;
}
