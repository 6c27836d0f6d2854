//! Continuity across the faces between tetrahedra
//!
//! When two or three fractions are equal the point lies on a face shared by
//! several tetrahedra. Classification picks the first match; these tests
//! check that every other admissible tetrahedron would have produced the
//! same integers, so the choice is invisible.

use clut_tests::init_tracing;
use clut_tests::patterns::{InputPattern, generate_pattern, sizes};
use clut_tests::reference::{random_table, smooth_table};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tetraclut_core::{
    DensityTable, GridSamples, OverflowPolicy, TetrahedralInterpolator, Tetrahedron,
};

/// Evaluate `input` in every tetrahedron admitting it; all must agree
///
/// Returns how many tetrahedra admitted the point.
fn check_point(interp: &TetrahedralInterpolator<'_>, input: [u8; 3]) -> anyhow::Result<usize> {
    let [r, g, b] = interp.samples().lookup(input);
    let (rx, ry, rz) = (r.frac as i32, g.frac as i32, b.frac as i32);

    let channels = interp.output_channels();
    let mut chosen = vec![0u16; channels];
    interp.eval(input, &mut chosen)?;

    let classified = interp
        .classify(input)
        .ok_or_else(|| anyhow::anyhow!("{input:?} has no tetrahedron"))?;
    anyhow::ensure!(classified.contains(rx, ry, rz));

    let mut admitted = 0;
    let mut out = vec![0u16; channels];
    for t in Tetrahedron::ALL.into_iter().filter(|t| t.contains(rx, ry, rz)) {
        interp.eval_in(input, Some(t), &mut out, OverflowPolicy::default())?;
        anyhow::ensure!(
            out == chosen,
            "{input:?} fracs ({rx}, {ry}, {rz}): {t:?} gave {out:?}, {classified:?} gave {chosen:?}"
        );
        admitted += 1;
    }
    Ok(admitted)
}

fn check_table(table: &DensityTable, src: &[u8]) -> anyhow::Result<usize> {
    let samples = GridSamples::new(table.grid_points(), None)?;
    let interp = TetrahedralInterpolator::new(table, &samples);

    let mut shared = 0;
    for px in src.chunks_exact(3) {
        if check_point(&interp, [px[0], px[1], px[2]])? > 1 {
            shared += 1;
        }
    }
    Ok(shared)
}

#[test]
fn test_face_ties_random_tables() -> anyhow::Result<()> {
    init_tracing();

    for seed in 0..16u64 {
        let points = [2usize, 3, 9, 16, 17, 33][seed as usize % 6];
        let table = random_table([points; 3], 3, seed);
        let src = generate_pattern(InputPattern::FaceTies(seed), sizes::SMALL);
        let shared = check_table(&table, &src)?;
        // Equal bytes on a uniform grid always give equal fractions
        assert_eq!(shared, sizes::SMALL, "{points} points");
    }
    Ok(())
}

#[test]
fn test_main_diagonal_all_six_agree() -> anyhow::Result<()> {
    init_tracing();

    let table = random_table([17; 3], 4, 77);
    let samples = GridSamples::uniform(17, None)?;
    let interp = TetrahedralInterpolator::new(&table, &samples);

    for v in 0..=255u8 {
        assert_eq!(check_point(&interp, [v, v, v])?, 6, "gray {v}");
    }
    Ok(())
}

#[test]
fn test_smooth_tables_shared_faces() -> anyhow::Result<()> {
    init_tracing();

    for seed in 0..4u64 {
        let table = smooth_table([9, 9, 9], 2, seed);
        let src = generate_pattern(InputPattern::Grayscale, 256);
        check_table(&table, &src)?;
        let src = generate_pattern(InputPattern::FaceTies(seed + 100), sizes::SMALL);
        check_table(&table, &src)?;
    }
    Ok(())
}

#[test]
fn test_random_points_single_tetrahedron() -> anyhow::Result<()> {
    init_tracing();

    // Mixed resolutions: ties come from equal fractions, not equal bytes
    let table = random_table([5, 17, 9], 3, 5);
    let samples = GridSamples::new([5, 17, 9], None)?;
    let interp = TetrahedralInterpolator::new(&table, &samples);

    let mut rng = ChaCha8Rng::seed_from_u64(0xface);
    for _ in 0..20_000 {
        let input: [u8; 3] = rng.r#gen();
        check_point(&interp, input)?;
    }
    Ok(())
}

#[test]
fn test_vertex_points_admit_all() -> anyhow::Result<()> {
    init_tracing();

    // All fractions zero: every tetrahedron admits the point and collapses
    // to the low corner
    let table = random_table([16; 3], 2, 11);
    let samples = GridSamples::uniform(16, None)?;
    let interp = TetrahedralInterpolator::new(&table, &samples);

    let src = generate_pattern(InputPattern::VertexAligned(16), sizes::SMALL);
    for px in src.chunks_exact(3) {
        assert_eq!(check_point(&interp, [px[0], px[1], px[2]])?, 6);
    }
    Ok(())
}
