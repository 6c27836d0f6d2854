//! Buffer kernels for packed 8-bit pixels
//!
//! The span kernels walk a run of pixels serially; [`eval_parallel`] hands
//! disjoint runs to the rayon pool. Each task owns its slice of the
//! destination, so no synchronization is needed.

use multiversion::multiversion;
use rayon::prelude::*;
use tracing::trace;

use crate::Result;
use crate::clut::{OverflowPolicy, TetrahedralInterpolator};
use crate::math::fixed::{from_8_to_16, from_16_to_8};

/// Strides and flags describing one buffer transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SpanLayout {
    /// Bytes per source pixel
    pub src_stride: usize,
    /// Values per destination pixel
    pub dst_stride: usize,
    /// Interpolated channels per pixel
    pub channels: usize,
    /// Append the source alpha byte after the interpolated channels
    pub copy_alpha: bool,
    pub overflow: OverflowPolicy,
}

/// A serial kernel over one span of pixels
pub(crate) type Kernel<T> =
    fn(&TetrahedralInterpolator<'_>, &[u8], &mut [T], SpanLayout) -> Result<()>;

#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
fn eval_pixels_u16<F>(src: &[u8], dst: &mut [u16], layout: SpanLayout, eval: F) -> Result<()>
where
    F: Fn([u8; 3], &mut [u16]) -> Result<()>,
{
    debug_assert_eq!(src.len() / layout.src_stride * layout.dst_stride, dst.len());

    for (px, out) in src
        .chunks_exact(layout.src_stride)
        .zip(dst.chunks_exact_mut(layout.dst_stride))
    {
        eval([px[0], px[1], px[2]], &mut out[..layout.channels])?;
        if layout.copy_alpha {
            out[layout.channels] = from_8_to_16(px[3]);
        }
    }
    Ok(())
}

#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
fn eval_pixels_u8<F>(src: &[u8], dst: &mut [u8], layout: SpanLayout, eval: F) -> Result<()>
where
    F: Fn([u8; 3], &mut [u16]) -> Result<()>,
{
    debug_assert_eq!(src.len() / layout.src_stride * layout.dst_stride, dst.len());

    let mut scratch = vec![0u16; layout.channels];
    for (px, out) in src
        .chunks_exact(layout.src_stride)
        .zip(dst.chunks_exact_mut(layout.dst_stride))
    {
        eval([px[0], px[1], px[2]], &mut scratch)?;
        for (o, &v) in out.iter_mut().zip(scratch.iter()) {
            *o = from_16_to_8(v);
        }
        if layout.copy_alpha {
            out[layout.channels] = px[3];
        }
    }
    Ok(())
}

/// Interpolate a span of pixels to 16-bit output
pub(crate) fn eval_span_u16(
    interp: &TetrahedralInterpolator<'_>,
    src: &[u8],
    dst: &mut [u16],
    layout: SpanLayout,
) -> Result<()> {
    eval_pixels_u16(src, dst, layout, |px, out| {
        interp.eval_with(px, out, layout.overflow)
    })
}

/// Interpolate a span of pixels, packing results to 8 bits
pub(crate) fn eval_span_u8(
    interp: &TetrahedralInterpolator<'_>,
    src: &[u8],
    dst: &mut [u8],
    layout: SpanLayout,
) -> Result<()> {
    eval_pixels_u8(src, dst, layout, |px, out| {
        interp.eval_with(px, out, layout.overflow)
    })
}

/// Run a kernel over the rayon pool in contiguous runs of pixels
///
/// The first error from any task is returned; other tasks may already have
/// written their part of `dst`.
pub(crate) fn eval_parallel<T: Send>(
    interp: &TetrahedralInterpolator<'_>,
    src: &[u8],
    dst: &mut [T],
    layout: SpanLayout,
    min_pixels_per_task: usize,
    kernel: Kernel<T>,
) -> Result<()> {
    let pixels = src.len() / layout.src_stride;
    let tasks = (pixels / min_pixels_per_task.max(1)).clamp(1, rayon::current_num_threads());
    let per_task = pixels.div_ceil(tasks).max(1);

    trace!(pixels, tasks, per_task, "splitting buffer transform");

    src.par_chunks(per_task * layout.src_stride)
        .zip(dst.par_chunks_mut(per_task * layout.dst_stride))
        .try_for_each(|(s, d)| kernel(interp, s, d, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::clut::{DensityTable, GridSamples};

    fn table() -> DensityTable {
        DensityTable::sample([9, 9, 9], 2, |[x, y, z], out| {
            out[0] = (x * 8000 + y * 3) as u16;
            out[1] = (z * 8191) as u16;
        })
        .unwrap()
    }

    fn layout(src_stride: usize, copy_alpha: bool) -> SpanLayout {
        SpanLayout {
            src_stride,
            dst_stride: 2 + usize::from(copy_alpha),
            channels: 2,
            copy_alpha,
            overflow: OverflowPolicy::default(),
        }
    }

    #[test]
    fn test_span_matches_single_pixel() {
        let table = table();
        let samples = GridSamples::uniform(9, None).unwrap();
        let interp = TetrahedralInterpolator::new(&table, &samples);

        let src: Vec<u8> = (0..60).map(|i| (i * 41 % 256) as u8).collect();
        let mut dst = vec![0u16; 40];
        eval_span_u16(&interp, &src, &mut dst, layout(3, false)).unwrap();

        for (px, out) in src.chunks_exact(3).zip(dst.chunks_exact(2)) {
            let mut expected = [0u16; 2];
            interp.eval([px[0], px[1], px[2]], &mut expected).unwrap();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_u8_span_with_alpha() {
        let table = table();
        let samples = GridSamples::uniform(9, None).unwrap();
        let interp = TetrahedralInterpolator::new(&table, &samples);

        let src = [0u8, 0, 0, 9, 255, 255, 255, 200];
        let mut dst = [0u8; 6];
        eval_span_u8(&interp, &src, &mut dst, layout(4, true)).unwrap();
        assert_eq!(&dst[..3], &[0u8, 0, 9][..]);
        assert_eq!(dst[5], 200);
        assert_eq!(dst[4], 255);
    }

    #[test]
    fn test_parallel_split_covers_buffer() {
        let table = table();
        let samples = GridSamples::uniform(9, None).unwrap();
        let interp = TetrahedralInterpolator::new(&table, &samples);

        let src: Vec<u8> = (0..3 * 257).map(|i| (i * 13 % 256) as u8).collect();
        let mut serial = vec![0u16; 257 * 2];
        let mut parallel = vec![0u16; 257 * 2];
        eval_span_u16(&interp, &src, &mut serial, layout(3, false)).unwrap();
        eval_parallel(&interp, &src, &mut parallel, layout(3, false), 5, eval_span_u16).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_errors_propagate() {
        let table = DensityTable::uniform(2, 2, vec![0; 16]).unwrap();
        let samples = GridSamples::uniform(9, None).unwrap();
        let interp = TetrahedralInterpolator::new(&table, &samples);

        let src = vec![128u8; 3 * 64];
        let mut dst = vec![0u16; 64 * 2];
        let err = eval_parallel(&interp, &src, &mut dst, layout(3, false), 4, eval_span_u16);
        assert!(matches!(err, Err(Error::GridAccessOutOfRange { .. })));
    }
}
