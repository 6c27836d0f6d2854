//! Buffer transforms through a prelinearized CLUT
//!
//! [`Prelin8Transform`] owns a [`DensityTable`] together with the
//! [`GridSamples`] derived from it and applies them to whole pixel buffers.
//! It is immutable once built; to change the table build a new transform and
//! swap it in.

use bytemuck::Pod;
use tracing::debug;

use crate::batch::{self, SpanLayout};
use crate::clut::{
    DensityTable, GridSamples, OverflowPolicy, TetrahedralInterpolator, ToneCurve16,
};
use crate::{Error, Result};

/// Input pixel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// RGB, 3 bytes per pixel
    #[default]
    Rgb,
    /// RGBA, 4 bytes per pixel (alpha is copied only with `copy_alpha`)
    Rgba,
}

impl Layout {
    /// Get number of bytes per pixel for this layout
    pub fn channels(&self) -> usize {
        match self {
            Layout::Rgb => 3,
            Layout::Rgba => 4,
        }
    }

    /// Check if layout has alpha channel
    pub fn has_alpha(&self) -> bool {
        matches!(self, Layout::Rgba)
    }
}

/// Options for transform creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Layout of source pixels
    pub input_layout: Layout,
    /// Append the source alpha after the output channels
    pub copy_alpha: bool,
    /// Folding of the weighted sum back to 16 bits
    pub overflow: OverflowPolicy,
    /// Split large buffers across the rayon pool
    pub parallel: bool,
    /// Smallest slice of pixels handed to one parallel task
    pub min_pixels_per_task: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            input_layout: Layout::Rgb,
            copy_alpha: false,
            overflow: OverflowPolicy::Wrap,
            parallel: true,
            min_pixels_per_task: 4096,
        }
    }
}

impl TransformOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source pixel layout
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.input_layout = layout;
        self
    }

    /// Copy source alpha to the output
    pub fn with_copy_alpha(mut self, copy_alpha: bool) -> Self {
        self.copy_alpha = copy_alpha;
        self
    }

    /// Set the overflow policy
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Enable or disable parallel buffer transforms
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the minimum pixels per parallel task (at least 1)
    pub fn with_min_pixels_per_task(mut self, pixels: usize) -> Self {
        self.min_pixels_per_task = pixels.max(1);
        self
    }
}

/// 8-bit RGB to N-channel transform through a tetrahedral CLUT
#[derive(Debug, Clone)]
pub struct Prelin8Transform {
    table: DensityTable,
    samples: GridSamples,
    options: TransformOptions,
}

impl Prelin8Transform {
    /// Build a transform, deriving grid samples from the table resolution
    ///
    /// `curves` prelinearize the red, green and blue inputs.
    pub fn new(
        table: DensityTable,
        curves: Option<&[ToneCurve16; 3]>,
        options: TransformOptions,
    ) -> Result<Self> {
        let samples = GridSamples::new(table.grid_points(), curves)?;

        debug!(
            grid_points = ?table.grid_points(),
            output_channels = table.output_channels(),
            layout = ?options.input_layout,
            copy_alpha = options.copy_alpha,
            "created prelinearized 8-bit transform"
        );

        Ok(Self {
            table,
            samples,
            options,
        })
    }

    /// The table being evaluated
    pub fn table(&self) -> &DensityTable {
        &self.table
    }

    /// Grid samples derived at construction
    pub fn samples(&self) -> &GridSamples {
        &self.samples
    }

    /// Options this transform was built with
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Borrow an interpolator over the owned table
    pub fn interpolator(&self) -> TetrahedralInterpolator<'_> {
        TetrahedralInterpolator::new(&self.table, &self.samples)
    }

    /// Values written per output pixel
    pub fn output_stride(&self) -> usize {
        self.table.output_channels() + usize::from(self.copies_alpha())
    }

    fn copies_alpha(&self) -> bool {
        self.options.copy_alpha && self.options.input_layout.has_alpha()
    }

    /// Interpolate a single pixel
    pub fn eval_pixel(&self, input: [u8; 3]) -> Result<Vec<u16>> {
        let mut out = vec![0u16; self.table.output_channels()];
        self.interpolator()
            .eval_with(input, &mut out, self.options.overflow)?;
        Ok(out)
    }

    /// Transform pixels to 16-bit output
    ///
    /// `src` is any plain-data slice whose bytes hold pixels in the input
    /// layout, e.g. `&[u8]` or `&[[u8; 3]]`.
    pub fn transform_u16<P: Pod>(&self, src: &[P], dst: &mut [u16]) -> Result<()> {
        let src: &[u8] = bytemuck::cast_slice(src);
        let layout = self.span_layout(src.len(), dst.len())?;
        self.run(src, dst, layout, batch::eval_span_u16)
    }

    /// Transform pixels to 8-bit output
    pub fn transform_u8<P: Pod>(&self, src: &[P], dst: &mut [u8]) -> Result<()> {
        let src: &[u8] = bytemuck::cast_slice(src);
        let layout = self.span_layout(src.len(), dst.len())?;
        self.run(src, dst, layout, batch::eval_span_u8)
    }

    /// Transform pixels into a newly allocated 16-bit buffer
    pub fn transform_to_vec<P: Pod>(&self, src: &[P]) -> Result<Vec<u16>> {
        let bytes = std::mem::size_of_val(src);
        let pixels = bytes / self.options.input_layout.channels();
        let mut dst = vec![0u16; pixels * self.output_stride()];
        self.transform_u16(src, &mut dst)?;
        Ok(dst)
    }

    fn span_layout(&self, src_len: usize, dst_len: usize) -> Result<SpanLayout> {
        let src_stride = self.options.input_layout.channels();
        if src_len % src_stride != 0 {
            return Err(Error::PartialPixel {
                len: src_len,
                stride: src_stride,
            });
        }

        let pixels = src_len / src_stride;
        let dst_stride = self.output_stride();
        let expected = pixels * dst_stride;
        if dst_len != expected {
            return Err(Error::BufferSize {
                expected,
                actual: dst_len,
            });
        }

        Ok(SpanLayout {
            src_stride,
            dst_stride,
            channels: self.table.output_channels(),
            copy_alpha: self.copies_alpha(),
            overflow: self.options.overflow,
        })
    }

    fn run<T: Send>(
        &self,
        src: &[u8],
        dst: &mut [T],
        layout: SpanLayout,
        kernel: batch::Kernel<T>,
    ) -> Result<()> {
        let interp = self.interpolator();
        let pixels = src.len() / layout.src_stride;
        let min = self.options.min_pixels_per_task.max(1);

        if self.options.parallel && pixels >= min * 2 {
            batch::eval_parallel(&interp, src, dst, layout, min, kernel)
        } else {
            kernel(&interp, src, dst, layout)
        }
    }
}
