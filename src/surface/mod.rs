//! Output surfaces.
//!
//! The compositor issues the same sequence of calls against any
//! [`RenderSurface`]: one background fill, then filled paths, then at most one
//! clipped image. [`PixmapSurface`] rasterizes those calls into an RGBA
//! buffer; [`SvgSurface`] builds them into an `svg` crate document.

mod raster;
mod svg;

pub use raster::PixmapSurface;
pub use self::svg::{SvgDocument, SvgSurface};
pub(crate) use self::svg::render_svg;

use image::RgbaImage;

use crate::color::Color;
use crate::error::RenderError;
use crate::geometry::{PathDescriptor, Point};
use crate::overlay::OverlayPlacement;

// ============================================================================
// Canvas
// ============================================================================

/// Pixel layout of a render: the matrix plus a uniform quiet zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    matrix_size: usize,
    module_px: f32,
    quiet_zone_modules: usize,
}

impl Canvas {
    pub fn new(matrix_size: usize, module_px: f32, quiet_zone_modules: usize) -> Self {
        Self {
            matrix_size,
            module_px,
            quiet_zone_modules,
        }
    }

    pub fn matrix_size(&self) -> usize {
        self.matrix_size
    }

    pub fn module_px(&self) -> f32 {
        self.module_px
    }

    pub fn quiet_zone_modules(&self) -> usize {
        self.quiet_zone_modules
    }

    /// Total edge length in modules, quiet zone included.
    pub fn size_modules(&self) -> usize {
        self.matrix_size + 2 * self.quiet_zone_modules
    }

    /// Total edge length in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_modules() as f32 * self.module_px
    }

    /// Edge length of a raster target, rounded up to whole pixels.
    pub fn pixel_size(&self) -> u32 {
        self.size_px().ceil() as u32
    }

    /// Top-left pixel of the module at `(row, col)`.
    pub fn module_origin(&self, row: usize, col: usize) -> Point {
        let offset = self.quiet_zone_modules;
        Point::new(
            (offset + col) as f32 * self.module_px,
            (offset + row) as f32 * self.module_px,
        )
    }

    /// Center of the whole canvas.
    pub fn center(&self) -> Point {
        let half = self.size_px() / 2.0;
        Point::new(half, half)
    }
}

// ============================================================================
// RenderSurface
// ============================================================================

/// Paint for a filled path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
    /// Extra opacity applied on top of the color's own alpha.
    pub opacity: f32,
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Combined alpha of color and opacity, in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.color.alpha_f32() * self.opacity
    }
}

/// A drawing target the compositor can render into.
pub trait RenderSurface: Sized {
    /// What the surface produces once drawing is complete.
    type Output;

    /// Allocates a surface covering `canvas`.
    fn create(canvas: &Canvas) -> Result<Self, RenderError>;

    /// Paints the whole canvas.
    fn fill(&mut self, color: Color);

    /// Fills `path` with `fill`.
    fn fill_path(&mut self, path: &PathDescriptor, fill: Fill);

    /// Draws `image` scaled to cover `placement.rect`, clipped to
    /// `placement.clip`.
    fn draw_image(&mut self, image: &RgbaImage, placement: &OverlayPlacement);

    /// Finishes drawing and returns the output.
    fn finish(self) -> Self::Output;
}
