//! Keep-clear region planning for a center image.
//!
//! The region is a square of data modules around the matrix center that is
//! left undrawn so a logo can sit on top. Error correction recovers the lost
//! modules, which is why its size is capped at 9 modules and why it must never
//! touch a finder pattern.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegionConflict;
use crate::finder::{self, FinderAnchor, FINDER_SIZE};
use crate::geometry::{PathDescriptor, Rect};
use crate::surface::Canvas;

/// Smallest region edge in modules.
pub const MIN_REGION_MODULES: usize = 5;

/// Largest region edge in modules.
pub const MAX_REGION_MODULES: usize = 9;

/// Share of the requested overlay size that is actually cleared.
pub const SAFE_AREA_FACTOR: f64 = 0.8;

/// Image edge relative to the region edge.
pub const IMAGE_FILL: f32 = 0.9;

/// Corner radius of [`OverlayClip::RoundedSquare`], relative to the edge.
pub const ROUNDED_CLIP_RADIUS: f32 = 0.15;

// Absorbs float noise so an exact product like 25 × 0.2 × 0.8 is not rounded up.
const CEIL_TOLERANCE: f64 = 1e-4;

// ============================================================================
// OverlayRegion
// ============================================================================

/// A square block of modules, in module coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRegion {
    pub row_start: usize,
    pub col_start: usize,
    pub size_modules: usize,
}

impl OverlayRegion {
    /// Region edge in modules for an `n`-module matrix and an overlay that
    /// should cover `fraction` of the symbol edge. Always within
    /// [`MIN_REGION_MODULES`]..=[`MAX_REGION_MODULES`].
    pub fn size_for(n: usize, module_size_px: f32, fraction: f32) -> usize {
        let module = f64::from(module_size_px);
        let symbol_px = n as f64 * module;
        let cleared_px = symbol_px * f64::from(fraction) * SAFE_AREA_FACTOR;
        let modules = (cleared_px / module - CEIL_TOLERANCE).ceil();
        // NaN and negative values saturate to 0 and are clamped up
        (modules as usize).clamp(MIN_REGION_MODULES, MAX_REGION_MODULES)
    }

    /// Plans the keep-clear region for an `n`×`n` matrix.
    ///
    /// The region is centered on module `(n / 2, n / 2)`. Fails when it does
    /// not fit the matrix or would cover part of a finder pattern; callers
    /// are expected to drop the overlay in that case.
    pub fn plan(n: usize, module_size_px: f32, fraction: f32) -> Result<Self, RegionConflict> {
        let size_modules = Self::size_for(n, module_size_px, fraction);
        if size_modules > n {
            return Err(RegionConflict::OutOfBounds {
                region_size: size_modules,
                matrix_size: n,
            });
        }

        let start = n / 2 - size_modules / 2;
        let region = Self {
            row_start: start,
            col_start: start,
            size_modules,
        };

        if let Some(anchor) = finder::locate(n).into_iter().find(|a| region.overlaps(a)) {
            return Err(RegionConflict::Finder {
                anchor: anchor.id,
                region,
            });
        }
        Ok(region)
    }

    pub fn row_end(&self) -> usize {
        self.row_start + self.size_modules
    }

    pub fn col_end(&self) -> usize {
        self.col_start + self.size_modules
    }

    /// Returns true if the module at `(row, col)` is kept clear.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..self.row_end()).contains(&row)
            && (self.col_start..self.col_end()).contains(&col)
    }

    /// Returns true if any module of the region lies in the anchor's footprint.
    pub fn overlaps(&self, anchor: &FinderAnchor) -> bool {
        let rows = self.row_start < anchor.row + FINDER_SIZE && anchor.row < self.row_end();
        let cols = self.col_start < anchor.col + FINDER_SIZE && anchor.col < self.col_end();
        rows && cols
    }

    /// The region in canvas pixels.
    pub fn pixel_rect(&self, canvas: &Canvas) -> Rect {
        let origin = canvas.module_origin(self.row_start, self.col_start);
        let edge = self.size_modules as f32 * canvas.module_px();
        Rect::new(origin.x, origin.y, edge, edge)
    }
}

impl fmt::Display for OverlayRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{0}x{0} at ({1}, {2})",
            self.size_modules, self.row_start, self.col_start
        )
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Shape the overlay image is clipped to. The same shape, filled with the
/// background color, forms the backdrop behind the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OverlayClip {
    #[default]
    Circle,
    RoundedSquare,
}

impl OverlayClip {
    /// The clip outline for an image occupying `rect`.
    pub fn path(&self, rect: &Rect) -> PathDescriptor {
        match self {
            OverlayClip::Circle => {
                let c = rect.center();
                PathDescriptor::circle(c.x, c.y, rect.width.min(rect.height) / 2.0)
            }
            OverlayClip::RoundedSquare => PathDescriptor::rounded_rect(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                rect.width.min(rect.height) * ROUNDED_CLIP_RADIUS,
            ),
        }
    }
}

/// Where the overlay image is drawn, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlacement {
    /// Square the image is scaled to cover.
    pub rect: Rect,
    /// Outline the image is clipped to; also the backdrop shape.
    pub clip: PathDescriptor,
}

impl OverlayPlacement {
    /// Centers the image on the canvas at [`IMAGE_FILL`] of the region edge.
    ///
    /// With an even region size the canvas center is half a module off the
    /// region center, so the image shrinks until it fits the region.
    pub fn new(region: &OverlayRegion, canvas: &Canvas, clip: OverlayClip) -> Self {
        let bounds = region.pixel_rect(canvas);
        let center = canvas.center();
        let room = (center.x - bounds.x)
            .min(bounds.right() - center.x)
            .min(center.y - bounds.y)
            .min(bounds.bottom() - center.y)
            .max(0.0);
        let half = (bounds.width * IMAGE_FILL / 2.0).min(room);
        let rect = Rect::new(center.x - half, center.y - half, half * 2.0, half * 2.0);
        Self {
            clip: clip.path(&rect),
            rect,
        }
    }

    /// Edge of the target square in whole pixels, at least 1.
    pub fn target_px(&self) -> u32 {
        (self.rect.width.round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_region_for_version_two() {
        let region = OverlayRegion::plan(25, 10.0, 0.2).unwrap();
        assert_eq!(region.size_modules, 5);
        assert_eq!((region.row_start, region.col_start), (10, 10));
        assert!(region.contains(12, 12));
        assert!(!region.contains(15, 12));
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(OverlayRegion::size_for(21, 10.0, 0.01), 5);
        assert_eq!(OverlayRegion::size_for(177, 10.0, 1.0), 9);
        assert_eq!(OverlayRegion::size_for(41, 10.0, 0.2), 7);
        assert_eq!(OverlayRegion::size_for(25, 10.0, f32::NAN), 5);
    }

    #[test]
    fn exact_products_are_not_rounded_up() {
        // 50 × 0.2 × 0.8 = 8
        assert_eq!(OverlayRegion::size_for(50, 10.0, 0.2), 8);
    }

    #[test]
    fn module_size_cancels() {
        for module in [1.0, 3.5, 10.0, 24.0] {
            assert_eq!(OverlayRegion::size_for(45, module, 0.2), 8);
        }
    }

    #[test]
    fn large_region_on_smallest_matrix_conflicts() {
        let err = OverlayRegion::plan(21, 10.0, 0.6).unwrap_err();
        match err {
            RegionConflict::Finder { anchor, region } => {
                assert_eq!(anchor, finder::AnchorId::TopLeft);
                assert_eq!(region.size_modules, 9);
            }
            other => panic!("unexpected conflict {other:?}"),
        }
        assert!(OverlayRegion::plan(21, 10.0, 0.4).is_ok());
    }

    #[test]
    fn tiny_matrix_is_out_of_bounds() {
        assert_eq!(
            OverlayRegion::plan(3, 10.0, 0.2),
            Err(RegionConflict::OutOfBounds {
                region_size: 5,
                matrix_size: 3
            })
        );
    }

    #[test]
    fn display_format() {
        let region = OverlayRegion {
            row_start: 10,
            col_start: 10,
            size_modules: 5,
        };
        assert_eq!(region.to_string(), "5x5 at (10, 10)");
    }

    #[test]
    fn placement_is_centered_on_canvas() {
        let canvas = Canvas::new(25, 10.0, 4);
        let region = OverlayRegion::plan(25, 10.0, 0.2).unwrap();
        let placement = OverlayPlacement::new(&region, &canvas, OverlayClip::Circle);
        assert_eq!(placement.rect.center(), canvas.center());
        assert!((placement.rect.width - 45.0).abs() < 1e-4);
        assert_eq!(placement.target_px(), 45);
        assert!(region.pixel_rect(&canvas).contains_rect(&placement.rect));
    }

    #[test]
    fn even_region_placement_stays_inside() {
        let canvas = Canvas::new(25, 10.0, 4);
        let region = OverlayRegion {
            row_start: 9,
            col_start: 9,
            size_modules: 6,
        };
        let placement = OverlayPlacement::new(&region, &canvas, OverlayClip::RoundedSquare);
        assert!(region.pixel_rect(&canvas).contains_rect(&placement.rect));
        assert!((placement.rect.width - 50.0).abs() < 1e-4);
    }
}
