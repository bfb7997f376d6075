//! The render pipeline.

use image::RgbaImage;
use tracing::{debug, warn};

use crate::config::{RenderConfig, ShapePolicy};
use crate::error::{RenderError, RenderWarning};
use crate::finder::{self, FinderAnchor, FINDER_SIZE};
use crate::geometry::{body_path, eye_ball_path, eye_frame_path, FillRule, PathDescriptor};
use crate::matrix::ModuleMatrix;
use crate::overlay::{OverlayPlacement, OverlayRegion};
use crate::source::MatrixSource;
use crate::surface::{Canvas, Fill, PixmapSurface, RenderSurface, SvgDocument, SvgSurface};

/// Contrast ratio below which a [`RenderWarning::LowContrast`] is raised.
pub const MIN_CONTRAST_RATIO: f32 = 3.0;

/// Opacity of body shapes drawn over plain modules under
/// [`ShapePolicy::Underlay`].
pub const BODY_DECORATION_OPACITY: f32 = 0.95;

/// Opacity of finder shapes drawn over plain finders under
/// [`ShapePolicy::Underlay`].
pub const EYE_DECORATION_OPACITY: f32 = 0.75;

// ============================================================================
// Rendered
// ============================================================================

/// Output of a render together with what the compositor had to give up.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered<T> {
    pub output: T,
    /// The keep-clear region that was left for the overlay, if one was drawn.
    pub overlay_region: Option<OverlayRegion>,
    pub warnings: Vec<RenderWarning>,
}

impl<T> Rendered<T> {
    /// Returns true if the output falls short of the request: an overlay was
    /// skipped, or a replaced shape left a code readers may reject.
    pub fn is_partial(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(
                w,
                RenderWarning::RegionConflict(_)
                    | RenderWarning::OverlayDecodeFailure { .. }
                    | RenderWarning::UnscannableShape { .. }
            )
        })
    }

    pub fn into_output(self) -> T {
        self.output
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Rendered<U> {
        Rendered {
            output: f(self.output),
            overlay_region: self.overlay_region,
            warnings: self.warnings,
        }
    }
}

// ============================================================================
// QrCompositor
// ============================================================================

/// Draws module matrices according to a [`RenderConfig`].
///
/// A compositor holds no state besides its config, so one instance can serve
/// any number of renders, including from several threads at once.
///
/// # Drawing order
///
/// 1. The whole canvas is filled with the background color.
/// 2. If an overlay is configured, its keep-clear region is planned and the
///    image is decoded. Either failing drops the overlay with a warning.
/// 3. The three finder patterns are drawn: frame, hollow, ball, center.
///    Under [`ShapePolicy::Underlay`] the plain 7/5/3 squares carry the
///    structure and each decoration is laid on before the square that
///    bounds it, so the 1:1:3:1:1 profile is never disturbed.
/// 4. Every other dark module outside the keep-clear region is drawn with the
///    body shape, over a plain square under `Underlay`.
/// 5. The overlay backdrop and the clipped image are drawn on top.
///
/// # Example
///
/// ```
/// use qrstyle::{BodyShape, QrCodeEncoder, QrCompositor, RenderConfig, PixmapSurface};
///
/// let compositor = QrCompositor::new(RenderConfig::new().with_body_shape(BodyShape::Rounded));
/// let rendered = compositor
///     .render_text::<PixmapSurface>(&QrCodeEncoder::default(), "https://example.com")
///     .unwrap();
/// assert!(rendered.warnings.is_empty());
/// assert_eq!(rendered.output.width(), (29 + 8) * 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QrCompositor {
    config: RenderConfig,
}

struct PreparedOverlay {
    region: OverlayRegion,
    placement: OverlayPlacement,
    image: RgbaImage,
}

impl QrCompositor {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `matrix` onto a new surface of type `S`.
    ///
    /// Fails only on an invalid config, an invalid matrix or a surface that
    /// cannot be allocated. Everything else is reported as a warning.
    pub fn render<S: RenderSurface>(
        &self,
        matrix: &ModuleMatrix,
    ) -> Result<Rendered<S::Output>, RenderError> {
        let config = &self.config;
        config.validate()?;
        matrix.validate()?;

        let n = matrix.size();
        let canvas = Canvas::new(n, config.module_size_px, config.quiet_zone_modules);
        debug!(
            matrix_size = n,
            canvas_px = canvas.pixel_size(),
            body = %config.body_shape,
            frame = %config.eye_frame_shape,
            ball = %config.eye_ball_shape,
            "Rendering QR code"
        );

        let mut surface = S::create(&canvas)?;
        let mut warnings = Vec::new();

        surface.fill(config.background_color);

        let ratio = config.foreground_color.contrast_ratio(&config.background_color);
        if ratio < MIN_CONTRAST_RATIO {
            raise(
                &mut warnings,
                RenderWarning::LowContrast {
                    ratio,
                    min: MIN_CONTRAST_RATIO,
                },
            );
        }

        if config.shape_policy == ShapePolicy::Replace {
            check_replaced_shapes(config, &mut warnings);
        }

        let overlay = self.prepare_overlay(&canvas, &mut warnings);
        let region = overlay.as_ref().map(|o| o.region);

        for anchor in finder::locate(n) {
            self.draw_finder(&mut surface, &canvas, &anchor);
        }

        self.draw_body(&mut surface, &canvas, matrix, region.as_ref());

        if let Some(overlay) = overlay {
            surface.fill_path(&overlay.placement.clip, Fill::solid(config.background_color));
            surface.draw_image(&overlay.image, &overlay.placement);
        }

        Ok(Rendered {
            output: surface.finish(),
            overlay_region: region,
            warnings,
        })
    }

    /// Renders `matrix` to an RGBA image.
    pub fn render_image(&self, matrix: &ModuleMatrix) -> Result<Rendered<RgbaImage>, RenderError> {
        self.render::<PixmapSurface>(matrix)
    }

    /// Renders `matrix` to an SVG document.
    pub fn render_svg(&self, matrix: &ModuleMatrix) -> Result<Rendered<SvgDocument>, RenderError> {
        self.render::<SvgSurface>(matrix)
    }

    /// Encodes `text` with `source` and renders the result.
    pub fn render_text<S: RenderSurface>(
        &self,
        source: &dyn MatrixSource,
        text: &str,
    ) -> Result<Rendered<S::Output>, RenderError> {
        let matrix = source.encode(text)?;
        self.render::<S>(&matrix)
    }

    fn prepare_overlay(
        &self,
        canvas: &Canvas,
        warnings: &mut Vec<RenderWarning>,
    ) -> Option<PreparedOverlay> {
        let source = self.config.overlay.as_ref()?;

        let region = match OverlayRegion::plan(
            canvas.matrix_size(),
            canvas.module_px(),
            self.config.overlay_fraction,
        ) {
            Ok(region) => region,
            Err(conflict) => {
                raise(warnings, RenderWarning::RegionConflict(conflict));
                return None;
            }
        };

        let placement = OverlayPlacement::new(&region, canvas, self.config.overlay_clip);
        match source.load(placement.target_px()) {
            Ok(image) => {
                debug!(%region, image_px = placement.target_px(), "Placed overlay");
                Some(PreparedOverlay {
                    region,
                    placement,
                    image,
                })
            }
            Err(e) => {
                raise(
                    warnings,
                    RenderWarning::OverlayDecodeFailure {
                        reason: e.to_string(),
                    },
                );
                None
            }
        }
    }

    fn draw_finder<S: RenderSurface>(
        &self,
        surface: &mut S,
        canvas: &Canvas,
        anchor: &FinderAnchor,
    ) {
        let config = &self.config;
        let m = canvas.module_px();
        let origin = canvas.module_origin(anchor.row, anchor.col);
        // (x, y, edge) of the box inset by `offset` modules
        let inset = |offset: usize| {
            let span = FINDER_SIZE - 2 * offset;
            (
                origin.x + offset as f32 * m,
                origin.y + offset as f32 * m,
                span as f32 * m,
            )
        };
        let (x7, y7, s7) = inset(0);
        let (x5, y5, s5) = inset(1);
        let (x3, y3, s3) = inset(2);
        let (x1, y1, s1) = inset(3);

        let fg = Fill::solid(config.foreground_color);
        let bg = Fill::solid(config.background_color);
        let frame = |x, y, s| eye_frame_path(x, y, s, config.eye_frame_shape);
        let ball = eye_ball_path(x3, y3, s3, config.eye_ball_shape);

        match config.shape_policy {
            ShapePolicy::Replace => {
                surface.fill_path(&frame(x7, y7, s7), fg);
                surface.fill_path(&frame(x5, y5, s5), bg);
                surface.fill_path(&ball, fg);
            }
            ShapePolicy::Underlay => {
                let deco = Fill::with_opacity(config.foreground_color, EYE_DECORATION_OPACITY);
                let square7 = PathDescriptor::rect(x7, y7, s7, s7);
                let square3 = PathDescriptor::rect(x3, y3, s3, s3);

                surface.fill_path(&square7, fg);
                // the hollow square below clears whatever the ring leaves inside it
                let outer = frame(x7, y7, s7);
                if outer != square7 {
                    let ring = outer
                        .with_fill_rule(FillRule::EvenOdd)
                        .append(frame(x5, y5, s5));
                    surface.fill_path(&ring, deco);
                }
                surface.fill_path(&PathDescriptor::rect(x5, y5, s5, s5), bg);
                surface.fill_path(&square3, fg);
                // balls stay inside their 3×3 box
                if ball != square3 {
                    surface.fill_path(&ball, deco);
                }
            }
        }

        // structural center module, independent of any shape
        surface.fill_path(&PathDescriptor::rect(x1, y1, s1, s1), fg);
    }

    fn draw_body<S: RenderSurface>(
        &self,
        surface: &mut S,
        canvas: &Canvas,
        matrix: &ModuleMatrix,
        region: Option<&OverlayRegion>,
    ) {
        let config = &self.config;
        let n = matrix.size();
        let m = canvas.module_px();
        let fg = Fill::solid(config.foreground_color);
        let deco = Fill::with_opacity(config.foreground_color, BODY_DECORATION_OPACITY);

        let modules = matrix.iter().filter(|&(row, col, dark)| {
            dark && !finder::classify(row, col, n).is_finder()
                && !region.is_some_and(|r| r.contains(row, col))
        });

        for (row, col, _) in modules {
            let origin = canvas.module_origin(row, col);
            let shaped = body_path(origin.x, origin.y, m, config.body_shape);
            match config.shape_policy {
                ShapePolicy::Replace => surface.fill_path(&shaped, fg),
                ShapePolicy::Underlay => {
                    let square = PathDescriptor::rect(origin.x, origin.y, m, m);
                    surface.fill_path(&square, fg);
                    if shaped != square {
                        surface.fill_path(&shaped, deco);
                    }
                }
            }
        }
    }
}

/// Flags every replaced shape that readers are known to reject.
fn check_replaced_shapes(config: &RenderConfig, warnings: &mut Vec<RenderWarning>) {
    if !config.body_shape.keeps_structure() {
        raise(
            warnings,
            RenderWarning::UnscannableShape {
                slot: "body",
                shape: config.body_shape.as_str(),
            },
        );
    }
    if !config.eye_frame_shape.keeps_structure() {
        raise(
            warnings,
            RenderWarning::UnscannableShape {
                slot: "eye frame",
                shape: config.eye_frame_shape.as_str(),
            },
        );
    }
    if !config.eye_ball_shape.keeps_structure() {
        raise(
            warnings,
            RenderWarning::UnscannableShape {
                slot: "eye ball",
                shape: config.eye_ball_shape.as_str(),
            },
        );
    }
}

fn raise(warnings: &mut Vec<RenderWarning>, warning: RenderWarning) {
    warn!(%warning, "Render degraded");
    warnings.push(warning);
}

// ============================================================================
// Tests
// ============================================================================
