//! SVG output, plus rasterization of SVG markup through resvg.

use std::f32::consts::FRAC_PI_2;

use base64::{Engine as _, engine::general_purpose};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use ::svg::Document;
use ::svg::Node;
use ::svg::node::element::path::Data;
use ::svg::node::element::{ClipPath, Definitions, Image, Path, Rectangle};
use tracing::warn;

use super::raster::{demultiplied_image, fit_cover};
use super::{Canvas, Fill, RenderSurface};
use crate::color::Color;
use crate::error::RenderError;
use crate::geometry::{FillRule, PathDescriptor, Point, Segment};
use crate::overlay::OverlayPlacement;

const CLIP_ID: &str = "overlay-clip";

// ============================================================================
// SvgDocument
// ============================================================================

/// A finished SVG render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    markup: String,
    size_px: u32,
}

impl SvgDocument {
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn into_string(self) -> String {
        self.markup
    }

    /// Width and height in pixels, rounded up.
    pub fn size_px(&self) -> u32 {
        self.size_px
    }

    /// Rasterizes the document at its own pixel size.
    pub fn rasterize(&self) -> Option<RgbaImage> {
        render_svg(&self.markup, self.size_px)
    }
}

impl std::fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.markup)
    }
}

// ============================================================================
// SvgSurface
// ============================================================================

/// Records draw calls as SVG elements.
pub struct SvgSurface {
    size: f32,
    document: Document,
}

impl RenderSurface for SvgSurface {
    type Output = SvgDocument;

    fn create(canvas: &Canvas) -> Result<Self, RenderError> {
        let size = canvas.size_px();
        if !size.is_finite() || size <= 0.0 {
            return Err(RenderError::Surface(format!("invalid SVG canvas size {size}")));
        }
        let document = Document::new()
            .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
            .set("width", size)
            .set("height", size)
            .set("viewBox", (0.0, 0.0, size, size));
        Ok(Self { size, document })
    }

    fn fill(&mut self, color: Color) {
        let mut background = Rectangle::new().set("width", "100%").set("height", "100%");
        paint(&mut background, Fill::solid(color));
        self.document.append(background);
    }

    fn fill_path(&mut self, path: &PathDescriptor, fill: Fill) {
        if path.is_empty() {
            return;
        }
        let mut element = Path::new().set("d", path_data(path));
        if path.fill_rule() == FillRule::EvenOdd {
            element.assign("fill-rule", "evenodd");
        }
        paint(&mut element, fill);
        self.document.append(element);
    }

    fn draw_image(&mut self, image: &RgbaImage, placement: &OverlayPlacement) {
        let fitted = fit_cover(image, placement.target_px());
        let href = match png_data_url(&fitted) {
            Ok(href) => href,
            Err(e) => {
                warn!(error = %e, "Could not encode overlay image as PNG");
                return;
            }
        };

        let mut clip = Path::new().set("d", path_data(&placement.clip));
        if placement.clip.fill_rule() == FillRule::EvenOdd {
            clip.assign("clip-rule", "evenodd");
        }
        let defs = Definitions::new().add(ClipPath::new().set("id", CLIP_ID).add(clip));

        let rect = placement.rect;
        let logo = Image::new()
            .set("x", rect.x)
            .set("y", rect.y)
            .set("width", rect.width)
            .set("height", rect.height)
            .set("preserveAspectRatio", "xMidYMid slice")
            .set("clip-path", format!("url(#{CLIP_ID})"))
            .set("xlink:href", href);

        self.document.append(defs);
        self.document.append(logo);
    }

    fn finish(self) -> SvgDocument {
        SvgDocument {
            markup: self.document.to_string(),
            size_px: self.size.ceil() as u32,
        }
    }
}

fn paint(element: &mut impl Node, fill: Fill) {
    element.assign("fill", fill.color.to_hex_rgb());
    let alpha = fill.alpha();
    if alpha < 1.0 {
        element.assign("fill-opacity", alpha);
    }
}

/// Converts a path to SVG path data. Arcs are split into quarter turns so
/// the large-arc flag is always 0.
fn path_data(path: &PathDescriptor) -> Data {
    let mut data = Data::new();
    let mut current: Option<Point> = None;

    for segment in path.segments() {
        match *segment {
            Segment::MoveTo(p) => {
                data = data.move_to((p.x, p.y));
                current = Some(p);
            }
            Segment::LineTo(p) => {
                data = data.line_to((p.x, p.y));
                current = Some(p);
            }
            Segment::QuadTo { ctrl, to } => {
                data = data.quadratic_curve_to(vec![ctrl.x, ctrl.y, to.x, to.y]);
                current = Some(to);
            }
            Segment::Arc {
                center,
                radius,
                start,
                sweep,
            } => {
                let begin = center.on_circle(radius, start);
                data = if current.is_some() {
                    data.line_to((begin.x, begin.y))
                } else {
                    data.move_to((begin.x, begin.y))
                };

                let count = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
                let step = sweep / count as f32;
                let sweep_flag = if sweep > 0.0 { 1.0 } else { 0.0 };
                for i in 1..=count {
                    let to = center.on_circle(radius, start + step * i as f32);
                    data = data.elliptical_arc_to(vec![
                        radius, radius, 0.0, 0.0, sweep_flag, to.x, to.y,
                    ]);
                }
                current = segment.end_point();
            }
            Segment::Close => {
                data = data.close();
                current = None;
            }
        }
    }
    data
}

fn png_data_url(image: &RgbaImage) -> Result<String, image::ImageError> {
    let mut png_bytes = Vec::new();
    PngEncoder::new(&mut png_bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    let encoded = general_purpose::STANDARD.encode(&png_bytes);
    Ok(format!("data:image/png;base64,{encoded}"))
}

// ============================================================================
// SVG rasterization
// ============================================================================

/// Renders SVG markup to an RGBA image that fits within `size`×`size`,
/// preserving the aspect ratio.
///
/// Returns `None` if the SVG cannot be parsed or has no area.
pub(crate) fn render_svg(svg_data: &str, size: u32) -> Option<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).ok()?;

    // Calculate scale to fit within size x size
    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Some(demultiplied_image(&pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::svg::node::element::path::{Command, Position};

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><circle cx="25" cy="25" r="20" fill="#ff0000"/></svg>"##;

    fn commands(data: &Data) -> Vec<&Command> {
        data.iter().collect()
    }

    #[test]
    fn rect_path_data() {
        let data = path_data(&PathDescriptor::rect(0.0, 0.0, 10.0, 5.0));
        let commands = commands(&data);
        assert_eq!(commands.len(), 5);
        assert!(matches!(commands[0], Command::Move(Position::Absolute, _)));
        assert!(matches!(commands[4], Command::Close));
    }

    #[test]
    fn circle_path_uses_quarter_arcs() {
        let data = path_data(&PathDescriptor::circle(10.0, 10.0, 5.0));
        let arcs: Vec<_> = data
            .iter()
            .filter_map(|c| match c {
                Command::EllipticalArc(Position::Absolute, params) => Some(params.to_vec()),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 4);
        for params in &arcs {
            // radii, rotation, large-arc flag, sweep flag
            assert_eq!(params[..5], [5.0, 5.0, 0.0, 0.0, 1.0]);
        }
        assert!(matches!(data.iter().last(), Some(Command::Close)));
    }

    #[test]
    fn document_structure() {
        let mut surface = SvgSurface::create(&Canvas::new(21, 10.0, 4)).unwrap();
        surface.fill(Color::WHITE);
        let ring = PathDescriptor::rect(0.0, 0.0, 70.0, 70.0)
            .with_fill_rule(FillRule::EvenOdd)
            .append(PathDescriptor::rect(10.0, 10.0, 50.0, 50.0));
        surface.fill_path(&ring, Fill::with_opacity(Color::BLACK, 0.75));
        let doc = surface.finish();

        assert_eq!(doc.size_px(), 290);
        let svg = doc.as_str();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 290 290""#));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.contains(r#"fill-rule="evenodd""#));
        assert!(svg.contains(r#"fill-opacity="0.75""#));
    }

    #[test]
    fn document_rasterizes() {
        let mut surface = SvgSurface::create(&Canvas::new(21, 2.0, 0)).unwrap();
        surface.fill(Color::WHITE);
        surface.fill_path(&PathDescriptor::rect(0.0, 0.0, 10.0, 10.0), Fill::solid(Color::BLACK));
        let img = surface.finish().rasterize().unwrap();
        assert_eq!(img.dimensions(), (42, 42));
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(30, 30).0, [255, 255, 255, 255]);
    }

    #[test]
    fn render_svg_fits_size() {
        let img = render_svg(SIMPLE_SVG, 50).unwrap();
        assert_eq!(img.dimensions(), (50, 25));
        assert!(render_svg("not svg", 50).is_none());
    }

    #[test]
    fn png_data_url_prefix() {
        let url = png_data_url(&RgbaImage::new(2, 2)).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBOR"));
    }
}
