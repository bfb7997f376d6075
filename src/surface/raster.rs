//! Raster output through tiny-skia.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use resvg::tiny_skia::{
    ColorU8, FillRule as SkiaFillRule, FilterQuality, Mask, Paint, Path, PathBuilder,
    Pixmap, PixmapPaint, Transform,
};
use tracing::warn;

use super::{Canvas, Fill, RenderSurface};
use crate::color::Color;
use crate::error::RenderError;
use crate::geometry::{arc_to_cubics, FillRule, PathDescriptor, Point, Segment};
use crate::overlay::OverlayPlacement;

/// Anti-aliased pixel surface producing an un-premultiplied [`RgbaImage`].
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl RenderSurface for PixmapSurface {
    type Output = RgbaImage;

    fn create(canvas: &Canvas) -> Result<Self, RenderError> {
        let size = canvas.pixel_size();
        let pixmap = Pixmap::new(size, size)
            .ok_or_else(|| RenderError::Surface(format!("cannot allocate a {size}x{size} pixmap")))?;
        Ok(Self { pixmap })
    }

    fn fill(&mut self, color: Color) {
        self.pixmap.fill(color.into());
    }

    fn fill_path(&mut self, path: &PathDescriptor, fill: Fill) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let mut paint = Paint::default();
        let alpha = (fill.alpha() * 255.0).round() as u8;
        paint.set_color_rgba8(fill.color.r, fill.color.g, fill.color.b, alpha);
        paint.anti_alias = true;
        self.pixmap.fill_path(
            &skia_path,
            &paint,
            skia_fill_rule(path.fill_rule()),
            Transform::identity(),
            None,
        );
    }

    fn draw_image(&mut self, image: &RgbaImage, placement: &OverlayPlacement) {
        let edge = placement.target_px();
        let fitted = fit_cover(image, edge);
        let Some(source) = rgba_image_to_pixmap(&fitted) else {
            warn!(edge, "Could not convert overlay image to a pixmap");
            return;
        };
        let Some(clip_path) = to_skia_path(&placement.clip) else {
            return;
        };
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            return;
        };
        mask.fill_path(
            &clip_path,
            skia_fill_rule(placement.clip.fill_rule()),
            true,
            Transform::identity(),
        );

        let scale = placement.rect.width / edge as f32;
        let transform = Transform::from_row(scale, 0.0, 0.0, scale, placement.rect.x, placement.rect.y);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, Some(&mask));
    }

    fn finish(self) -> RgbaImage {
        demultiplied_image(&self.pixmap)
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn skia_fill_rule(rule: FillRule) -> SkiaFillRule {
    match rule {
        FillRule::NonZero => SkiaFillRule::Winding,
        FillRule::EvenOdd => SkiaFillRule::EvenOdd,
    }
}

/// Builds a tiny-skia path; arcs become cubic Béziers.
fn to_skia_path(path: &PathDescriptor) -> Option<Path> {
    let mut pb = PathBuilder::new();
    let mut current: Option<Point> = None;

    for segment in path.segments() {
        match *segment {
            Segment::MoveTo(p) => {
                pb.move_to(p.x, p.y);
                current = Some(p);
            }
            Segment::LineTo(p) => {
                pb.line_to(p.x, p.y);
                current = Some(p);
            }
            Segment::QuadTo { ctrl, to } => {
                pb.quad_to(ctrl.x, ctrl.y, to.x, to.y);
                current = Some(to);
            }
            Segment::Arc {
                center,
                radius,
                start,
                sweep,
            } => {
                let begin = center.on_circle(radius, start);
                if current.is_some() {
                    pb.line_to(begin.x, begin.y);
                } else {
                    pb.move_to(begin.x, begin.y);
                }
                for piece in arc_to_cubics(center, radius, start, sweep) {
                    pb.cubic_to(
                        piece.ctrl1.x,
                        piece.ctrl1.y,
                        piece.ctrl2.x,
                        piece.ctrl2.y,
                        piece.to.x,
                        piece.to.y,
                    );
                }
                current = segment.end_point();
            }
            Segment::Close => {
                pb.close();
                current = None;
            }
        }
    }

    pb.finish()
}

/// Scales `image` to cover an `edge`×`edge` square and crops the overflow
/// evenly from both sides.
pub(crate) fn fit_cover(image: &RgbaImage, edge: u32) -> RgbaImage {
    if image.width() == edge && image.height() == edge {
        return image.clone();
    }
    DynamicImage::ImageRgba8(image.clone())
        .resize_to_fill(edge, edge, FilterType::Lanczos3)
        .to_rgba8()
}

/// Converts straight-alpha pixels into a premultiplied tiny-skia pixmap.
fn rgba_image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Copies a premultiplied pixmap into a straight-alpha image.
pub(crate) fn demultiplied_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        pixmap.pixel(x, y).map_or(Rgba([0, 0, 0, 0]), |p| {
            let c = p.demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{OverlayClip, OverlayRegion};

    fn surface(canvas: &Canvas) -> PixmapSurface {
        let mut surface = PixmapSurface::create(canvas).unwrap();
        surface.fill(Color::WHITE);
        surface
    }

    #[test]
    fn fills_background() {
        let img = surface(&Canvas::new(21, 2.0, 1)).finish();
        assert_eq!(img.dimensions(), (46, 46));
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn pixel_aligned_rect_has_hard_edges() {
        let mut s = surface(&Canvas::new(21, 10.0, 0));
        s.fill_path(&PathDescriptor::rect(10.0, 10.0, 10.0, 10.0), Fill::solid(Color::BLACK));
        let img = s.finish();
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(19, 19).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(9, 10).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(20, 15).0, [255, 255, 255, 255]);
    }

    #[test]
    fn circle_arc_is_filled() {
        let mut s = surface(&Canvas::new(21, 10.0, 0));
        s.fill_path(&PathDescriptor::circle(50.0, 50.0, 20.0), Fill::solid(Color::BLACK));
        let img = s.finish();
        assert_eq!(img.get_pixel(50, 50).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(50, 32).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(34, 34).0, [255, 255, 255, 255]);
    }

    #[test]
    fn even_odd_leaves_hole() {
        let ring = PathDescriptor::rect(0.0, 0.0, 70.0, 70.0)
            .with_fill_rule(FillRule::EvenOdd)
            .append(PathDescriptor::rect(10.0, 10.0, 50.0, 50.0));
        let mut s = surface(&Canvas::new(21, 10.0, 0));
        s.fill_path(&ring, Fill::solid(Color::BLACK));
        let img = s.finish();
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(35, 35).0, [255, 255, 255, 255]);
    }

    #[test]
    fn translucent_fill_blends() {
        let mut s = surface(&Canvas::new(21, 10.0, 0));
        s.fill_path(
            &PathDescriptor::rect(0.0, 0.0, 10.0, 10.0),
            Fill::with_opacity(Color::BLACK, 0.5),
        );
        let p = s.finish().get_pixel(5, 5).0;
        assert!((120..=135).contains(&p[0]), "got {p:?}");
    }

    #[test]
    fn image_is_clipped_to_circle() {
        let canvas = Canvas::new(25, 10.0, 4);
        let region = OverlayRegion::plan(25, 10.0, 0.2).unwrap();
        let placement = OverlayPlacement::new(&region, &canvas, OverlayClip::Circle);
        let red = RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255]));

        let mut s = surface(&canvas);
        s.draw_image(&red, &placement);
        let img = s.finish();

        let c = canvas.center();
        let center = img.get_pixel(c.x as u32, c.y as u32).0;
        assert!(center[0] > 250 && center[1] < 5 && center[3] == 255, "got {center:?}");
        // corner of the placement square lies outside the circle
        let corner = (placement.rect.x as u32 + 1, placement.rect.y as u32 + 1);
        assert_eq!(img.get_pixel(corner.0, corner.1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn cover_crops_to_square() {
        let wide = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255]));
        let fitted = fit_cover(&wide, 40);
        assert_eq!(fitted.dimensions(), (40, 40));
    }

    #[test]
    fn translucent_fill_on_transparent_keeps_straight_color() {
        let mut s = PixmapSurface::create(&Canvas::new(21, 10.0, 0)).unwrap();
        s.fill_path(
            &PathDescriptor::rect(0.0, 0.0, 10.0, 10.0),
            Fill::with_opacity(Color::rgb(255, 0, 0), 0.5),
        );
        let img = s.finish();
        let [r, g, b, a] = img.get_pixel(5, 5).0;
        assert!(r >= 250 && g == 0 && b == 0, "got {:?}", [r, g, b, a]);
        assert!((126..=130).contains(&a), "alpha {a}");
        assert_eq!(img.get_pixel(50, 50).0, [0, 0, 0, 0]);
    }
}
