use std::f32::consts::FRAC_PI_2;

use super::proportions::body as p;
use super::{PathDescriptor, Point};
use crate::shape::BodyShape;

/// Path for one dark data module whose top-left pixel is `(x, y)`.
///
/// `pattern*` entries have no geometry of their own and draw as `square`.
pub fn body_path(x: f32, y: f32, size: f32, shape: BodyShape) -> PathDescriptor {
    let h = size / 2.0;
    let center = Point::new(x + h, y + h);

    match shape {
        BodyShape::Rounded => PathDescriptor::rounded_rect(x, y, size, size, size * p::ROUNDED_RADIUS),
        BodyShape::ExtraRounded => {
            PathDescriptor::rounded_rect(x, y, size, size, size * p::EXTRA_ROUNDED_RADIUS)
        }
        BodyShape::Dots => PathDescriptor::circle(center.x, center.y, h * p::DOTS_RADIUS),
        BodyShape::DotsRounded => {
            PathDescriptor::circle(center.x, center.y, size * p::DOTS_ROUNDED_RADIUS)
        }
        BodyShape::RoundedDots => {
            PathDescriptor::circle(center.x, center.y, size * p::ROUNDED_DOTS_RADIUS)
        }
        BodyShape::Classy => {
            let cut = size * p::CLASSY_CUT;
            PathDescriptor::polygon([
                Point::new(x, y),
                Point::new(x + size, y),
                Point::new(x + size, y + cut),
                Point::new(x + cut, y + size),
                Point::new(x, y + size),
            ])
        }
        BodyShape::ClassyRounded => classy_rounded(x, y, size),
        BodyShape::Flower => {
            PathDescriptor::regular_polygon(center, h * p::FLOWER_RADIUS, p::FLOWER_PETALS, 0.0)
        }
        BodyShape::Star => PathDescriptor::star(
            center,
            h * p::STAR_OUTER_RADIUS,
            h * p::STAR_INNER_RADIUS,
            p::STAR_POINTS,
            -FRAC_PI_2,
        ),
        BodyShape::Square
        | BodyShape::Pattern1
        | BodyShape::Pattern2
        | BodyShape::Pattern3
        | BodyShape::Pattern4
        | BodyShape::Pattern5
        | BodyShape::Pattern6
        | BodyShape::Pattern7
        | BodyShape::Pattern8 => PathDescriptor::rect(x, y, size, size),
    }
}

// Rounded on three corners, chamfered bottom-right.
fn classy_rounded(x: f32, y: f32, size: f32) -> PathDescriptor {
    let r = size * p::CLASSY_ROUNDED_RADIUS;
    let cut = size * p::CLASSY_CUT;
    let (right, bottom) = (x + size, y + size);
    PathDescriptor::new()
        .move_to(x + r, y)
        .line_to(right - r, y)
        .quad_to(right, y, right, y + r)
        .line_to(right, y + cut)
        .line_to(x + cut, bottom)
        .line_to(x + r, bottom)
        .quad_to(x, bottom, x, bottom - r)
        .line_to(x, y + r)
        .quad_to(x, y, x + r, y)
        .close()
}
