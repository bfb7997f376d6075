use std::f32::consts::FRAC_PI_2;

use super::proportions::{eye_ball as ball, eye_frame as frame};
use super::{PathDescriptor, Point};
use crate::shape::{EyeBallShape, EyeFrameShape};

/// Path for a finder frame filling the `size`-pixel box at `(x, y)`.
///
/// The compositor calls this for both the 7×7 outline and the 5×5 hollow, so
/// every shape scales with the box it is given.
pub fn eye_frame_path(x: f32, y: f32, size: f32, shape: EyeFrameShape) -> PathDescriptor {
    let h = size / 2.0;
    let center = Point::new(x + h, y + h);

    match shape {
        EyeFrameShape::Square | EyeFrameShape::SquareSingle | EyeFrameShape::SquareDouble => {
            PathDescriptor::rect(x, y, size, size)
        }
        EyeFrameShape::Rounded => {
            PathDescriptor::rounded_rect(x, y, size, size, size * frame::ROUNDED_RADIUS)
        }
        EyeFrameShape::RoundedSingle => {
            PathDescriptor::rounded_rect(x, y, size, size, size * frame::ROUNDED_SINGLE_RADIUS)
        }
        EyeFrameShape::RoundedDouble => {
            PathDescriptor::rounded_rect(x, y, size, size, size * frame::ROUNDED_DOUBLE_RADIUS)
        }
        EyeFrameShape::Circle => {
            PathDescriptor::circle(center.x, center.y, size * frame::CIRCLE_RADIUS)
        }
        EyeFrameShape::Leaf => PathDescriptor::lens(center, h, h),
        EyeFrameShape::LeafRounded => {
            let reach = h - size * frame::LEAF_ROUNDED_INSET;
            PathDescriptor::lens(center, reach, reach)
        }
        EyeFrameShape::Diamond => PathDescriptor::diamond(x, y, size),
        EyeFrameShape::DiamondRounded => {
            let inset = size * frame::DIAMOND_ROUNDED_INSET;
            PathDescriptor::diamond(x + inset, y + inset, size - inset * 2.0)
        }
    }
}

/// Path for a finder ball filling the `size`-pixel box at `(x, y)`.
///
/// `pattern*` entries have no geometry of their own and draw as `square`.
pub fn eye_ball_path(x: f32, y: f32, size: f32, shape: EyeBallShape) -> PathDescriptor {
    let h = size / 2.0;
    let center = Point::new(x + h, y + h);

    match shape {
        EyeBallShape::Circle => PathDescriptor::circle(center.x, center.y, h * ball::CIRCLE_RADIUS),
        EyeBallShape::Rounded => {
            let inset = size * ball::ROUNDED_INSET;
            let inner = size - inset * 2.0;
            PathDescriptor::rounded_rect(
                x + inset,
                y + inset,
                inner,
                inner,
                size * ball::ROUNDED_RADIUS,
            )
        }
        EyeBallShape::Diamond => {
            let inset = size * ball::DIAMOND_INSET;
            PathDescriptor::diamond(x + inset, y + inset, size - inset * 2.0)
        }
        EyeBallShape::Leaf => {
            let reach = h * ball::LEAF_RADIUS;
            PathDescriptor::lens(center, reach, reach)
        }
        EyeBallShape::Star => PathDescriptor::star(
            center,
            h * ball::STAR_OUTER_RADIUS,
            h * ball::STAR_INNER_RADIUS,
            ball::STAR_POINTS,
            -FRAC_PI_2,
        ),
        EyeBallShape::Flower => {
            PathDescriptor::regular_polygon(center, h * ball::FLOWER_RADIUS, ball::FLOWER_PETALS, 0.0)
        }
        EyeBallShape::Dot => PathDescriptor::circle(center.x, center.y, h * ball::DOT_RADIUS),
        // no geometry of their own; drawn as the plain ball
        EyeBallShape::Square
        | EyeBallShape::RoundedSquare
        | EyeBallShape::RoundedDiamond
        | EyeBallShape::Pattern1
        | EyeBallShape::Pattern2
        | EyeBallShape::Pattern3
        | EyeBallShape::Pattern4
        | EyeBallShape::Pattern5
        | EyeBallShape::Pattern6 => PathDescriptor::rect(x, y, size, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Segment};

    #[test]
    fn frames_fit_their_box() {
        let bounds_box = Rect::new(0.0, 0.0, 70.0, 70.0);
        for &shape in EyeFrameShape::ALL {
            let bounds = eye_frame_path(0.0, 0.0, 70.0, shape).bounds().unwrap();
            assert!(bounds_box.contains_rect(&bounds), "{shape} spills out: {bounds:?}");
        }
    }

    #[test]
    fn balls_fit_their_box() {
        let bounds_box = Rect::new(20.0, 20.0, 30.0, 30.0);
        for &shape in EyeBallShape::ALL {
            let bounds = eye_ball_path(20.0, 20.0, 30.0, shape).bounds().unwrap();
            assert!(bounds_box.contains_rect(&bounds), "{shape} spills out: {bounds:?}");
        }
    }

    #[test]
    fn square_ball_fills_the_box() {
        assert_eq!(
            eye_ball_path(20.0, 20.0, 30.0, EyeBallShape::Square),
            PathDescriptor::rect(20.0, 20.0, 30.0, 30.0)
        );
        let plain = EyeBallShape::ALL.iter().filter(|s| {
            s.is_pattern() || matches!(s, EyeBallShape::RoundedSquare | EyeBallShape::RoundedDiamond)
        });
        for &shape in plain {
            assert_eq!(
                eye_ball_path(0.0, 0.0, 30.0, shape),
                eye_ball_path(0.0, 0.0, 30.0, EyeBallShape::Square),
                "{shape}"
            );
        }
    }

    #[test]
    fn leaf_frame_tips_touch_the_box() {
        let path = eye_frame_path(0.0, 0.0, 70.0, EyeFrameShape::Leaf);
        assert_eq!(path.segments()[0], Segment::MoveTo(Point::new(35.0, 0.0)));
        assert_eq!(
            path.segments()[1],
            Segment::QuadTo {
                ctrl: Point::new(70.0, 35.0),
                to: Point::new(35.0, 70.0),
            }
        );
    }

    #[test]
    fn ball_star_uses_smaller_radii() {
        let path = eye_ball_path(0.0, 0.0, 30.0, EyeBallShape::Star);
        let top = path.segments()[0].end_point().unwrap();
        assert!((top.y - (15.0 - 9.0)).abs() < 1e-4, "tip at {top:?}");
    }

    #[test]
    fn diamond_rounded_frame_is_inset() {
        let bounds = eye_frame_path(0.0, 0.0, 100.0, EyeFrameShape::DiamondRounded)
            .bounds()
            .unwrap();
        assert!((bounds.x - 15.0).abs() < 1e-4);
        assert!((bounds.width - 70.0).abs() < 1e-4);
    }
}
