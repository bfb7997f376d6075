//! Backend-agnostic path geometry.
//!
//! Every shape in the catalogs is described as a [`PathDescriptor`]: a list of
//! absolute-coordinate segments plus a fill rule. Render surfaces translate
//! descriptors into their own drawing calls, so the shape functions never know
//! whether they are feeding a pixel buffer or SVG markup.
//!
//! Coordinates are in pixels with the y axis pointing down.

mod body;
mod eye;
pub mod proportions;

pub use body::body_path;
pub use eye::{eye_ball_path, eye_frame_path};

use std::f32::consts::{FRAC_PI_2, TAU};

// ============================================================================
// Primitives
// ============================================================================

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point at `angle` radians on a circle around `self`.
    pub fn on_circle(self, radius: f32, angle: f32) -> Self {
        Self::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// One drawing command of a [`PathDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Starts a new sub-path.
    MoveTo(Point),

    /// Straight line from the current point.
    LineTo(Point),

    /// Quadratic Bézier curve from the current point.
    QuadTo { ctrl: Point, to: Point },

    /// Circular arc around `center`, starting at angle `start` and turning by
    /// `sweep` radians (positive is clockwise on screen). When the arc start is
    /// not the current point, a straight line joins them; without a current
    /// point the arc starts a new sub-path.
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        sweep: f32,
    },

    /// Closes the current sub-path.
    Close,
}

impl Segment {
    /// The point where this segment ends, if it moves the pen.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => Some(p),
            Segment::QuadTo { to, .. } => Some(to),
            Segment::Arc {
                center,
                radius,
                start,
                sweep,
            } => Some(center.on_circle(radius, start + sweep)),
            Segment::Close => None,
        }
    }
}

/// How overlapping sub-paths combine when filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

// ============================================================================
// PathDescriptor
// ============================================================================

/// A fillable path in absolute pixel coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDescriptor {
    segments: Vec<Segment>,
    fill_rule: FillRule,
}

impl PathDescriptor {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(Segment::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(Segment::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.segments.push(Segment::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn arc(mut self, center: Point, radius: f32, start: f32, sweep: f32) -> Self {
        self.segments.push(Segment::Arc {
            center,
            radius,
            start,
            sweep,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(Segment::Close);
        self
    }

    /// Appends the sub-paths of `other`, keeping this path's fill rule.
    pub fn append(mut self, other: PathDescriptor) -> Self {
        self.segments.extend(other.segments);
        self
    }

    /// Moves every coordinate by `(dx, dy)`.
    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        for segment in &mut self.segments {
            match segment {
                Segment::MoveTo(p) | Segment::LineTo(p) => *p = p.offset(dx, dy),
                Segment::QuadTo { ctrl, to } => {
                    *ctrl = ctrl.offset(dx, dy);
                    *to = to.offset(dx, dy);
                }
                Segment::Arc { center, .. } => *center = center.offset(dx, dy),
                Segment::Close => {}
            }
        }
        self
    }

    /// Conservative bounding box: control points and full arc circles are
    /// included. Returns `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        let mut include = |p: Point| {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        };

        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) | Segment::LineTo(p) => include(p),
                Segment::QuadTo { ctrl, to } => {
                    include(ctrl);
                    include(to);
                }
                Segment::Arc { center, radius, .. } => {
                    include(center.offset(-radius, -radius));
                    include(center.offset(radius, radius));
                }
                Segment::Close => {}
            }
        }

        if min.x > max.x {
            return None;
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    // ------------------------------------------------------------------------
    // Shape constructors
    // ------------------------------------------------------------------------

    /// Axis-aligned rectangle.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new()
            .move_to(x, y)
            .line_to(x + width, y)
            .line_to(x + width, y + height)
            .line_to(x, y + height)
            .close()
    }

    /// Rectangle with quadratic-curve corners of radius `r`, clamped to half
    /// the shorter side.
    pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, r: f32) -> Self {
        let r = r.min(width / 2.0).min(height / 2.0);
        if r <= 0.0 {
            return Self::rect(x, y, width, height);
        }
        let (right, bottom) = (x + width, y + height);
        Self::new()
            .move_to(x + r, y)
            .line_to(right - r, y)
            .quad_to(right, y, right, y + r)
            .line_to(right, bottom - r)
            .quad_to(right, bottom, right - r, bottom)
            .line_to(x + r, bottom)
            .quad_to(x, bottom, x, bottom - r)
            .line_to(x, y + r)
            .quad_to(x, y, x + r, y)
            .close()
    }

    /// Full circle.
    pub fn circle(cx: f32, cy: f32, radius: f32) -> Self {
        Self::new()
            .arc(Point::new(cx, cy), radius, 0.0, TAU)
            .close()
    }

    /// Closed polygon through `points`. Fewer than three points yield an
    /// empty path.
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        let points: Vec<Point> = points.into_iter().collect();
        if points.len() < 3 {
            return Self::new();
        }
        let mut segments = Vec::with_capacity(points.len() + 1);
        segments.push(Segment::MoveTo(points[0]));
        segments.extend(points[1..].iter().copied().map(Segment::LineTo));
        segments.push(Segment::Close);
        Self {
            segments,
            fill_rule: FillRule::NonZero,
        }
    }

    /// Regular polygon with its first vertex at `start_angle`.
    pub fn regular_polygon(center: Point, radius: f32, sides: usize, start_angle: f32) -> Self {
        Self::polygon(
            (0..sides).map(|i| center.on_circle(radius, start_angle + i as f32 * TAU / sides as f32)),
        )
    }

    /// Star with `points` tips, alternating between `outer` and `inner`
    /// radius. The first tip sits at `start_angle`.
    pub fn star(center: Point, outer: f32, inner: f32, points: usize, start_angle: f32) -> Self {
        let step = std::f32::consts::PI / points as f32;
        Self::polygon((0..points * 2).map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            center.on_circle(radius, start_angle + i as f32 * step)
        }))
    }

    /// Vertical lens: two quadratic curves from the top tip to the bottom tip,
    /// bulging towards control points `bulge` pixels left and right of center.
    pub fn lens(center: Point, half_height: f32, bulge: f32) -> Self {
        let top = center.offset(0.0, -half_height);
        let bottom = center.offset(0.0, half_height);
        Self::new()
            .move_to(top.x, top.y)
            .quad_to(center.x + bulge, center.y, bottom.x, bottom.y)
            .quad_to(center.x - bulge, center.y, top.x, top.y)
            .close()
    }

    /// Square diamond with its tips on the edge midpoints of the given box.
    pub fn diamond(x: f32, y: f32, size: f32) -> Self {
        Self::polygon(diamond_points(x, y, size))
    }
}

fn diamond_points(x: f32, y: f32, size: f32) -> [Point; 4] {
    let h = size / 2.0;
    [
        Point::new(x + h, y),
        Point::new(x + size, y + h),
        Point::new(x + h, y + size),
        Point::new(x, y + h),
    ]
}

// ============================================================================
// Arc approximation
// ============================================================================

/// A cubic Bézier piece of an arc, excluding its start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPiece {
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Splits an arc into cubic Béziers spanning at most a quarter turn each.
pub fn arc_to_cubics(center: Point, radius: f32, start: f32, sweep: f32) -> Vec<CubicPiece> {
    if sweep == 0.0 || radius <= 0.0 {
        return Vec::new();
    }
    let count = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / count as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;

    (0..count)
        .map(|i| {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            let p0 = center.on_circle(radius, a0);
            let p1 = center.on_circle(radius, a1);
            CubicPiece {
                ctrl1: Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos()),
                ctrl2: Point::new(p1.x + k * a1.sin(), p1.y - k * a1.cos()),
                to: p1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn distance(a: Point, b: Point) -> f32 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    #[test]
    fn rect_is_closed_four_corner_path() {
        let path = PathDescriptor::rect(1.0, 2.0, 3.0, 4.0);
        assert_eq!(path.segments().len(), 5);
        assert_eq!(path.segments()[0], Segment::MoveTo(Point::new(1.0, 2.0)));
        assert_eq!(path.segments()[2], Segment::LineTo(Point::new(4.0, 6.0)));
        assert_eq!(path.segments()[4], Segment::Close);
        assert_eq!(path.bounds(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn rounded_rect_clamps_radius() {
        let path = PathDescriptor::rounded_rect(0.0, 0.0, 10.0, 4.0, 9.0);
        assert_eq!(path.segments()[0], Segment::MoveTo(Point::new(2.0, 0.0)));
        assert_eq!(path.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 4.0)));
    }

    #[test]
    fn zero_radius_rounded_rect_is_plain_rect() {
        assert_eq!(
            PathDescriptor::rounded_rect(0.0, 0.0, 5.0, 5.0, 0.0),
            PathDescriptor::rect(0.0, 0.0, 5.0, 5.0)
        );
    }

    #[test]
    fn circle_bounds() {
        let bounds = PathDescriptor::circle(5.0, 5.0, 2.0).bounds().unwrap();
        assert_eq!(bounds, Rect::new(3.0, 3.0, 4.0, 4.0));
    }

    #[test]
    fn star_alternates_radii() {
        let center = Point::new(0.0, 0.0);
        let path = PathDescriptor::star(center, 10.0, 4.0, 5, -FRAC_PI_2);
        let points: Vec<Point> = path.segments().iter().filter_map(Segment::end_point).collect();
        assert_eq!(points.len(), 10);
        assert!(approx(points[0].x, 0.0) && approx(points[0].y, -10.0));
        for (i, p) in points.iter().enumerate() {
            let r = distance(*p, center);
            assert!(approx(r, if i % 2 == 0 { 10.0 } else { 4.0 }), "vertex {i} at radius {r}");
        }
    }

    #[test]
    fn short_polygon_is_empty() {
        assert!(PathDescriptor::polygon([Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_empty());
        assert_eq!(PathDescriptor::new().bounds(), None);
    }

    #[test]
    fn translate_moves_everything() {
        let path = PathDescriptor::lens(Point::new(5.0, 5.0), 5.0, 5.0).translate(10.0, -5.0);
        assert_eq!(path.bounds(), Some(Rect::new(10.0, -5.0, 10.0, 10.0)));
    }

    #[test]
    fn append_keeps_fill_rule_and_subpaths() {
        let ring = PathDescriptor::rect(0.0, 0.0, 7.0, 7.0)
            .with_fill_rule(FillRule::EvenOdd)
            .append(PathDescriptor::rect(1.0, 1.0, 5.0, 5.0));
        assert_eq!(ring.fill_rule(), FillRule::EvenOdd);
        let moves = ring
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn arc_cubics_land_on_circle() {
        let center = Point::new(1.0, 1.0);
        let pieces = arc_to_cubics(center, 2.0, 0.0, TAU);
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert!(approx(distance(piece.to, center), 2.0));
        }
        let last = pieces.last().unwrap().to;
        assert!(approx(last.x, 3.0) && approx(last.y, 1.0));
        assert!(arc_to_cubics(center, 2.0, 0.0, 0.0).is_empty());
    }
}
