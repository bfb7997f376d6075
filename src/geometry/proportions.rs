//! Fixed shape proportions.
//!
//! These fractions are part of the visual output: visual-regression baselines
//! are recorded against them, so any change must bump [`CATALOG_VERSION`].
//! `s` is the edge length of the target box and `h = s / 2`.

/// Version of the proportion table below.
pub const CATALOG_VERSION: u32 = 1;

/// Data-module shapes.
pub mod body {
    /// `rounded` corner radius, × s.
    pub const ROUNDED_RADIUS: f32 = 0.2;
    /// `extra-rounded` corner radius, × s.
    pub const EXTRA_ROUNDED_RADIUS: f32 = 0.4;
    /// Where the `classy` bottom-right chamfer starts, × s.
    pub const CLASSY_CUT: f32 = 0.7;
    /// `classy-rounded` corner radius, × s.
    pub const CLASSY_ROUNDED_RADIUS: f32 = 0.15;
    /// `dots` radius, × h.
    pub const DOTS_RADIUS: f32 = 0.3;
    /// `dots-rounded` radius, × s.
    pub const DOTS_ROUNDED_RADIUS: f32 = 0.25;
    /// `rounded-dots` radius, × s.
    pub const ROUNDED_DOTS_RADIUS: f32 = 0.3;
    pub const FLOWER_PETALS: usize = 8;
    /// `flower` vertex radius, × h.
    pub const FLOWER_RADIUS: f32 = 0.95;
    pub const STAR_POINTS: usize = 5;
    /// `star` tip radius, × h.
    pub const STAR_OUTER_RADIUS: f32 = 0.95;
    /// `star` notch radius, × h.
    pub const STAR_INNER_RADIUS: f32 = 0.4;
}

/// Outer 7×7 finder ring shapes.
pub mod eye_frame {
    pub const ROUNDED_RADIUS: f32 = 0.3;
    pub const ROUNDED_SINGLE_RADIUS: f32 = 0.2;
    pub const ROUNDED_DOUBLE_RADIUS: f32 = 0.25;
    /// `circle` radius, × s.
    pub const CIRCLE_RADIUS: f32 = 0.5;
    /// `leaf-rounded` tip inset, × s.
    pub const LEAF_ROUNDED_INSET: f32 = 0.1;
    /// `diamond-rounded` tip inset, × s.
    pub const DIAMOND_ROUNDED_INSET: f32 = 0.15;
}

/// Inner 3×3 finder ball shapes.
pub mod eye_ball {
    /// `circle` radius, × h.
    pub const CIRCLE_RADIUS: f32 = 0.6;
    /// `rounded` inset from the box, × s.
    pub const ROUNDED_INSET: f32 = 0.2;
    /// `rounded` corner radius, × s.
    pub const ROUNDED_RADIUS: f32 = 0.15;
    /// `diamond` tip inset, × s.
    pub const DIAMOND_INSET: f32 = 0.2;
    /// `leaf` half height and bulge, × h.
    pub const LEAF_RADIUS: f32 = 0.6;
    pub const STAR_POINTS: usize = 5;
    /// `star` tip radius, × h.
    pub const STAR_OUTER_RADIUS: f32 = 0.6;
    /// `star` notch radius, × h.
    pub const STAR_INNER_RADIUS: f32 = 0.3;
    pub const FLOWER_PETALS: usize = 8;
    /// `flower` vertex radius, × h.
    pub const FLOWER_RADIUS: f32 = 0.5;
    /// `dot` radius, × h.
    pub const DOT_RADIUS: f32 = 0.4;
    // `rounded-square` and `rounded-diamond` have no geometry and draw as `square`.
}
