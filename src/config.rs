//! Render settings.
//!
//! A [`RenderConfig`] holds everything that controls how a matrix is drawn.
//! It serializes to JSON so presets can be saved and shared; the overlay image
//! itself is runtime-only and never serialized.
//!
//! # Example
//!
//! ```
//! use qrstyle::{BodyShape, Color, EyeFrameShape, RenderConfig};
//!
//! let config = RenderConfig::new()
//!     .with_body_shape(BodyShape::Dots)
//!     .with_eye_frame_shape(EyeFrameShape::RoundedSingle)
//!     .with_foreground(Color::rgb(0x1e, 0x3a, 0x8a));
//!
//! let json = config.to_json().unwrap();
//! let restored = RenderConfig::from_json(&json).unwrap();
//! assert_eq!(restored.body_shape, BodyShape::Dots);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RenderError;
use crate::overlay::OverlayClip;
use crate::shape::{BodyShape, EyeBallShape, EyeFrameShape};
use crate::source::OverlaySource;

/// Default module edge in pixels.
pub const DEFAULT_MODULE_SIZE_PX: f32 = 10.0;

/// Default quiet zone, the minimum the QR standard asks for.
pub const DEFAULT_QUIET_ZONE_MODULES: usize = 4;

/// Default share of the symbol edge requested for the overlay.
pub const DEFAULT_OVERLAY_FRACTION: f32 = 0.2;

// ============================================================================
// ShapePolicy
// ============================================================================

/// How decorative shapes relate to the plain modules they stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ShapePolicy {
    /// Shapes are drawn instead of plain squares. Shapes that break the
    /// finder or timing structure raise
    /// [`RenderWarning::UnscannableShape`](crate::RenderWarning).
    Replace,

    /// Plain squares are always drawn; shapes are layered on top as
    /// translucent decoration. Every shape combination stays readable.
    #[default]
    Underlay,
}

// ============================================================================
// RenderConfig
// ============================================================================

/// Settings for one render.
///
/// # JSON Format
///
/// ```json
/// {
///   "moduleSizePx": 10.0,
///   "quietZoneModules": 4,
///   "foregroundColor": "#000000",
///   "backgroundColor": "#ffffff",
///   "bodyShape": "dots",
///   "eyeFrameShape": "circle",
///   "eyeBallShape": "star",
///   "shapePolicy": "underlay",
///   "overlayFraction": 0.2,
///   "overlayClip": "circle"
/// }
/// ```
///
/// Missing fields take their defaults and unknown shape names read as
/// `"square"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RenderConfig {
    /// Edge length of one module in pixels. Must be positive.
    pub module_size_px: f32,

    /// Blank margin around the matrix, in modules.
    pub quiet_zone_modules: usize,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub foreground_color: Color,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub background_color: Color,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub body_shape: BodyShape,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub eye_frame_shape: EyeFrameShape,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub eye_ball_shape: EyeBallShape,

    pub shape_policy: ShapePolicy,

    /// Requested overlay edge as a share of the symbol edge, in `(0, 1]`.
    pub overlay_fraction: f32,

    pub overlay_clip: OverlayClip,

    /// Center image. Not serialized.
    #[serde(skip)]
    #[cfg_attr(feature = "jsonschema", schemars(skip))]
    pub overlay: Option<OverlaySource>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            module_size_px: DEFAULT_MODULE_SIZE_PX,
            quiet_zone_modules: DEFAULT_QUIET_ZONE_MODULES,
            foreground_color: Color::BLACK,
            background_color: Color::WHITE,
            body_shape: BodyShape::Square,
            eye_frame_shape: EyeFrameShape::Square,
            eye_ball_shape: EyeBallShape::Square,
            shape_policy: ShapePolicy::Underlay,
            overlay_fraction: DEFAULT_OVERLAY_FRACTION,
            overlay_clip: OverlayClip::Circle,
            overlay: None,
        }
    }
}

impl RenderConfig {
    /// Creates a config with default settings: black squares on white, no
    /// overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks numeric settings.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.module_size_px.is_finite() || self.module_size_px <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "module size must be a positive number of pixels, got {}",
                self.module_size_px
            )));
        }
        if !(self.overlay_fraction > 0.0 && self.overlay_fraction <= 1.0) {
            return Err(RenderError::InvalidConfig(format!(
                "overlay fraction must be in (0, 1], got {}",
                self.overlay_fraction
            )));
        }
        Ok(())
    }

    pub fn with_module_size(mut self, px: f32) -> Self {
        self.module_size_px = px;
        self
    }

    pub fn with_quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone_modules = modules;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground_color = color;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_body_shape(mut self, shape: BodyShape) -> Self {
        self.body_shape = shape;
        self
    }

    pub fn with_eye_frame_shape(mut self, shape: EyeFrameShape) -> Self {
        self.eye_frame_shape = shape;
        self
    }

    pub fn with_eye_ball_shape(mut self, shape: EyeBallShape) -> Self {
        self.eye_ball_shape = shape;
        self
    }

    pub fn with_shape_policy(mut self, policy: ShapePolicy) -> Self {
        self.shape_policy = policy;
        self
    }

    /// Sets the center image.
    pub fn with_overlay(mut self, source: impl Into<OverlaySource>) -> Self {
        self.overlay = Some(source.into());
        self
    }

    pub fn with_overlay_fraction(mut self, fraction: f32) -> Self {
        self.overlay_fraction = fraction;
        self
    }

    pub fn with_overlay_clip(mut self, clip: OverlayClip) -> Self {
        self.overlay_clip = clip;
        self
    }

    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// JSON schema of the serialized form.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RenderConfig)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::new();
        assert_eq!(config.module_size_px, 10.0);
        assert_eq!(config.quiet_zone_modules, 4);
        assert_eq!(config.overlay_fraction, 0.2);
        assert_eq!(config.shape_policy, ShapePolicy::Underlay);
        assert!(config.overlay.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_uses_camel_case_and_catalog_names() {
        let config = RenderConfig::new()
            .with_body_shape(BodyShape::ExtraRounded)
            .with_shape_policy(ShapePolicy::Replace)
            .with_overlay_clip(OverlayClip::RoundedSquare);
        let json = config.to_json_pretty().unwrap();

        assert!(json.contains("\"moduleSizePx\""));
        assert!(json.contains("\"bodyShape\": \"extra-rounded\""));
        assert!(json.contains("\"shapePolicy\": \"replace\""));
        assert!(json.contains("\"overlayClip\": \"rounded-square\""));
        assert!(json.contains("\"foregroundColor\": \"#000000\""));
        assert!(!json.contains("overlay\""));
    }

    #[test]
    fn roundtrip_drops_only_the_overlay() {
        let config = RenderConfig::new()
            .with_eye_ball_shape(EyeBallShape::Star)
            .with_background(Color::rgb(250, 240, 230))
            .with_overlay(OverlaySource::from_bytes(vec![1, 2, 3]));
        let restored = RenderConfig::from_json(&config.to_json().unwrap()).unwrap();

        assert_eq!(restored.eye_ball_shape, EyeBallShape::Star);
        assert_eq!(restored.background_color, Color::rgb(250, 240, 230));
        assert!(restored.overlay.is_none());
    }

    #[test]
    fn empty_json_is_default() {
        let config = RenderConfig::from_json("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn unknown_shapes_read_as_square() {
        let config =
            RenderConfig::from_json(r#"{"bodyShape": "spiral", "eyeFrameShape": "pattern9"}"#)
                .unwrap();
        assert_eq!(config.body_shape, BodyShape::Square);
        assert_eq!(config.eye_frame_shape, EyeFrameShape::Square);
    }

    #[test]
    fn bad_colors_are_rejected() {
        assert!(RenderConfig::from_json(r##"{"foregroundColor": "#zz0000"}"##).is_err());
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        for px in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                RenderConfig::new().with_module_size(px).validate(),
                Err(RenderError::InvalidConfig(_))
            ));
        }
        for fraction in [0.0, -0.1, 1.5, f32::NAN] {
            assert!(RenderConfig::new().with_overlay_fraction(fraction).validate().is_err());
        }
        assert!(RenderConfig::new().with_overlay_fraction(1.0).validate().is_ok());
    }
}
