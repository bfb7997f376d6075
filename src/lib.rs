//! qrstyle: styled QR code rendering
//!
//! This crate draws QR module matrices with decorative shapes: rounded or
//! dotted body modules, custom finder frames and balls, colors, and an
//! optional center logo placed in a keep-clear region. Output is either an
//! RGBA raster or an SVG document.
//!
//! # Example
//!
//! ```
//! use qrstyle::{
//!     BodyShape, Color, EyeBallShape, EyeFrameShape, QrCodeEncoder, QrCompositor,
//!     RenderConfig, SvgSurface,
//! };
//!
//! let config = RenderConfig::new()
//!     .with_body_shape(BodyShape::Dots)
//!     .with_eye_frame_shape(EyeFrameShape::RoundedSingle)
//!     .with_eye_ball_shape(EyeBallShape::Circle)
//!     .with_foreground(Color::rgb(0x1e, 0x3a, 0x8a));
//!
//! let compositor = QrCompositor::new(config);
//! let rendered = compositor
//!     .render_text::<SvgSurface>(&QrCodeEncoder::default(), "https://example.com")
//!     .unwrap();
//!
//! assert!(rendered.output.as_str().starts_with("<svg"));
//! ```
//!
//! # Center Logos
//!
//! An overlay reserves a square block of modules in the middle of the code.
//! When the block would touch a finder pattern, or the image cannot be
//! decoded, the code is rendered without the overlay and the reason is
//! reported in [`Rendered::warnings`]:
//!
//! ```
//! use qrstyle::{OverlaySource, QrCompositor, RenderConfig, RenderWarning, encode_to_matrix, EcLevel};
//!
//! let matrix = encode_to_matrix("hello", EcLevel::H).unwrap();
//! let config = RenderConfig::new().with_overlay(OverlaySource::from_bytes(b"not an image".to_vec()));
//! let rendered = QrCompositor::new(config).render_image(&matrix).unwrap();
//!
//! assert!(rendered.overlay_region.is_none());
//! assert!(matches!(rendered.warnings[0], RenderWarning::OverlayDecodeFailure { .. }));
//! ```

mod color;
mod compositor;
mod config;
mod error;
mod finder;
mod geometry;
mod matrix;
mod overlay;
mod shape;
mod source;
mod surface;

pub use color::{Color, ParseColorError};
pub use compositor::{
    BODY_DECORATION_OPACITY, EYE_DECORATION_OPACITY, MIN_CONTRAST_RATIO, QrCompositor, Rendered,
};
pub use config::{
    DEFAULT_MODULE_SIZE_PX, DEFAULT_OVERLAY_FRACTION, DEFAULT_QUIET_ZONE_MODULES, RenderConfig,
    ShapePolicy,
};
pub use error::{MatrixDefect, OverlayError, RegionConflict, RenderError, RenderWarning};
pub use finder::{AnchorId, FINDER_SIZE, FinderAnchor, ModuleClass, classify, locate};
pub use geometry::{
    FillRule, PathDescriptor, Point, Rect, Segment, body_path, eye_ball_path, eye_frame_path,
    proportions,
};
pub use matrix::{MIN_MATRIX_SIZE, ModuleMatrix};
pub use overlay::{OverlayClip, OverlayPlacement, OverlayRegion};
pub use shape::{BodyShape, EyeBallShape, EyeFrameShape};
pub use source::{EcLevel, MatrixSource, OverlaySource, QrCodeEncoder, encode_to_matrix};
pub use surface::{Canvas, Fill, PixmapSurface, RenderSurface, SvgDocument, SvgSurface};
