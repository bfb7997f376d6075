//! Error and warning types for the render pipeline.
//!
//! Fatal conditions are [`RenderError`]s and abort a render. Everything else
//! degrades the output and is reported as a [`RenderWarning`] on the
//! [`Rendered`](crate::Rendered) result.

use thiserror::Error;

use crate::finder::AnchorId;
use crate::overlay::OverlayRegion;

// ============================================================================
// Fatal errors
// ============================================================================

/// Errors that abort a render call.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The module matrix violates a structural invariant.
    #[error("invalid {size}x{size} module matrix: {defect}")]
    InvalidMatrix { size: usize, defect: MatrixDefect },

    /// A render setting is out of range.
    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    /// The QR encoder rejected the input, passed through unchanged.
    #[error("QR encoding failed: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    /// The output backend could not allocate its target.
    #[error("render surface error: {0}")]
    Surface(String),
}

/// What is wrong with a [`ModuleMatrix`](crate::ModuleMatrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixDefect {
    #[error("side length must be odd")]
    EvenSize,

    #[error("side length is below the version 1 minimum of {min}")]
    TooSmall { min: usize },

    #[error("expected {expected} modules, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

// ============================================================================
// Overlay placement and decoding
// ============================================================================

/// The planned keep-clear region cannot be placed without damaging the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionConflict {
    #[error("overlay region {region} intrudes on the {anchor} finder pattern")]
    Finder {
        anchor: AnchorId,
        region: OverlayRegion,
    },

    #[error("overlay region of {region_size} modules does not fit a {matrix_size}-module matrix")]
    OutOfBounds {
        region_size: usize,
        matrix_size: usize,
    },
}

/// Why an overlay image could not be loaded.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("failed to decode overlay image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("overlay SVG could not be parsed or rendered")]
    InvalidSvg,

    #[error("overlay image has no pixels")]
    Empty,
}

// ============================================================================
// Warnings
// ============================================================================

/// Conditions that reduce fidelity without failing the render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderWarning {
    /// The overlay was skipped because its region would cover a finder pattern.
    #[error("overlay skipped: {0}")]
    RegionConflict(RegionConflict),

    /// The overlay image could not be decoded and was left out.
    #[error("overlay skipped: {reason}")]
    OverlayDecodeFailure { reason: String },

    /// Foreground and background are too close for reliable scanning.
    #[error("foreground/background contrast ratio {ratio:.2} is below {min:.1}")]
    LowContrast { ratio: f32, min: f32 },

    /// A shape was drawn under [`ShapePolicy::Replace`](crate::ShapePolicy)
    /// without the plain modules readers rely on.
    #[error("{slot} shape `{shape}` replaces plain modules; standard readers may reject the code")]
    UnscannableShape {
        slot: &'static str,
        shape: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_matrix_message_names_the_defect() {
        let err = RenderError::InvalidMatrix {
            size: 20,
            defect: MatrixDefect::EvenSize,
        };
        assert_eq!(err.to_string(), "invalid 20x20 module matrix: side length must be odd");
    }

    #[test]
    fn region_conflict_message_names_the_anchor() {
        let conflict = RegionConflict::Finder {
            anchor: AnchorId::TopLeft,
            region: OverlayRegion {
                row_start: 6,
                col_start: 6,
                size_modules: 9,
            },
        };
        let msg = RenderWarning::RegionConflict(conflict).to_string();
        assert!(msg.contains("top-left"));
        assert!(msg.contains("9x9"));
    }

    #[test]
    fn unscannable_shape_message_names_slot_and_shape() {
        let warning = RenderWarning::UnscannableShape {
            slot: "eye frame",
            shape: "circle",
        };
        assert_eq!(
            warning.to_string(),
            "eye frame shape `circle` replaces plain modules; standard readers may reject the code"
        );
    }
}
