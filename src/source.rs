//! Inputs from outside the renderer: the QR encoder that produces module
//! matrices, and the overlay image sources.

use image::RgbaImage;
use qrcode::QrCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OverlayError, RenderError};
use crate::matrix::ModuleMatrix;
use crate::surface::render_svg;

// ============================================================================
// Matrix sources
// ============================================================================

/// Something that turns text into a module matrix.
pub trait MatrixSource {
    /// Encodes `text`. Encoder failures are returned as
    /// [`RenderError::Encoding`] without reinterpretation.
    fn encode(&self, text: &str) -> Result<ModuleMatrix, RenderError>;
}

/// QR error correction level. Higher levels survive larger overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EcLevel {
    /// Recovers about 7% of codewords.
    L,
    /// Recovers about 15% of codewords.
    M,
    /// Recovers about 25% of codewords.
    Q,
    /// Recovers about 30% of codewords.
    #[default]
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// [`MatrixSource`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QrCodeEncoder {
    pub ec_level: EcLevel,
}

impl QrCodeEncoder {
    pub fn new(ec_level: EcLevel) -> Self {
        Self { ec_level }
    }
}

impl MatrixSource for QrCodeEncoder {
    fn encode(&self, text: &str) -> Result<ModuleMatrix, RenderError> {
        encode_to_matrix(text, self.ec_level)
    }
}

/// Encodes `text` at `ec_level` with the smallest fitting QR version.
pub fn encode_to_matrix(text: &str, ec_level: EcLevel) -> Result<ModuleMatrix, RenderError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level.into())?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();
    debug!(width, ?ec_level, bytes = text.len(), "Encoded QR matrix");
    ModuleMatrix::new(width, modules)
}

// ============================================================================
// Overlay sources
// ============================================================================

/// A center image, either already decoded or still to be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlaySource {
    /// Encoded raster bytes in any format the `image` crate recognizes.
    Encoded(Vec<u8>),
    /// An already decoded image.
    Image(RgbaImage),
    /// SVG markup, rasterized at the placement size.
    Svg(String),
}

impl OverlaySource {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Encoded(bytes.into())
    }

    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self::Svg(svg.into())
    }

    /// Produces pixels for an overlay drawn `target_px` pixels wide.
    ///
    /// Raster images keep their own resolution; surfaces scale them when
    /// drawing. SVG is rasterized directly at `target_px`.
    pub fn load(&self, target_px: u32) -> Result<RgbaImage, OverlayError> {
        let image = match self {
            OverlaySource::Encoded(bytes) => image::load_from_memory(bytes)?.to_rgba8(),
            OverlaySource::Image(image) => image.clone(),
            OverlaySource::Svg(svg) => {
                render_svg(svg, target_px.max(1)).ok_or(OverlayError::InvalidSvg)?
            }
        };
        if image.width() == 0 || image.height() == 0 {
            return Err(OverlayError::Empty);
        }
        debug!(width = image.width(), height = image.height(), "Loaded overlay image");
        Ok(image)
    }
}

impl From<RgbaImage> for OverlaySource {
    fn from(image: RgbaImage) -> Self {
        Self::Image(image)
    }
}
