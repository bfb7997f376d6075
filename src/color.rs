//! Color values for foreground, background and overlay backdrops.

use std::fmt;
use std::str::FromStr;

use palette::{LinSrgb, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected #rgb, #rrggbb, #rrggbbaa or a CSS color name")]
pub struct ParseColorError(String);

/// An 8-bit sRGB color with straight (non-premultiplied) alpha.
///
/// Parses from CSS hex notation (`#rgb`, `#rrggbb`, `#rrggbbaa`) and CSS color
/// names, and serializes back to hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with the given alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns true if the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Formats the RGB channels as `#rrggbb`, ignoring alpha.
    pub fn to_hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn alpha_f32(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// WCAG 2.x relative luminance of the RGB channels.
    pub fn relative_luminance(&self) -> f32 {
        let linear: LinSrgb<f32> = Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// WCAG 2.x contrast ratio between two colors, in `1.0..=21.0`.
    pub fn contrast_ratio(&self, other: &Color) -> f32 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (light, dark) = if a > b { (a, b) } else { (b, a) };
        (light + 0.05) / (dark + 0.05)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_rgb())?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseColorError(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(err());
            }
            // palette handles the 3 and 6 digit forms; the alpha byte is ours
            return match hex.len() {
                3 | 6 => {
                    let rgb = Srgb::<u8>::from_str(trimmed).map_err(|_| err())?;
                    Ok(Self::rgb(rgb.red, rgb.green, rgb.blue))
                }
                8 => {
                    let rgb = Srgb::<u8>::from_str(&trimmed[..7]).map_err(|_| err())?;
                    let a = u8::from_str_radix(&hex[6..], 16).map_err(|_| err())?;
                    Ok(Self::rgba(rgb.red, rgb.green, rgb.blue, a))
                }
                _ => Err(err()),
            };
        }

        let name = trimmed.to_ascii_lowercase();
        if name == "transparent" {
            return Ok(Self::rgba(0, 0, 0, 0));
        }
        palette::named::from_str(&name)
            .map(|rgb| Self::rgb(rgb.red, rgb.green, rgb.blue))
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for resvg::tiny_skia::Color {
    fn from(c: Color) -> Self {
        resvg::tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!("#000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("#FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "#11223380".parse::<Color>().unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn parse_named_colors() {
        assert_eq!("navy".parse::<Color>().unwrap(), Color::rgb(0, 0, 128));
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("transparent".parse::<Color>().unwrap().a, 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("not-a-color".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for color in [Color::BLACK, Color::rgb(18, 52, 86), Color::rgba(1, 2, 3, 4)] {
            assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let parsed: Color = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(parsed, Color::rgb(0, 0, 255));
        assert!(serde_json::from_str::<Color>("\"#xyz\"").is_err());
    }

    #[test]
    fn contrast_extremes() {
        let ratio = Color::BLACK.contrast_ratio(&Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.01, "ratio was {ratio}");
        assert!((Color::WHITE.contrast_ratio(&Color::WHITE) - 1.0).abs() < 1e-6);
        assert_eq!(
            Color::BLACK.contrast_ratio(&Color::WHITE),
            Color::WHITE.contrast_ratio(&Color::BLACK)
        );
    }
}
