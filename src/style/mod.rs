//! # Text and Color Styles
//!
//! The flyer has a closed set of looks: a bold title, uppercase badge,
//! section headings, accent values and body copy. Each one is a `TextStyle`
//! built from the theme; there is no cascade.

use serde::{Deserialize, Serialize};

/// An RGB color. Serialized as a `#RRGGBB` hex string in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`. Malformed input yields black.
    pub fn hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Self::BLACK)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let (r, g, b) = match hex.len() {
            3 => (
                u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?,
                u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?,
                u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?,
            ),
            6 => (
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            ),
            _ => return None,
        };
        Some(Self::rgb(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
        ))
    }

    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("invalid hex color '{}'", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// A font descriptor: family, numeric weight (100-900) and size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub weight: u32,
    pub size: f64,
}

impl FontSpec {
    pub fn new(family: &str, weight: u32, size: f64) -> Self {
        Self {
            family: family.to_string(),
            weight,
            size,
        }
    }

    /// Weights of 600 and up render with the bold face.
    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Everything needed to measure and draw one run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Color,
    pub align: TextAlign,
    /// Extra space between wrapped lines, in points.
    pub line_spacing: f64,
}

impl TextStyle {
    pub fn new(font: FontSpec, color: Color) -> Self {
        Self {
            font,
            color,
            align: TextAlign::Left,
            line_spacing: 0.0,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_six_digits() {
        let c = Color::hex("#0066CC");
        assert!((c.r - 0.0).abs() < 1e-9);
        assert!((c.g - 0.4).abs() < 1e-9);
        assert!((c.b - 0.8).abs() < 1e-9);
        assert_eq!(c.to_hex(), "#0066CC");
    }

    #[test]
    fn test_hex_three_digits() {
        assert_eq!(Color::hex("#333").to_hex(), "#333333");
    }

    #[test]
    fn test_hex_is_plain_rgb() {
        assert_eq!(
            Color::hex("#FF0000"),
            Color {
                r: 1.0,
                g: 0.0,
                b: 0.0
            }
        );
    }

    #[test]
    fn test_malformed_hex_is_black() {
        assert_eq!(Color::hex("#zzzzzz"), Color::BLACK);
        assert_eq!(Color::hex("#12345"), Color::BLACK);
    }

    #[test]
    fn test_color_serde_as_hex_string() {
        let c: Color = serde_json::from_str("\"#666666\"").unwrap();
        assert_eq!(c.to_hex(), "#666666");
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#666666\"");
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn test_weight_snapping() {
        assert!(FontSpec::new("Helvetica", 600, 16.0).is_bold());
        assert!(FontSpec::new("Helvetica", 700, 28.0).is_bold());
        assert!(!FontSpec::new("Helvetica", 500, 18.0).is_bold());
    }
}
