//! # Font Management
//!
//! The flyer only uses the standard PDF fonts, which never need embedding.
//! A `FontContext` resolves a `FontSpec` to one of them and answers width
//! and line-height questions for the text measurer and the canvas.

pub mod metrics;

pub use metrics::StandardFontMetrics;
use std::collections::HashMap;

use crate::style::FontSpec;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// The standard PDF faces the engine can draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica => &metrics::HELVETICA,
            Self::HelveticaBold => &metrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierBold => &metrics::COURIER,
        }
    }
}

/// Maps a (family, bold) pair to a standard face.
pub struct FontRegistry {
    fonts: HashMap<(String, bool), StandardFont>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let standard_mappings = [
            (("helvetica", false), StandardFont::Helvetica),
            (("helvetica", true), StandardFont::HelveticaBold),
            (("courier", false), StandardFont::Courier),
            (("courier", true), StandardFont::CourierBold),
        ];

        let fonts = standard_mappings
            .into_iter()
            .map(|((family, bold), font)| ((family.to_string(), bold), font))
            .collect();

        Self { fonts }
    }

    /// Look up a face, falling back to Helvetica for unknown families.
    pub fn resolve(&self, family: &str, bold: bool) -> StandardFont {
        self.fonts
            .get(&(family.to_ascii_lowercase(), bold))
            .copied()
            .unwrap_or(if bold {
                StandardFont::HelveticaBold
            } else {
                StandardFont::Helvetica
            })
    }
}

/// Shared font context used by text measurement, the page canvas and
/// PDF serialization.
#[derive(Default)]
pub struct FontContext {
    registry: FontRegistry,
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    pub fn resolve(&self, font: &FontSpec) -> StandardFont {
        self.registry.resolve(&font.family, font.is_bold())
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: &FontSpec) -> f64 {
        self.resolve(font).metrics().char_width(ch, font.size)
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font: &FontSpec) -> f64 {
        self.resolve(font).metrics().measure_string(text, font.size)
    }

    pub fn line_height(&self, font: &FontSpec) -> f64 {
        font.size * LINE_HEIGHT_FACTOR
    }

    /// Distance from the top of a line box to the baseline.
    ///
    /// The glyph box (ascender to descender) is centered in the line box.
    pub fn baseline_offset(&self, font: &FontSpec) -> f64 {
        let m = self.resolve(font).metrics();
        let ascent = m.ascender as f64 / 1000.0 * font.size;
        let glyph_height = (m.ascender - m.descender) as f64 / 1000.0 * font.size;
        (self.line_height(font) - glyph_height) / 2.0 + ascent
    }
}
