//! # Text Layout
//!
//! Line breaking and text measurement.
//!
//! Breaking is greedy and only happens at whitespace; there is no
//! hyphenation. A word wider than the whole line is split between
//! characters. The canvas draws with exactly the lines this module
//! produces, so a measured height is always the drawn height.

use crate::font::FontContext;
use crate::style::FontSpec;

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    /// The text of the line, trailing whitespace removed.
    pub text: String,
    /// Width of `text` in points.
    pub width: f64,
}

/// Result of measuring a paragraph against a maximum width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub line_count: usize,
    pub height: f64,
}

pub struct TextLayout;

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break a string into lines that fit within `max_width`.
    ///
    /// Empty text produces no lines. Explicit newlines always end a line.
    ///
    /// # Panics
    ///
    /// Panics if `max_width` is not a positive, finite number.
    pub fn break_into_lines(
        &self,
        font_context: &FontContext,
        text: &str,
        font: &FontSpec,
        max_width: f64,
    ) -> Vec<BrokenLine> {
        assert!(
            max_width > 0.0 && max_width.is_finite(),
            "max_width must be positive and finite, got {}",
            max_width
        );
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = normalize_newlines(text).chars().collect();
        let char_widths: Vec<f64> = chars
            .iter()
            .map(|&ch| font_context.char_width(ch, font))
            .collect();

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            if ch == '\n' {
                lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                line_start = i + 1;
                line_width = 0.0;
                last_break_point = None;
                continue;
            }

            let char_width = char_widths[i];

            // Whitespace may hang past the edge; it is trimmed from the line.
            if !ch.is_whitespace() && line_width + char_width > max_width && line_start < i {
                if let Some(bp) = last_break_point.filter(|bp| *bp >= line_start) {
                    let break_at = bp + 1;
                    lines.push(self.make_line(
                        &chars[line_start..break_at],
                        &char_widths[line_start..break_at],
                    ));
                    line_start = break_at;
                    line_width = char_widths[line_start..i].iter().sum();
                    last_break_point = None;
                }

                // Still too wide: the word itself is longer than the line.
                if line_width + char_width > max_width && line_start < i {
                    lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                    line_start = i;
                    line_width = 0.0;
                }
            }

            if ch.is_whitespace() {
                last_break_point = Some(i);
            }
            line_width += char_width;
        }

        if line_start < chars.len() {
            lines.push(self.make_line(&chars[line_start..], &char_widths[line_start..]));
        }

        lines
    }

    /// Count lines and compute the block height of `text` wrapped to
    /// `max_width`. `line_spacing` is added between lines, not after the last.
    pub fn measure(
        &self,
        font_context: &FontContext,
        text: &str,
        font: &FontSpec,
        max_width: f64,
        line_spacing: f64,
    ) -> TextMetrics {
        let lines = self.break_into_lines(font_context, text, font, max_width);
        let line_count = lines.len();
        TextMetrics {
            line_count,
            height: block_height(line_count, font_context.line_height(font), line_spacing),
        }
    }

    /// The longest prefix of `text`, flattened to one line, that fits in
    /// `max_width`.
    pub fn truncate_to_width(
        &self,
        font_context: &FontContext,
        text: &str,
        font: &FontSpec,
        max_width: f64,
    ) -> String {
        let flat: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        let mut width = 0.0;
        let mut out = String::with_capacity(flat.len());
        for ch in flat.chars() {
            width += font_context.char_width(ch, font);
            if width > max_width {
                break;
            }
            out.push(ch);
        }
        out
    }

    /// Create a BrokenLine, trimming trailing whitespace from text and width.
    fn make_line(&self, chars: &[char], widths: &[f64]) -> BrokenLine {
        let mut end = chars.len();
        while end > 0 && chars[end - 1].is_whitespace() {
            end -= 1;
        }
        BrokenLine {
            text: chars[..end].iter().collect(),
            width: widths[..end].iter().sum(),
        }
    }
}

/// Height of `line_count` stacked lines with `spacing` between them.
pub fn block_height(line_count: usize, line_height: f64, spacing: f64) -> f64 {
    if line_count == 0 {
        return 0.0;
    }
    line_count as f64 * line_height + (line_count - 1) as f64 * spacing
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
