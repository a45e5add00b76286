//! # Page Layout
//!
//! A flyer is one US Letter page. Blocks are stacked top-down by threading
//! a cursor (a Y offset from the top edge) from one block to the next. The
//! geometry below is fixed; downstream consumers rely on it.
//!
//! Blocks never talk to the PDF writer directly. They draw onto a
//! [`DrawingSurface`]; the real one, [`PageCanvas`], turns every call into a
//! positioned [`LayoutElement`] using the same line breaker that the
//! measurer uses, so what was measured is exactly what gets drawn.

pub mod fit;

use crate::font::{FontContext, StandardFont};
use crate::image_loader::LoadedImage;
use crate::style::{Color, TextAlign, TextStyle};
use crate::text::TextLayout;

/// US Letter at 72 units per inch.
pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
pub const MARGIN: f64 = 36.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

/// Top of the photo block, in page coordinates. Fixed, not derived from
/// the header's height.
pub const IMAGE_TOP: f64 = 120.0;
pub const MAX_IMAGE_HEIGHT: f64 = 300.0;
/// Gap above the details block and above the contact block.
pub const BLOCK_GAP: f64 = 30.0;

/// An axis-aligned rectangle in page coordinates (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A fully laid-out page ready for PDF serialization.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<LayoutElement>,
}

impl LayoutPage {
    pub fn letter() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            elements: Vec::new(),
        }
    }

    /// The text of every line on the page, in drawing order.
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.elements.iter().flat_map(|el| match &el.draw {
            DrawCommand::Text { lines, .. } => lines.as_slice(),
            DrawCommand::Image { .. } => &[][..],
        })
    }
}

/// A positioned element on a page.
#[derive(Debug, Clone)]
pub struct LayoutElement {
    /// Absolute position on the page (top-left corner).
    pub frame: Rect,
    pub draw: DrawCommand,
}

/// What to actually draw for this element.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Draw text lines. When `clip` is set, nothing outside the frame shows.
    Text {
        lines: Vec<TextLine>,
        color: Color,
        clip: bool,
    },
    /// Draw an image scaled into the frame.
    Image { image: LoadedImage },
}

/// One line of text, positioned at its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f64,
    /// Top of the line box.
    pub y: f64,
    pub baseline: f64,
    pub text: String,
    pub width: f64,
    pub font: StandardFont,
    pub font_size: f64,
}

/// Something blocks can draw onto.
pub trait DrawingSurface {
    /// Draw a single unwrapped line with the top-left of its line box at
    /// `(x, y)`.
    fn draw_text_at(&mut self, text: &str, style: &TextStyle, x: f64, y: f64);

    /// Word-wrap `text` into `frame`. Lines that start below the frame are
    /// dropped and the rest is clipped to it.
    fn draw_text_in(&mut self, text: &str, style: &TextStyle, frame: Rect);

    fn draw_image(&mut self, image: &LoadedImage, frame: Rect);
}

/// The real drawing surface: records positioned elements for one page.
pub struct PageCanvas<'a> {
    font_context: &'a FontContext,
    text_layout: &'a TextLayout,
    page: LayoutPage,
}

impl<'a> PageCanvas<'a> {
    pub fn new(font_context: &'a FontContext, text_layout: &'a TextLayout) -> Self {
        Self {
            font_context,
            text_layout,
            page: LayoutPage::letter(),
        }
    }

    pub fn finish(self) -> LayoutPage {
        self.page
    }

    fn make_line(
        &self,
        text: String,
        width: f64,
        style: &TextStyle,
        x: f64,
        y: f64,
    ) -> TextLine {
        TextLine {
            x,
            y,
            baseline: y + self.font_context.baseline_offset(&style.font),
            text,
            width,
            font: self.font_context.resolve(&style.font),
            font_size: style.font.size,
        }
    }
}

impl DrawingSurface for PageCanvas<'_> {
    fn draw_text_at(&mut self, text: &str, style: &TextStyle, x: f64, y: f64) {
        if text.is_empty() {
            return;
        }
        let width = self.font_context.measure_string(text, &style.font);
        let height = self.font_context.line_height(&style.font);
        let line = self.make_line(text.to_string(), width, style, x, y);
        self.page.elements.push(LayoutElement {
            frame: Rect::new(x, y, width, height),
            draw: DrawCommand::Text {
                lines: vec![line],
                color: style.color,
                clip: false,
            },
        });
    }

    fn draw_text_in(&mut self, text: &str, style: &TextStyle, frame: Rect) {
        let broken =
            self.text_layout
                .break_into_lines(self.font_context, text, &style.font, frame.width);
        let line_height = self.font_context.line_height(&style.font);

        let mut lines = Vec::with_capacity(broken.len());
        let mut y = frame.y;
        for line in broken {
            if y >= frame.bottom() {
                break;
            }
            let x = match style.align {
                TextAlign::Left => frame.x,
                TextAlign::Center => frame.x + (frame.width - line.width) / 2.0,
            };
            lines.push(self.make_line(line.text, line.width, style, x, y));
            y += line_height + style.line_spacing;
        }

        if lines.is_empty() {
            return;
        }
        self.page.elements.push(LayoutElement {
            frame,
            draw: DrawCommand::Text {
                lines,
                color: style.color,
                clip: true,
            },
        });
    }

    fn draw_image(&mut self, image: &LoadedImage, frame: Rect) {
        self.page.elements.push(LayoutElement {
            frame,
            draw: DrawCommand::Image {
                image: image.clone(),
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontSpec;

    fn body() -> TextStyle {
        TextStyle::new(FontSpec::new("Helvetica", 400, 14.0), Color::BLACK)
    }

    #[test]
    fn test_geometry() {
        assert_eq!(CONTENT_WIDTH, 540.0);
        assert_eq!(LayoutPage::letter().width, 612.0);
        assert_eq!(LayoutPage::letter().height, 792.0);
    }

    #[test]
    fn test_draw_text_at_single_line() {
        let fc = FontContext::new();
        let tl = TextLayout::new();
        let mut canvas = PageCanvas::new(&fc, &tl);
        canvas.draw_text_at("PRICE", &body(), 36.0, 150.0);
        let page = canvas.finish();

        let lines: Vec<_> = page.text_lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "PRICE");
        assert_eq!(lines[0].y, 150.0);
        assert!(lines[0].baseline > 150.0 && lines[0].baseline < 150.0 + 16.8);
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let fc = FontContext::new();
        let tl = TextLayout::new();
        let mut canvas = PageCanvas::new(&fc, &tl);
        canvas.draw_text_at("", &body(), 36.0, 150.0);
        canvas.draw_text_in("", &body(), Rect::new(36.0, 150.0, 540.0, 40.0));
        assert!(canvas.finish().elements.is_empty());
    }

    #[test]
    fn test_draw_text_in_drops_lines_below_frame() {
        let fc = FontContext::new();
        let tl = TextLayout::new();
        let mut canvas = PageCanvas::new(&fc, &tl);
        // 16.8pt lines start at 0, 16.8, 33.6, 50.4; the fourth is past 40
        canvas.draw_text_in("a\nb\nc\nd", &body(), Rect::new(36.0, 100.0, 540.0, 40.0));
        let page = canvas.finish();

        let texts: Vec<_> = page.text_lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
        match &page.elements[0].draw {
            DrawCommand::Text { clip, .. } => assert!(*clip),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn test_centered_line() {
        let fc = FontContext::new();
        let tl = TextLayout::new();
        let mut canvas = PageCanvas::new(&fc, &tl);
        canvas.draw_text_in("OFFICE", &body().centered(), Rect::new(36.0, 81.0, 540.0, 20.0));
        let page = canvas.finish();
        let line = page.text_lines().next().unwrap();
        let left = line.x - 36.0;
        let right = 576.0 - (line.x + line.width);
        assert!((left - right).abs() < 1e-9);
    }
}
