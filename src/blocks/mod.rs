//! # Flyer Blocks
//!
//! The page is five blocks drawn in a fixed order. Each block takes the Y
//! at which it starts and returns the Y at which it ends, so the composer
//! can thread a cursor through them. The footer is the exception: it is
//! pinned to the bottom of the page and ignores the cursor.
//!
//! Blocks only see a [`DrawingSurface`], which keeps them testable with a
//! recording mock.

pub mod contact;
pub mod details;
pub mod footer;
pub mod header;
pub mod image;

use crate::config::FlyerConfig;
use crate::font::FontContext;
use crate::style::{Color, FontSpec, TextStyle};
use crate::text::TextLayout;

pub use contact::draw_contact;
pub use details::draw_details;
pub use footer::draw_footer;
pub use header::draw_header;
pub use image::draw_image_block;

/// Shared, read-only services a block needs besides the surface.
#[derive(Clone, Copy)]
pub struct BlockContext<'a> {
    pub fonts: &'a FontContext,
    pub text: &'a TextLayout,
    pub config: &'a FlyerConfig,
}

impl<'a> BlockContext<'a> {
    pub fn new(fonts: &'a FontContext, text: &'a TextLayout, config: &'a FlyerConfig) -> Self {
        Self {
            fonts,
            text,
            config,
        }
    }

    pub(crate) fn style(&self, weight: u32, size: f64, color: Color) -> TextStyle {
        TextStyle::new(FontSpec::new(&self.config.font_family, weight, size), color)
    }

    /// Semibold 16pt section heading.
    pub(crate) fn heading_style(&self) -> TextStyle {
        self.style(600, 16.0, self.config.theme.heading)
    }

    /// Regular 14pt body copy.
    pub(crate) fn body_style(&self) -> TextStyle {
        self.style(400, 14.0, self.config.theme.body)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::image_loader::LoadedImage;
    use crate::layout::{DrawingSurface, Rect};
    use crate::style::TextStyle;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        TextAt {
            text: String,
            x: f64,
            y: f64,
            size: f64,
            weight: u32,
        },
        TextIn {
            text: String,
            frame: Rect,
            size: f64,
            line_spacing: f64,
        },
        Image {
            frame: Rect,
        },
    }

    /// Records every draw call instead of producing page elements.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::TextAt { text, .. } | Call::TextIn { text, .. } => Some(text.as_str()),
                    Call::Image { .. } => None,
                })
                .collect()
        }

        pub fn find(&self, needle: &str) -> Option<&Call> {
            self.calls.iter().find(|c| match c {
                Call::TextAt { text, .. } | Call::TextIn { text, .. } => text == needle,
                Call::Image { .. } => false,
            })
        }
    }

    impl DrawingSurface for RecordingSurface {
        fn draw_text_at(&mut self, text: &str, style: &TextStyle, x: f64, y: f64) {
            self.calls.push(Call::TextAt {
                text: text.to_string(),
                x,
                y,
                size: style.font.size,
                weight: style.font.weight,
            });
        }

        fn draw_text_in(&mut self, text: &str, style: &TextStyle, frame: Rect) {
            self.calls.push(Call::TextIn {
                text: text.to_string(),
                frame,
                size: style.font.size,
                line_spacing: style.line_spacing,
            });
        }

        fn draw_image(&mut self, _image: &LoadedImage, frame: Rect) {
            self.calls.push(Call::Image { frame });
        }
    }
}
