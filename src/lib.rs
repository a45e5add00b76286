//! # Flyer
//!
//! A single-page PDF flyer engine for commercial real-estate listings.
//!
//! A flyer is always exactly one US Letter page with the same five blocks
//! in the same order: a title header, the property photo, price/size/
//! address/description details, contact information, and a footer. Text is
//! measured with the same line breaker that draws it, so a block's height
//! is known before anything below it is placed. Text that does not fit its
//! box is clipped; there is never a second page.
//!
//! ## Architecture
//!
//! ```text
//! ListingRecord (JSON/API)
//!       ↓
//!   [compose]  — FlyerContext + FlyerComposer, threads the cursor
//!       ↓
//!   [blocks]   — Header → Image → Details → Contact → Footer
//!       ↓
//!   [layout]   — PageCanvas turns draw calls into positioned elements
//!       ↓
//!   [pdf]      — Serialize to PDF bytes
//! ```
//!
//! `font`, `text` and `image_loader` are leaf services used by the layers
//! above. `qr` produces tracking URLs and QR bitmaps for sharing; it is
//! not part of the page.

pub mod blocks;
pub mod clock;
pub mod compose;
pub mod config;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod qr;
pub mod style;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use compose::{FlyerComposer, FlyerContext};
pub use config::FlyerConfig;
pub use error::{FlyerError, Result};
pub use model::ListingRecord;

/// Render a listing to PDF bytes with the default configuration.
///
/// This is the primary entry point. The footer date is the current local
/// date; build a [`FlyerContext`] with a fixed clock for repeatable output.
pub fn render(record: &ListingRecord) -> Result<Vec<u8>> {
    let context = FlyerContext::new();
    FlyerComposer::new(&context).compose(record)
}

/// Render a listing described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>> {
    let record = ListingRecord::from_json(json)?;
    render(&record)
}
