//! # Flyer Composition
//!
//! One listing in, one single-page PDF out. The composer opens a US Letter
//! page, runs Header → Image → Details → Contact → Footer in that order,
//! threading the cursor between the flowed blocks, and serializes the page.
//!
//! The only failure recovered locally is an image that will not decode: it
//! is logged and the flyer is drawn as if there were no photo. Anything
//! else aborts the render and no bytes are returned.

use chrono::{DateTime, FixedOffset};
use log::{debug, warn};

use crate::blocks::{self, BlockContext};
use crate::clock::{Clock, SystemClock};
use crate::config::FlyerConfig;
use crate::error::Result;
use crate::font::FontContext;
use crate::image_loader::{decode_image_bytes, LoadedImage};
use crate::layout::{LayoutPage, PageCanvas, BLOCK_GAP, IMAGE_TOP, MARGIN};
use crate::model::ListingRecord;
use crate::pdf::{Metadata, PdfWriter};
use crate::text::TextLayout;

/// Everything a render needs besides the listing. Build one and share it;
/// it is immutable and safe to use from several threads at once.
pub struct FlyerContext {
    font_context: FontContext,
    text_layout: TextLayout,
    config: FlyerConfig,
    clock: Box<dyn Clock>,
}

impl Default for FlyerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyerContext {
    pub fn new() -> Self {
        Self::with_config(FlyerConfig::default())
    }

    pub fn with_config(config: FlyerConfig) -> Self {
        Self {
            font_context: FontContext::new(),
            text_layout: TextLayout::new(),
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock that stamps the footer and the document date.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &FlyerConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    fn block_context(&self) -> BlockContext<'_> {
        BlockContext::new(&self.font_context, &self.text_layout, &self.config)
    }
}

/// Where each flowed block landed on the page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockExtents {
    pub header_bottom: f64,
    pub image_top: f64,
    pub image_bottom: f64,
    pub details_top: f64,
    pub details_bottom: f64,
    pub contact_top: f64,
    pub contact_bottom: f64,
}

impl BlockExtents {
    pub fn details_height(&self) -> f64 {
        self.details_bottom - self.details_top
    }
}

/// A laid-out flyer, before serialization.
#[derive(Debug, Clone)]
pub struct ComposedFlyer {
    pub page: LayoutPage,
    pub extents: BlockExtents,
    pub generated_at: DateTime<FixedOffset>,
}

pub struct FlyerComposer<'a> {
    context: &'a FlyerContext,
}

impl<'a> FlyerComposer<'a> {
    pub fn new(context: &'a FlyerContext) -> Self {
        Self { context }
    }

    /// Render a listing, using its own photo if it has one.
    pub fn compose(&self, record: &ListingRecord) -> Result<Vec<u8>> {
        self.compose_with_image(record, record.image_data.as_deref())
    }

    /// Render a listing with the given photo bytes instead of the record's.
    pub fn compose_with_image(
        &self,
        record: &ListingRecord,
        image_bytes: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let flyer = self.layout(record, image_bytes)?;
        let metadata = self.metadata(record, flyer.generated_at);
        let bytes = PdfWriter::new().write(std::slice::from_ref(&flyer.page), &metadata)?;
        debug!("Flyer for listing {} is {} bytes", record.id, bytes.len());
        Ok(bytes)
    }

    /// Lay out the page without serializing it.
    pub fn layout(
        &self,
        record: &ListingRecord,
        image_bytes: Option<&[u8]>,
    ) -> Result<ComposedFlyer> {
        let ctx = self.context.block_context();
        let generated_at = self.context.now();
        let image = image_bytes.and_then(|bytes| self.load_image(record, bytes));

        let mut canvas = PageCanvas::new(&self.context.font_context, &self.context.text_layout);

        let header_bottom = blocks::draw_header(&ctx, &mut canvas, record, MARGIN);
        // The photo always starts at the same height, whatever the header drew.
        let image_bottom = blocks::draw_image_block(&mut canvas, image.as_ref(), IMAGE_TOP)?;
        let details_top = image_bottom + BLOCK_GAP;
        let details_bottom = blocks::draw_details(&ctx, &mut canvas, record, details_top);
        let contact_top = details_bottom + BLOCK_GAP;
        let contact_bottom = blocks::draw_contact(&ctx, &mut canvas, record, contact_top);
        blocks::draw_footer(&ctx, &mut canvas, &generated_at);

        let extents = BlockExtents {
            header_bottom,
            image_top: IMAGE_TOP,
            image_bottom,
            details_top,
            details_bottom,
            contact_top,
            contact_bottom,
        };
        debug!("Block extents for listing {}: {:?}", record.id, extents);

        Ok(ComposedFlyer {
            page: canvas.finish(),
            extents,
            generated_at,
        })
    }

    fn load_image(&self, record: &ListingRecord, bytes: &[u8]) -> Option<LoadedImage> {
        match decode_image_bytes(bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Listing {}: {}; rendering without a photo", record.id, e);
                None
            }
        }
    }

    fn metadata(&self, record: &ListingRecord, generated_at: DateTime<FixedOffset>) -> Metadata {
        let contact_name = &record.contact.name;
        Metadata {
            title: record.title.clone(),
            subject: Some(format!(
                "{} {}",
                record.property_type.label(),
                record.price_type.label()
            )),
            author: (!contact_name.is_empty()).then(|| contact_name.clone()),
            creator: self.context.config.branding.clone(),
            creation_date: generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::layout::DrawCommand;
    use crate::test_support::sample_record;

    fn context() -> FlyerContext {
        let at = DateTime::parse_from_rfc3339("2026-10-17T09:00:00-04:00").unwrap();
        FlyerContext::new().with_clock(FixedClock(at))
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, _| image::Rgb([x as u8, 80, 160]));
        let mut buf = Vec::new();
        image::ImageEncoder::write_image(
            image::codecs::png::PngEncoder::new(&mut buf),
            img.as_raw(),
            width,
            height,
            image::ColorType::Rgb8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn test_cursor_without_image() {
        let ctx = context();
        let mut record = sample_record();
        record.address.clear();
        let flyer = FlyerComposer::new(&ctx).layout(&record, None).unwrap();
        let e = flyer.extents;

        assert_eq!(e.header_bottom, 101.0);
        assert_eq!(e.image_bottom, 120.0);
        assert_eq!(e.details_top, 150.0);
        assert_eq!(e.details_bottom, 210.0);
        assert_eq!(e.contact_top, 240.0);
        assert_eq!(e.contact_bottom, 285.0);
    }

    #[test]
    fn test_cursor_with_image() {
        let ctx = context();
        let flyer = FlyerComposer::new(&ctx)
            .layout(&sample_record(), Some(png(40, 20).as_slice()))
            .unwrap();
        assert_eq!(flyer.extents.image_bottom, 120.0 + 270.0);
        assert_eq!(flyer.extents.details_top, 420.0);
        let images = flyer
            .page
            .elements
            .iter()
            .filter(|el| matches!(el.draw, DrawCommand::Image { .. }))
            .count();
        assert_eq!(images, 1);
    }

    #[test]
    fn test_undecodable_image_renders_without_photo() {
        let ctx = context();
        let composer = FlyerComposer::new(&ctx);
        let broken = composer.layout(&sample_record(), Some(&b"not an image"[..])).unwrap();
        let absent = composer.layout(&sample_record(), None).unwrap();
        assert_eq!(broken.extents, absent.extents);
    }

    #[test]
    fn test_compose_uses_record_image() {
        let ctx = context();
        let mut record = sample_record();
        record.image_data = Some(png(4, 4));
        let pdf = FlyerComposer::new(&ctx).compose(&record).unwrap();
        assert!(String::from_utf8_lossy(&pdf).contains("/Subtype /Image"));
    }

    #[test]
    fn test_metadata_from_listing() {
        let ctx = context();
        let mut record = sample_record();
        let composer = FlyerComposer::new(&ctx);
        let meta = composer.metadata(&record, ctx.now());
        assert_eq!(meta.title, "Main St Office");
        assert_eq!(meta.subject.as_deref(), Some("Office For Sale"));
        assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
        assert_eq!(meta.creator, "Created with CRE Flyer Maker");

        record.contact.name.clear();
        assert!(composer.metadata(&record, ctx.now()).author.is_none());
    }

    #[test]
    fn test_context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlyerContext>();
    }
}
