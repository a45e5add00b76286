//! # QR Codes
//!
//! Tracking URLs and QR bitmaps for sharing a listing. This sits beside
//! the flyer engine: nothing here is drawn on the page. Callers decide what
//! to do with the PNG (attach it to a share, print it separately).

use chrono::{DateTime, FixedOffset};
use image::{GrayImage, ImageEncoder, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::{FlyerError, Result};
use crate::model::ListingRecord;

/// Light modules around the symbol, per the QR standard.
const QUIET_ZONE: usize = 4;

/// `{base}/{id}?t={unix seconds}`.
pub fn tracking_url(base: &str, id: &str, at: &DateTime<FixedOffset>) -> String {
    format!("{}/{}?t={}", base.trim_end_matches('/'), id, at.timestamp())
}

/// The text encoded into a listing's QR code.
pub fn qr_content(record: &ListingRecord, tracking_url: &str) -> String {
    let contact = &record.contact;
    [
        tracking_url.to_string(),
        String::new(),
        format!("Property: {}", record.title),
        format!("Type: {}", record.property_type.label()),
        format!("Price: {}", record.formatted_price()),
        format!("Size: {}", record.formatted_size()),
        String::new(),
        format!("Contact: {}", contact.name),
        format!("Phone: {}", contact.phone),
        format!("Email: {}", contact.email),
    ]
    .join("\n")
}

/// Renders QR symbols as square grayscale PNGs.
#[derive(Debug, Clone, Copy)]
pub struct QrGenerator {
    pub size_px: u32,
}

impl QrGenerator {
    pub fn new(size_px: u32) -> Self {
        Self { size_px }
    }

    /// Encode `content` at the highest error correction level and return
    /// PNG bytes. The image is `size_px` square, or one pixel per module if
    /// `size_px` is smaller than the symbol.
    pub fn generate_png(&self, content: &str) -> Result<Vec<u8>> {
        let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::H)
            .map_err(|e| FlyerError::QrEncodeFailure(e.to_string()))?;

        let modules = code.width() + 2 * QUIET_ZONE;
        let edge = (self.size_px as usize).max(modules);

        let bitmap = GrayImage::from_fn(edge as u32, edge as u32, |x, y| {
            // Nearest module for this pixel, shifted by the quiet zone
            let mx = (x as usize * modules / edge).checked_sub(QUIET_ZONE);
            let my = (y as usize * modules / edge).checked_sub(QUIET_ZONE);
            let dark = match (mx, my) {
                (Some(mx), Some(my)) if mx < code.width() && my < code.width() => {
                    code[(mx, my)] == qrcode::Color::Dark
                }
                _ => false,
            };
            Luma([if dark { 0 } else { 255 }])
        });

        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(
                bitmap.as_raw(),
                bitmap.width(),
                bitmap.height(),
                image::ColorType::L8,
            )
            .map_err(|e| FlyerError::QrEncodeFailure(e.to_string()))?;
        Ok(png)
    }
}
