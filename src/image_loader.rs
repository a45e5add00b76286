//! # Image Decoding
//!
//! Turns the listing photo's raw bytes into something the PDF writer can
//! embed. Every image is fully decoded first, so a file whose header reads
//! but whose pixel data is broken fails here rather than in a PDF viewer.
//! Upright JPEGs are then embedded as-is (PDF supports DCTDecode
//! natively). Everything else, including JPEGs carrying an EXIF rotation,
//! is embedded as RGB pixels with a separate alpha channel for SMask
//! transparency.

use std::io::Cursor;

use image::DynamicImage;

use crate::error::{FlyerError, Result};

/// EXIF tag holding the camera orientation (1-8).
const EXIF_ORIENTATION_TAG: u16 = 0x0112;

/// A fully decoded/loaded image ready for PDF embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub pixel_data: ImagePixelData,
    pub width_px: u32,
    pub height_px: u32,
}

/// The pixel data in a format the PDF serializer can consume directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePixelData {
    /// Raw JPEG bytes, embedded as-is with DCTDecode.
    Jpeg {
        data: Vec<u8>,
        color_space: JpegColorSpace,
        /// Adobe-style CMYK, stored with inverted samples.
        inverted: bool,
    },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes (grayscale alpha). None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
    DeviceCMYK,
}

impl JpegColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            JpegColorSpace::DeviceRGB => "/DeviceRGB",
            JpegColorSpace::DeviceGray => "/DeviceGray",
            JpegColorSpace::DeviceCMYK => "/DeviceCMYK",
        }
    }
}

/// Detect the format from magic bytes and decode accordingly.
pub fn decode_image_bytes(data: &[u8]) -> Result<LoadedImage> {
    if data.len() < 4 {
        return Err(FlyerError::ImageDecodeFailure(
            "Image data too short".to_string(),
        ));
    }

    if is_jpeg(data) {
        decode_jpeg(data)
    } else {
        decode_raster(data)
    }
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

/// JPEG: decode the scan data, then keep the original bytes unless the
/// photo has to be rotated upright.
fn decode_jpeg(data: &[u8]) -> Result<LoadedImage> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| FlyerError::ImageDecodeFailure(format!("Failed to decode JPEG: {}", e)))?;

    let markers = scan_jpeg_markers(data);
    if markers.orientation != 1 {
        return Ok(split_rgba(apply_orientation(img, markers.orientation)));
    }
    let (width, height) = image::GenericImageView::dimensions(&img);

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Jpeg {
            data: data.to_vec(),
            color_space: markers.color_space,
            inverted: markers.color_space == JpegColorSpace::DeviceCMYK && markers.adobe,
        },
        width_px: width,
        height_px: height,
    })
}

/// What the header segments say about a JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JpegMarkers {
    color_space: JpegColorSpace,
    /// EXIF orientation, 1 when absent or out of range.
    orientation: u16,
    /// An APP14 "Adobe" segment is present.
    adobe: bool,
}

/// Walk the header segments up to the start of scan.
fn scan_jpeg_markers(data: &[u8]) -> JpegMarkers {
    let mut markers = JpegMarkers {
        color_space: JpegColorSpace::DeviceRGB,
        orientation: 1,
        adobe: false,
    };

    let mut i = 2; // skip SOI marker (FF D8)
    while i + 3 < data.len() && data[i] == 0xFF {
        let marker = data[i + 1];
        if marker == 0xDA {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        let payload = data
            .get(i + 4..(i + 2 + seg_len).min(data.len()))
            .unwrap_or(&[]);

        match marker {
            // SOF: precision(1) + height(2) + width(2) + num_components(1)
            0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => {
                if let Some(&components) = payload.get(5) {
                    markers.color_space = match components {
                        1 => JpegColorSpace::DeviceGray,
                        4 => JpegColorSpace::DeviceCMYK,
                        _ => JpegColorSpace::DeviceRGB,
                    };
                }
            }
            0xE1 => {
                if let Some(orientation) = exif_orientation(payload) {
                    markers.orientation = orientation;
                }
            }
            0xEE => markers.adobe = payload.starts_with(b"Adobe"),
            _ => {}
        }
        i += 2 + seg_len.max(2);
    }
    markers
}

/// Read the orientation tag from IFD0 of an APP1 Exif payload.
fn exif_orientation(app1: &[u8]) -> Option<u16> {
    let tiff = app1.strip_prefix(b"Exif\0\0")?;
    let big_endian = match tiff.get(0..2)? {
        [b'M', b'M'] => true,
        [b'I', b'I'] => false,
        _ => return None,
    };
    let u16_at = |at: usize| -> Option<u16> {
        let b = tiff.get(at..at + 2)?;
        Some(if big_endian {
            u16::from_be_bytes([b[0], b[1]])
        } else {
            u16::from_le_bytes([b[0], b[1]])
        })
    };
    let u32_at = |at: usize| -> Option<u32> {
        let b = tiff.get(at..at + 4)?;
        Some(if big_endian {
            u32::from_be_bytes([b[0], b[1], b[2], b[3]])
        } else {
            u32::from_le_bytes([b[0], b[1], b[2], b[3]])
        })
    };

    let ifd = u32_at(4)? as usize;
    let count = u16_at(ifd)? as usize;
    (0..count)
        .map(|n| ifd + 2 + n * 12)
        .find(|&entry| u16_at(entry) == Some(EXIF_ORIENTATION_TAG))
        .and_then(|entry| u16_at(entry + 8))
        .filter(|o| (1..=8).contains(o))
}

/// Rotate/flip decoded pixels so the photo is upright.
fn apply_orientation(img: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Anything else the `image` crate recognizes: decode to RGBA, split into
/// RGB + alpha.
fn decode_raster(data: &[u8]) -> Result<LoadedImage> {
    let img = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| FlyerError::ImageDecodeFailure(format!("Format detection error: {}", e)))?
        .decode()
        .map_err(|e| FlyerError::ImageDecodeFailure(e.to_string()))?;

    Ok(split_rgba(img))
}

/// Split decoded pixels into RGB + alpha. The alpha channel is dropped
/// when every pixel is opaque.
fn split_rgba(img: DynamicImage) -> LoadedImage {
    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    let pixel_count = (width as usize) * (height as usize);
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        let a = pixel[3];
        alpha.push(a);
        if a != 255 {
            has_transparency = true;
        }
    }

    LoadedImage {
        pixel_data: ImagePixelData::Decoded {
            rgb,
            alpha: if has_transparency { Some(alpha) } else { None },
        },
        width_px: width,
        height_px: height,
    }
}
