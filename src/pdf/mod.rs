//! # PDF Serializer
//!
//! Takes the laid-out flyer page and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer covering only what a flyer needs:
//! standard Type1 fonts, raster image XObjects and rectangular clipping.
//! Every collection is walked in a fixed order, so the same page always
//! produces the same bytes.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, images, pages, content streams)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root and info objects
//! %%EOF
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use chrono::{DateTime, FixedOffset, Utc};
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::{FlyerError, Result};
use crate::font::StandardFont;
use crate::image_loader::{ImagePixelData, LoadedImage};
use crate::layout::{DrawCommand, LayoutElement, LayoutPage};

/// Document information dictionary entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub creator: String,
    pub creation_date: DateTime<FixedOffset>,
}

#[derive(Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<Vec<u8>>,
    /// Font used on any page, with its object id. Resource name is `/F{index}`.
    font_objects: Vec<(StandardFont, usize)>,
    /// Image XObject ids per page, in drawing order. Resource name is `/Im{index}`.
    page_images: Vec<Vec<usize>>,
}

impl PdfBuilder {
    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Result<Vec<u8>> {
        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        let mut builder = PdfBuilder {
            objects: vec![Vec::new(), Vec::new(), Vec::new()],
            font_objects: Vec::new(),
            page_images: Vec::new(),
        };

        self.register_fonts(&mut builder, pages);
        self.register_images(&mut builder, pages);

        let mut page_obj_ids = Vec::with_capacity(pages.len());
        for (page_idx, page) in pages.iter().enumerate() {
            let content = self.build_content_stream(page, &builder.font_objects);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            )?;
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.push(content_data);

            let mut resources = format!(
                "/Font << {} >>",
                self.build_font_resource_dict(&builder.font_objects)
            );
            let images = &builder.page_images[page_idx];
            if !images.is_empty() {
                let entries: Vec<String> = images
                    .iter()
                    .enumerate()
                    .map(|(i, id)| format!("/Im{} {} 0 R", i, id))
                    .collect();
                let _ = write!(resources, " /XObject << {} >>", entries.join(" "));
            }

            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                page.width, page.height, content_obj_id, resources
            );
            page_obj_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1] = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: Vec<String> = page_obj_ids.iter().map(|id| format!("{} 0 R", id)).collect();
        builder.objects[2] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.push(Self::build_info_dict(metadata).into_bytes());

        self.serialize(&builder, info_obj_id)
    }

    fn build_info_dict(metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        let _ = write!(info, "/Title ({}) ", Self::encode_text(&metadata.title));
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", Self::encode_text(subject));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", Self::encode_text(author));
        }
        let _ = write!(
            info,
            "/Creator ({}) /Producer (flyer {}) /CreationDate ({}) >>",
            Self::encode_text(&metadata.creator),
            env!("CARGO_PKG_VERSION"),
            Self::pdf_date(&metadata.creation_date)
        );
        info
    }

    /// `D:YYYYMMDDHHmmSSZ`, always in UTC.
    fn pdf_date(at: &DateTime<FixedOffset>) -> String {
        at.with_timezone(&Utc).format("D:%Y%m%d%H%M%SZ").to_string()
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(
        &self,
        page: &LayoutPage,
        font_objects: &[(StandardFont, usize)],
    ) -> String {
        let mut stream = String::new();
        let mut image_counter = 0usize;
        for element in &page.elements {
            self.write_element(
                &mut stream,
                element,
                page.height,
                font_objects,
                &mut image_counter,
            );
        }
        stream
    }

    /// Write a single layout element as PDF operators.
    fn write_element(
        &self,
        stream: &mut String,
        element: &LayoutElement,
        page_height: f64,
        font_objects: &[(StandardFont, usize)],
        image_counter: &mut usize,
    ) {
        let frame = &element.frame;
        // PDF's origin is bottom-left.
        let bottom = page_height - frame.y - frame.height;

        match &element.draw {
            DrawCommand::Text { lines, color, clip } => {
                if lines.is_empty() {
                    return;
                }
                let _ = write!(stream, "q\n");
                if *clip {
                    let _ = write!(
                        stream,
                        "{:.2} {:.2} {:.2} {:.2} re W n\n",
                        frame.x, bottom, frame.width, frame.height
                    );
                }
                let _ = write!(stream, "BT\n{:.3} {:.3} {:.3} rg\n", color.r, color.g, color.b);

                for line in lines {
                    let font_idx = Self::font_index(line.font, font_objects);
                    let _ = write!(
                        stream,
                        "/F{} {:.1} Tf\n1 0 0 1 {:.2} {:.2} Tm\n({}) Tj\n",
                        font_idx,
                        line.font_size,
                        line.x,
                        page_height - line.baseline,
                        Self::encode_text(&line.text)
                    );
                }

                let _ = write!(stream, "ET\nQ\n");
            }

            DrawCommand::Image { .. } => {
                let _ = write!(
                    stream,
                    "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                    frame.width, frame.height, frame.x, bottom, image_counter
                );
                *image_counter += 1;
            }
        }
    }

    /// Register every face used across all pages, in a stable order.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let mut fonts: BTreeSet<StandardFont> = pages
            .iter()
            .flat_map(|page| page.text_lines().map(|line| line.font))
            .collect();

        // Always have at least Helvetica
        if fonts.is_empty() {
            fonts.insert(StandardFont::Helvetica);
        }

        for font in fonts {
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            let obj_id = builder.push(font_dict.into_bytes());
            builder.font_objects.push((font, obj_id));
        }
    }

    fn register_images(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        for page in pages {
            let mut ids = Vec::new();
            for element in &page.elements {
                if let DrawCommand::Image { image } = &element.draw {
                    ids.push(Self::write_image_xobject(builder, image));
                }
            }
            builder.page_images.push(ids);
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg {
                data,
                color_space,
                inverted,
            } => {
                let decode = if *inverted {
                    " /Decode [1 0 1 0 1 0 1 0]"
                } else {
                    ""
                };
                let mut obj_data = format!(
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace {}{} \
                     /BitsPerComponent 8 \
                     /Filter /DCTDecode \
                     /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space.pdf_name(),
                    decode,
                    data.len()
                )
                .into_bytes();
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                builder.push(obj_data)
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                // SMask goes first so the image can reference it
                let smask_ref = alpha
                    .as_ref()
                    .map(|alpha_data| {
                        let id =
                            Self::push_flate_image(builder, image, "/DeviceGray", alpha_data, "");
                        format!(" /SMask {} 0 R", id)
                    })
                    .unwrap_or_default();
                Self::push_flate_image(builder, image, "/DeviceRGB", rgb, &smask_ref)
            }
        }
    }

    fn push_flate_image(
        builder: &mut PdfBuilder,
        image: &LoadedImage,
        color_space: &str,
        samples: &[u8],
        extra: &str,
    ) -> usize {
        let compressed = compress_to_vec_zlib(samples, 6);
        let mut obj_data = format!(
            "<< /Type /XObject /Subtype /Image \
             /Width {} /Height {} \
             /ColorSpace {} \
             /BitsPerComponent 8 \
             /Filter /FlateDecode \
             /Length {}{} >>\nstream\n",
            image.width_px,
            image.height_px,
            color_space,
            compressed.len(),
            extra
        )
        .into_bytes();
        obj_data.extend_from_slice(&compressed);
        obj_data.extend_from_slice(b"\nendstream");
        builder.push(obj_data)
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The `/F{n}` index of a face. Every face on the page was registered,
    /// so the fallback to the first font is never hit in practice.
    fn font_index(font: StandardFont, font_objects: &[(StandardFont, usize)]) -> usize {
        font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }

    /// Encode text as the body of a PDF literal string in WinAnsiEncoding.
    /// Characters outside the encoding become `?`.
    fn encode_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// holds typographic punctuation and a few accented letters.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98),
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Result<Vec<u8>> {
        let object_count = builder.objects.len();
        let body_len: usize = builder.objects.iter().map(|o| o.len() + 32).sum();
        let estimate = 64 + body_len + object_count * 20 + 128;

        let mut output: Vec<u8> = Vec::new();
        output
            .try_reserve(estimate)
            .map_err(|e| FlyerError::SerializationFailure(e.to_string()))?;
        let mut offsets: Vec<usize> = vec![0; object_count];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            write!(output, "{} 0 obj\n", i)?;
            output.extend_from_slice(obj);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        write!(output, "xref\n0 {}\n", object_count)?;
        write!(output, "0000000000 65535 f \n")?;
        for offset in offsets.iter().skip(1) {
            write!(output, "{:010} 00000 n \n", offset)?;
        }

        write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count, info_obj_id, xref_offset
        )?;

        Ok(output)
    }
}
