//! Structured error types for the flyer engine.
//!
//! Only two of these ever reach a caller of `compose`: a serialization
//! failure, or an invalid image size that slipped past upstream checks.
//! Decode failures are caught by the composer and the image is dropped.

use thiserror::Error;

/// The unified error type returned by all public flyer API functions.
#[derive(Debug, Error)]
pub enum FlyerError {
    /// Image fitting was asked to scale an image with a zero, negative or
    /// non-finite natural size.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: f64, height: f64 },

    /// The raw bytes could not be decoded as a raster image.
    #[error("Failed to decode image: {0}")]
    ImageDecodeFailure(String),

    /// Writing the final page buffer failed. No partial buffer is returned.
    #[error("Failed to serialize PDF: {0}")]
    SerializationFailure(String),

    /// JSON input (listing or config) failed to parse.
    #[error("Failed to parse input: {source}{hint}")]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The QR collaborator could not encode the given content.
    #[error("Failed to encode QR code: {0}")]
    QrEncodeFailure(String),
}

pub type Result<T> = std::result::Result<T, FlyerError>;

impl From<serde_json::Error> for FlyerError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters."
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the listing schema. Check field names and enum values."
            }
            serde_json::error::Category::Eof => "Unexpected end of input. Is the JSON truncated?",
            serde_json::error::Category::Io => "",
        };
        let hint = if hint.is_empty() {
            String::new()
        } else {
            format!("\n  Hint: {}", hint)
        };
        FlyerError::ParseError { source: e, hint }
    }
}

impl From<std::io::Error> for FlyerError {
    fn from(e: std::io::Error) -> Self {
        FlyerError::SerializationFailure(e.to_string())
    }
}
