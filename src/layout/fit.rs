//! Scaling the listing photo into its box.

use crate::error::{FlyerError, Result};

/// A scaled image rectangle. `x_offset` is measured from the left page
/// edge and centers the image within the content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedImage {
    pub width: f64,
    pub height: f64,
    pub x_offset: f64,
}

pub struct ImageFitter {
    content_width: f64,
    margin: f64,
}

impl ImageFitter {
    pub fn new(content_width: f64, margin: f64) -> Self {
        Self {
            content_width,
            margin,
        }
    }

    /// Scale `natural_width × natural_height` to fill `max_width`, shrinking
    /// further if that would exceed `max_height`. Aspect ratio is preserved.
    pub fn fit(
        &self,
        natural_width: f64,
        natural_height: f64,
        max_width: f64,
        max_height: f64,
    ) -> Result<FittedImage> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(natural_width) || !valid(natural_height) {
            return Err(FlyerError::InvalidImageDimensions {
                width: natural_width,
                height: natural_height,
            });
        }

        let aspect = natural_width / natural_height;
        let mut width = max_width;
        let mut height = width / aspect;
        if height > max_height {
            height = max_height;
            width = height * aspect;
        }

        Ok(FittedImage {
            width,
            height,
            x_offset: self.margin + (self.content_width - width) / 2.0,
        })
    }
}
