//! The listing photo.

use crate::error::Result;
use crate::image_loader::LoadedImage;
use crate::layout::fit::ImageFitter;
use crate::layout::{DrawingSurface, Rect, CONTENT_WIDTH, MARGIN, MAX_IMAGE_HEIGHT};

/// Draw the photo at `start_y`, scaled to the content width and at most
/// 300pt tall, centered horizontally. Without a photo nothing is drawn and
/// `start_y` comes back unchanged.
pub fn draw_image_block(
    surface: &mut dyn DrawingSurface,
    image: Option<&LoadedImage>,
    start_y: f64,
) -> Result<f64> {
    let Some(image) = image else {
        return Ok(start_y);
    };

    let fitted = ImageFitter::new(CONTENT_WIDTH, MARGIN).fit(
        image.width_px as f64,
        image.height_px as f64,
        CONTENT_WIDTH,
        MAX_IMAGE_HEIGHT,
    )?;
    surface.draw_image(
        image,
        Rect::new(fitted.x_offset, start_y, fitted.width, fitted.height),
    );

    Ok(start_y + fitted.height)
}
