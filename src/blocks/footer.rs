//! Generation date and branding, pinned to the bottom margin.

use chrono::{DateTime, FixedOffset};

use super::BlockContext;
use crate::clock::long_date;
use crate::layout::{DrawingSurface, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};

const FOOTER_SIZE: f64 = 10.0;
/// Branding sits this far above the date line.
const BRANDING_RISE: f64 = 15.0;

/// Draw the footer. It does not take part in the cursor flow and may
/// overlap a contact block that runs long.
pub fn draw_footer(
    ctx: &BlockContext,
    surface: &mut dyn DrawingSurface,
    generated_at: &DateTime<FixedOffset>,
) {
    let style = ctx.style(400, FOOTER_SIZE, ctx.config.theme.body);
    let date_line = format!("Generated on {}", long_date(generated_at));
    let footer_y = PAGE_HEIGHT - MARGIN - ctx.fonts.line_height(&style.font);

    let centered_x = |text: &str| (PAGE_WIDTH - ctx.fonts.measure_string(text, &style.font)) / 2.0;

    surface.draw_text_at(&date_line, &style, centered_x(&date_line), footer_y);
    let branding = &ctx.config.branding;
    surface.draw_text_at(branding, &style, centered_x(branding), footer_y - BRANDING_RISE);
}
