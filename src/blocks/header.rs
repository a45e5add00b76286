//! Title and property type badge.

use super::BlockContext;
use crate::layout::{DrawingSurface, Rect, CONTENT_WIDTH, MARGIN};
use crate::model::ListingRecord;

const TITLE_SIZE: f64 = 28.0;
const TITLE_HEIGHT: f64 = 40.0;
const TYPE_SIZE: f64 = 14.0;
/// From the top of the title box to the top of the type label.
const TYPE_OFFSET: f64 = 45.0;
const TYPE_HEIGHT: f64 = 20.0;

/// Draw the header starting at `start_y` and return the bottom of the type
/// label. The advance is the same for every listing.
pub fn draw_header(
    ctx: &BlockContext,
    surface: &mut dyn DrawingSurface,
    record: &ListingRecord,
    start_y: f64,
) -> f64 {
    let title_style = ctx.style(700, TITLE_SIZE, ctx.config.theme.heading).centered();
    // One line only. Long titles lose their tail instead of wrapping.
    let title = ctx
        .text
        .truncate_to_width(ctx.fonts, &record.title, &title_style.font, CONTENT_WIDTH);
    surface.draw_text_in(
        &title,
        &title_style,
        Rect::new(MARGIN, start_y, CONTENT_WIDTH, TITLE_HEIGHT),
    );

    let type_style = ctx.style(500, TYPE_SIZE, ctx.config.theme.accent).centered();
    let type_y = start_y + TYPE_OFFSET;
    surface.draw_text_in(
        &record.property_type.label().to_uppercase(),
        &type_style,
        Rect::new(MARGIN, type_y, CONTENT_WIDTH, TYPE_HEIGHT),
    );

    type_y + TYPE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::testing::{Call, RecordingSurface};
    use crate::config::FlyerConfig;
    use crate::font::FontContext;
    use crate::model::PropertyType;
    use crate::test_support::sample_record;
    use crate::text::TextLayout;

    #[test]
    fn test_header_draws_title_and_uppercase_type() {
        let (fonts, text, config) = (FontContext::new(), TextLayout::new(), FlyerConfig::default());
        let ctx = BlockContext::new(&fonts, &text, &config);
        let mut record = sample_record();
        record.property_type = PropertyType::Industrial;

        let mut surface = RecordingSurface::default();
        let end = draw_header(&ctx, &mut surface, &record, MARGIN);

        assert_eq!(surface.texts(), ["Main St Office", "INDUSTRIAL"]);
        assert_eq!(end, MARGIN + 65.0);
        match surface.find("INDUSTRIAL") {
            Some(Call::TextIn { frame, size, .. }) => {
                assert_eq!(frame.y, 81.0);
                assert_eq!(frame.height, 20.0);
                assert_eq!(*size, 14.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_long_title_is_truncated_to_one_line() {
        let (fonts, text, config) = (FontContext::new(), TextLayout::new(), FlyerConfig::default());
        let ctx = BlockContext::new(&fonts, &text, &config);
        let mut record = sample_record();
        record.title = "Riverside Commerce Park Building Seven Flex Industrial Condominiums".into();

        let mut surface = RecordingSurface::default();
        draw_header(&ctx, &mut surface, &record, MARGIN);

        let title = surface.texts()[0].to_string();
        assert!(record.title.starts_with(&title));
        assert!(title.len() < record.title.len());
        let bold = crate::style::FontSpec::new("Helvetica", 700, 28.0);
        assert!(fonts.measure_string(&title, &bold) <= CONTENT_WIDTH);
    }

    #[test]
    fn test_header_advance_ignores_content() {
        let (fonts, text, config) = (FontContext::new(), TextLayout::new(), FlyerConfig::default());
        let ctx = BlockContext::new(&fonts, &text, &config);
        let mut record = sample_record();
        let mut surface = RecordingSurface::default();
        let a = draw_header(&ctx, &mut surface, &record, MARGIN);
        record.title.clear();
        let b = draw_header(&ctx, &mut surface, &record, MARGIN);
        assert_eq!(a, b);
    }
}
