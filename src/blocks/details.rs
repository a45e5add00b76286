//! Price and size row, address, and description.

use super::BlockContext;
use crate::layout::{DrawingSurface, Rect, CONTENT_WIDTH, MARGIN};
use crate::model::ListingRecord;

const COLUMN_GAP: f64 = 20.0;
const LABEL_ADVANCE: f64 = 20.0;
const VALUE_ROW_HEIGHT: f64 = 60.0;
const ADDRESS_BOX_HEIGHT: f64 = 40.0;
const DESCRIPTION_GAP: f64 = 10.0;
const DESCRIPTION_MAX_HEIGHT: f64 = 200.0;
const DESCRIPTION_LINE_SPACING: f64 = 4.0;

/// Draw the details block starting at `start_y` and return its bottom.
///
/// The price/size row is always 60pt. Address and description are skipped
/// entirely when empty; when present, the address takes a fixed 40pt box
/// and the description takes its measured height up to 200pt. Anything
/// past those limits is clipped.
pub fn draw_details(
    ctx: &BlockContext,
    surface: &mut dyn DrawingSurface,
    record: &ListingRecord,
    start_y: f64,
) -> f64 {
    let heading = ctx.heading_style();
    let value = ctx.style(500, 18.0, ctx.config.theme.accent);
    let body = ctx.body_style();

    let mut y = start_y;

    let column_width = (CONTENT_WIDTH - COLUMN_GAP) / 2.0;
    let right_x = MARGIN + column_width + COLUMN_GAP;
    surface.draw_text_at("PRICE", &heading, MARGIN, y);
    surface.draw_text_at(&record.formatted_price(), &value, MARGIN, y + LABEL_ADVANCE);
    surface.draw_text_at("SIZE", &heading, right_x, y);
    surface.draw_text_at(&record.formatted_size(), &value, right_x, y + LABEL_ADVANCE);
    y += VALUE_ROW_HEIGHT;

    if !record.address.is_empty() {
        surface.draw_text_at("ADDRESS", &heading, MARGIN, y);
        y += LABEL_ADVANCE;
        surface.draw_text_in(
            &record.address,
            &body,
            Rect::new(MARGIN, y, CONTENT_WIDTH, ADDRESS_BOX_HEIGHT),
        );
        y += ADDRESS_BOX_HEIGHT;
    }

    if !record.description.is_empty() {
        y += DESCRIPTION_GAP;
        surface.draw_text_at("DESCRIPTION", &heading, MARGIN, y);
        y += LABEL_ADVANCE;

        let paragraph = body.with_line_spacing(DESCRIPTION_LINE_SPACING);
        let measured = ctx.text.measure(
            ctx.fonts,
            &record.description,
            &paragraph.font,
            CONTENT_WIDTH,
            DESCRIPTION_LINE_SPACING,
        );
        surface.draw_text_in(
            &record.description,
            &paragraph,
            Rect::new(MARGIN, y, CONTENT_WIDTH, DESCRIPTION_MAX_HEIGHT),
        );
        y += measured.height.min(DESCRIPTION_MAX_HEIGHT);
    }

    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::testing::{Call, RecordingSurface};
    use crate::config::FlyerConfig;
    use crate::font::FontContext;
    use crate::test_support::sample_record;
    use crate::text::TextLayout;

    const START: f64 = 150.0;

    fn run(record: &ListingRecord) -> (f64, RecordingSurface) {
        let (fonts, text, config) = (FontContext::new(), TextLayout::new(), FlyerConfig::default());
        let ctx = BlockContext::new(&fonts, &text, &config);
        let mut surface = RecordingSurface::default();
        let end = draw_details(&ctx, &mut surface, record, START);
        (end, surface)
    }

    #[test]
    fn test_empty_address_and_description_is_just_the_row() {
        let mut record = sample_record();
        record.address.clear();
        record.description.clear();

        let (end, surface) = run(&record);
        assert_eq!(end - START, 60.0);
        assert_eq!(surface.texts(), ["PRICE", "$1,200,000", "SIZE", "5,000 sq ft"]);
    }

    #[test]
    fn test_size_column_position() {
        let (_, surface) = run(&sample_record());
        match surface.find("SIZE") {
            Some(Call::TextAt { x, y, weight, .. }) => {
                assert_eq!(*x, 36.0 + 260.0 + 20.0);
                assert_eq!(*y, START);
                assert_eq!(*weight, 600);
            }
            other => panic!("unexpected {:?}", other),
        }
        match surface.find("5,000 sq ft") {
            Some(Call::TextAt { y, size, .. }) => {
                assert_eq!(*y, START + 20.0);
                assert_eq!(*size, 18.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_address_takes_fixed_box() {
        let mut record = sample_record();
        record.address = "123 Main St".into();
        let (end, surface) = run(&record);
        assert_eq!(end - START, 60.0 + 20.0 + 40.0);
        match surface.find("123 Main St") {
            Some(Call::TextIn { frame, .. }) => {
                assert_eq!(*frame, Rect::new(36.0, START + 80.0, 540.0, 40.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_short_description_uses_measured_height() {
        let mut record = sample_record();
        record.address.clear();
        record.description = "Corner unit.".into();
        let (end, surface) = run(&record);
        // One 14pt line is 16.8pt tall
        assert!((end - START - (60.0 + 10.0 + 20.0 + 16.8)).abs() < 1e-9);
        assert!(surface.find("DESCRIPTION").is_some());
        match surface.find("Corner unit.") {
            Some(Call::TextIn { line_spacing, frame, .. }) => {
                assert_eq!(*line_spacing, 4.0);
                assert_eq!(frame.height, 200.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_long_description_capped() {
        let mut record = sample_record();
        record.address.clear();
        record.description = "Renovated lobby with new elevators. ".repeat(200);
        let (end, _) = run(&record);
        assert_eq!(end - START, 60.0 + 10.0 + 20.0 + 200.0);
    }

    #[test]
    fn test_height_monotonic_in_text_length() {
        let mut previous = 0.0;
        for n in 0..80 {
            let mut record = sample_record();
            record.address = "Suite ".repeat(n);
            record.description = "Great visibility from the highway. ".repeat(n);
            let (end, _) = run(&record);
            let height = end - START;
            assert!(height >= previous, "height shrank at n = {}", n);
            assert!(height <= 60.0 + 20.0 + 40.0 + 10.0 + 20.0 + 200.0);
            previous = height;
        }
    }
}
