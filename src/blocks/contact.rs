//! Contact information.

use super::BlockContext;
use crate::layout::{DrawingSurface, MARGIN};
use crate::model::ListingRecord;

const HEADING_ADVANCE: f64 = 25.0;
const LINE_ADVANCE: f64 = 20.0;

/// Draw the contact block at `start_y`: a heading, then one line per
/// non-empty field in the order name, company, phone, email.
pub fn draw_contact(
    ctx: &BlockContext,
    surface: &mut dyn DrawingSurface,
    record: &ListingRecord,
    start_y: f64,
) -> f64 {
    let body = ctx.body_style();
    let contact = &record.contact;

    surface.draw_text_at("CONTACT INFORMATION", &ctx.heading_style(), MARGIN, start_y);
    let mut y = start_y + HEADING_ADVANCE;

    let lines = [
        (!contact.name.is_empty()).then(|| contact.name.clone()),
        (!contact.company.is_empty()).then(|| contact.company.clone()),
        (!contact.phone.is_empty()).then(|| format!("Phone: {}", contact.phone)),
        (!contact.email.is_empty()).then(|| format!("Email: {}", contact.email)),
    ];
    for line in lines.iter().flatten() {
        surface.draw_text_at(line, &body, MARGIN, y);
        y += LINE_ADVANCE;
    }

    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::testing::RecordingSurface;
    use crate::config::FlyerConfig;
    use crate::font::FontContext;
    use crate::model::ContactInfo;
    use crate::test_support::sample_record;
    use crate::text::TextLayout;

    fn run(contact: ContactInfo) -> (f64, Vec<String>) {
        let (fonts, text, config) = (FontContext::new(), TextLayout::new(), FlyerConfig::default());
        let ctx = BlockContext::new(&fonts, &text, &config);
        let mut record = sample_record();
        record.contact = contact;
        let mut surface = RecordingSurface::default();
        let end = draw_contact(&ctx, &mut surface, &record, 240.0);
        (end, surface.texts().into_iter().map(String::from).collect())
    }

    #[test]
    fn test_name_only() {
        let (end, texts) = run(ContactInfo {
            name: "Jane Doe".into(),
            ..Default::default()
        });
        assert_eq!(texts, ["CONTACT INFORMATION", "Jane Doe"]);
        assert_eq!(end, 285.0);
    }

    #[test]
    fn test_all_fields_in_order() {
        let (end, texts) = run(ContactInfo {
            name: "Jane Doe".into(),
            phone: "555-0100".into(),
            email: "jane@example.com".into(),
            company: "Acme Realty".into(),
        });
        assert_eq!(
            texts,
            [
                "CONTACT INFORMATION",
                "Jane Doe",
                "Acme Realty",
                "Phone: 555-0100",
                "Email: jane@example.com"
            ]
        );
        assert_eq!(end, 240.0 + 25.0 + 80.0);
    }

    #[test]
    fn test_no_fields_draws_heading_only() {
        let (end, texts) = run(ContactInfo::default());
        assert_eq!(texts, ["CONTACT INFORMATION"]);
        assert_eq!(end, 265.0);
    }

    #[test]
    fn test_email_without_phone() {
        let (_, texts) = run(ContactInfo {
            email: "leasing@example.com".into(),
            ..Default::default()
        });
        assert_eq!(texts, ["CONTACT INFORMATION", "Email: leasing@example.com"]);
    }
}
