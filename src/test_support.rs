//! Fixtures shared by unit tests.

use chrono::{TimeZone, Utc};

use crate::model::{ContactInfo, ListingRecord, PriceType, PropertyType, SizeUnit};

/// A typical office listing with only a contact name and no photo.
pub fn sample_record() -> ListingRecord {
    ListingRecord {
        id: "7f2c9a4e".to_string(),
        title: "Main St Office".to_string(),
        property_type: PropertyType::Office,
        size: 5000.0,
        size_unit: SizeUnit::SqFt,
        price: 1_200_000.0,
        price_type: PriceType::ForSale,
        address: "123 Main St".to_string(),
        description: String::new(),
        contact: ContactInfo {
            name: "Jane Doe".to_string(),
            ..Default::default()
        },
        image_data: None,
        created_at: Utc.with_ymd_and_hms(2026, 10, 1, 14, 30, 0).unwrap(),
        updated_at: None,
    }
}
