//! # Listing Model
//!
//! The input to the engine: one commercial property listing. Records are
//! owned by the caller and only ever borrowed by the engine; rendering
//! never writes back to them.
//!
//! The JSON shape uses camelCase keys, the display strings of the enums
//! (`"Office"`, `"sq ft"`, `"For Lease"`) and base64 for the photo.

pub mod format;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A property listing to be rendered into a flyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    /// Opaque identifier, stable for the lifetime of the record.
    pub id: String,
    pub title: String,
    pub property_type: PropertyType,
    pub size: f64,
    pub size_unit: SizeUnit,
    pub price: f64,
    pub price_type: PriceType,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "brokerInfo")]
    pub contact: ContactInfo,
    /// Raw bytes of the property photo, if any.
    #[serde(
        default,
        with = "image_base64",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_data: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListingRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `"$2,500,000"` for sales, `"$3,000/month"` for leases.
    pub fn formatted_price(&self) -> String {
        format!(
            "{}{}",
            format::format_currency(self.price),
            self.price_type.price_suffix()
        )
    }

    /// `"5,000 sq ft"`.
    pub fn formatted_size(&self) -> String {
        format!(
            "{} {}",
            format::format_grouped(self.size),
            self.size_unit.label()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Office,
    Retail,
    Industrial,
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Office,
        PropertyType::Retail,
        PropertyType::Industrial,
        PropertyType::Land,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Office => "Office",
            PropertyType::Retail => "Retail",
            PropertyType::Industrial => "Industrial",
            PropertyType::Land => "Land",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeUnit {
    #[serde(rename = "sq ft")]
    SqFt,
    #[serde(rename = "sq m")]
    SqM,
}

impl SizeUnit {
    pub fn label(&self) -> &'static str {
        match self {
            SizeUnit::SqFt => "sq ft",
            SizeUnit::SqM => "sq m",
        }
    }

    /// Convert an area between units. The renderer never calls this; it
    /// prints sizes in the unit they were entered in.
    pub fn convert(&self, value: f64, to: SizeUnit) -> f64 {
        match (self, to) {
            (SizeUnit::SqFt, SizeUnit::SqM) => value * 0.092903,
            (SizeUnit::SqM, SizeUnit::SqFt) => value * 10.7639,
            _ => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Lease")]
    ForLease,
}

impl PriceType {
    pub fn label(&self) -> &'static str {
        match self {
            PriceType::ForSale => "For Sale",
            PriceType::ForLease => "For Lease",
        }
    }

    pub fn price_suffix(&self) -> &'static str {
        match self {
            PriceType::ForSale => "",
            PriceType::ForLease => "/month",
        }
    }
}

/// Who to call about the listing. Every field is optional; empty strings
/// are simply not drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
}

impl ContactInfo {
    /// Name, phone and email are all filled in. Company is optional.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty() && !self.email.is_empty()
    }
}

/// Serde adapter: `Option<Vec<u8>>` as a base64 string or data URI.
mod image_base64 {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => {
                s.serialize_some(&base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(d)?;
        encoded
            .map(|src| {
                // data:image/png;base64,iVBOR...
                let b64 = match src.find(',') {
                    Some(comma) if src.starts_with("data:") => &src[comma + 1..],
                    _ => src.as_str(),
                };
                base64::engine::general_purpose::STANDARD
                    .decode(b64.trim())
                    .map_err(|e| serde::de::Error::custom(format!("Base64 decode error: {}", e)))
            })
            .transpose()
    }
}
