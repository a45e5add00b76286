//! Flyer configuration.
//!
//! Everything here is cosmetic or belongs to a collaborator. Page size,
//! margins and block offsets are fixed in [`crate::layout`] and cannot be
//! configured.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlyerConfig {
    /// Second footer line.
    pub branding: String,
    /// Standard font family for all text. Unknown families use Helvetica.
    pub font_family: String,
    pub theme: Theme,
    /// Base of the tracking URL encoded into QR codes.
    pub tracking_base_url: String,
    /// Edge length of generated QR bitmaps, in pixels.
    pub qr_size: u32,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        Self {
            branding: "Created with CRE Flyer Maker".to_string(),
            font_family: "Helvetica".to_string(),
            theme: Theme::default(),
            tracking_base_url: "https://creflyer.app/track".to_string(),
            qr_size: 200,
        }
    }
}

impl FlyerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Text colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Title and section headings.
    pub heading: Color,
    /// Property type badge and price/size values.
    pub accent: Color,
    /// Body copy, contact lines and footer.
    pub body: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading: Color::hex("#333333"),
            accent: Color::hex("#0066CC"),
            body: Color::hex("#666666"),
        }
    }
}
