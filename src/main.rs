//! # Flyer CLI
//!
//! Usage:
//!   flyer listing.json -o flyer.pdf
//!   echo '{ ... }' | flyer -o flyer.pdf --image photo.jpg
//!   flyer listing.json --qr share.png
//!   flyer --example > listing.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use flyer::qr::{qr_content, tracking_url, QrGenerator};
use flyer::{FlyerComposer, FlyerConfig, FlyerContext, ListingRecord};

#[derive(Parser, Debug)]
#[command(
    name = "flyer",
    version,
    about = "Render a commercial real-estate listing to a one-page PDF flyer"
)]
struct Cli {
    /// Listing JSON. Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Where to write the PDF
    #[arg(short, long, value_name = "PATH", default_value = "flyer.pdf")]
    output: PathBuf,
    /// Property photo, overriding any imageData in the listing
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,
    /// Flyer configuration JSON
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Also write a QR code PNG for sharing the listing
    #[arg(long, value_name = "PATH")]
    qr: Option<PathBuf>,
    /// Print an example listing and exit
    #[arg(long)]
    example: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_listing_json());
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    let record = ListingRecord::from_json(&input)?;

    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            FlyerConfig::from_json(&json)?
        }
        None => FlyerConfig::default(),
    };
    let context = FlyerContext::with_config(config);

    let image = match &cli.image {
        Some(path) => Some(
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };
    let image_bytes = image.as_deref().or(record.image_data.as_deref());

    let pdf_bytes = FlyerComposer::new(&context).compose_with_image(&record, image_bytes)?;
    fs::write(&cli.output, &pdf_bytes)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    eprintln!(
        "✓ Written {} bytes to {}",
        pdf_bytes.len(),
        cli.output.display()
    );

    if let Some(qr_path) = &cli.qr {
        let config = context.config();
        let url = tracking_url(&config.tracking_base_url, &record.id, &context.now());
        let png = QrGenerator::new(config.qr_size).generate_png(&qr_content(&record, &url))?;
        fs::write(qr_path, &png)
            .with_context(|| format!("Failed to write {}", qr_path.display()))?;
        eprintln!("✓ Written QR code to {}", qr_path.display());
    }

    Ok(())
}

/// Warnings and errors go to stderr unless `RUST_LOG` asks for more.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn example_listing_json() -> &'static str {
    r##"{
  "id": "6f1d2c3a-8b4e-4f5a-9c7d-2e1b0a9f8c7d",
  "title": "Main St Office",
  "propertyType": "Office",
  "size": 5000,
  "sizeUnit": "sq ft",
  "price": 1200000,
  "priceType": "For Sale",
  "address": "123 Main St, Springfield, IL 62701",
  "description": "Two-story professional office building with a renovated lobby, 18 private offices, two conference rooms and 24 surface parking spaces. Walking distance to the courthouse and downtown restaurants.",
  "contact": {
    "name": "Jane Doe",
    "company": "Acme Commercial Realty",
    "phone": "(217) 555-0100",
    "email": "jane.doe@example.com"
  },
  "createdAt": "2026-10-01T14:30:00Z"
}
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_warnings_are_not_discarded() {
        init_logging();
        assert!(log::log_enabled!(log::Level::Warn));
    }

    #[test]
    fn test_example_listing_parses() {
        let record = ListingRecord::from_json(example_listing_json()).unwrap();
        assert_eq!(record.title, "Main St Office");
        assert!(record.contact.is_complete());
    }
}
