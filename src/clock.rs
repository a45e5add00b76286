//! Where "now" comes from.
//!
//! The footer prints the generation date, which is the only
//! non-deterministic input to a render. A `FixedClock` pins it.

use chrono::{DateTime, FixedOffset, Local};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// US long date, e.g. `October 17, 2026`.
pub fn long_date(at: &DateTime<FixedOffset>) -> String {
    at.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date() {
        let at = DateTime::parse_from_rfc3339("2026-03-05T09:30:00-05:00").unwrap();
        assert_eq!(long_date(&at), "March 5, 2026");
    }

    #[test]
    fn test_fixed_clock() {
        let at = DateTime::parse_from_rfc3339("2026-10-17T00:00:00Z").unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }
}
