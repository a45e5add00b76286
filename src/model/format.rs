//! US-style number formatting for prices and sizes.
//!
//! Locale is fixed: comma thousands separators, no fraction digits,
//! `$` prefix for currency.

/// Round to a whole number and insert thousands separators.
/// Non-finite input formats as `"0"`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1200000.0` → `"$1,200,000"`.
pub fn format_currency(value: f64) -> String {
    let grouped = format_grouped(value);
    match grouped.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(5000.0), "5,000");
        assert_eq!(format_grouped(123456.0), "123,456");
        assert_eq!(format_grouped(2_500_000.0), "2,500,000");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_grouped(1999.5), "2,000");
        assert_eq!(format_grouped(1234.4), "1,234");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_grouped(f64::NAN), "0");
        assert_eq!(format_currency(f64::INFINITY), "$0");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1_200_000.0), "$1,200,000");
        assert_eq!(format_currency(3000.0), "$3,000");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }
}
