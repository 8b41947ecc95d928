//! Shared helper functions for CLI commands
//!
//! Number formatting for tables and headlines, plus stdin handling.

use std::io::{self, Read};

/// Round to `decimals` places, normalising negative zero
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor + 0.0
}

/// Round to 6 decimals and print without trailing zeros
///
/// Used for machine-readable output (CSV/TSV) where grouping would get in
/// the way: `250.0` prints as `250`, `0.7` as `0.7`.
pub fn smart_round(value: f64) -> String {
    format!("{}", round_to(value, 6))
}

/// Insert thousands separators into a string of ASCII digits
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format with thousands separators and a fixed number of decimals
///
/// `format_amount(-150000.0, 0)` gives `-150,000`;
/// `format_amount(1234.5, 2)` gives `1,234.50`.
pub fn format_amount(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = round_to(value, decimals);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole-number money amount with an optional currency label
///
/// This is the headline format: thousands-grouped, rounded to an integer.
pub fn format_money(value: f64, currency: Option<&str>) -> String {
    let amount = format_amount(value, 0);
    match currency {
        Some(label) => format!("{} {}", amount, label),
        None => amount,
    }
}

/// Fraction as a percentage with one decimal (`0.7` -> `70.0%`)
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", round_to(fraction * 100.0, 1))
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Read all of stdin
pub fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().lock().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_round() {
        assert_eq!(smart_round(250.0), "250");
        assert_eq!(smart_round(0.7), "0.7");
        assert_eq!(smart_round(-150000.0), "-150000");
        assert_eq!(smart_round(1.0 / 3.0), "0.333333");
        assert_eq!(smart_round(-0.0), "0");
        assert_eq!(smart_round(-0.0000001), "0");
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0, 0), "0");
        assert_eq!(format_amount(999.0, 0), "999");
        assert_eq!(format_amount(1000.0, 0), "1,000");
        assert_eq!(format_amount(-150000.0, 0), "-150,000");
        assert_eq!(format_amount(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_amount(1234.5, 2), "1,234.50");
    }

    #[test]
    fn test_format_amount_rounds_away_small_negatives() {
        assert_eq!(format_amount(-0.4, 0), "0");
        assert_eq!(format_amount(-0.0, 2), "0.00");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(2.5, 0), "3");
        assert_eq!(format_amount(-2.5, 0), "-3");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(-150000.0, None), "-150,000");
        assert_eq!(format_money(1499.6, Some("USD")), "1,500 USD");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.7), "70.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("商品名稱很長", 5), "商品...");
    }
}
