//! Display formatting for derived view values.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Format an amount as currency with thousands separators, e.g. `$1,250,000`.
#[must_use]
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_i128().unwrap_or(0).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format an API timestamp for display as `dd/mm/yyyy`.
///
/// The backend emits ISO-8601 with or without a time part; anything that
/// does not parse is shown as-is rather than dropped.
#[must_use]
pub fn date(raw: &str) -> String {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |d| d.format("%d/%m/%Y").to_string())
}

/// Percentage of a total, rounded to one decimal. Zero totals yield 0.
#[must_use]
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / total as f64;
    (ratio * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency(Decimal::new(1_250_000, 0)), "$1,250,000");
        assert_eq!(currency(Decimal::new(950, 0)), "$950");
        assert_eq!(currency(Decimal::ZERO), "$0");
        assert_eq!(currency(Decimal::new(-15_500, 0)), "-$15,500");
    }

    #[test]
    fn test_currency_rounds_decimals() {
        assert_eq!(currency(Decimal::new(123_456_78, 2)), "$123,457");
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(date("2026-08-27T14:03:00"), "27/08/2026");
        assert_eq!(date("2026-08-27"), "27/08/2026");
        assert_eq!(date("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_percentage() {
        assert!((percentage(1, 3) - 33.3).abs() < f64::EPSILON);
        assert!((percentage(5, 5) - 100.0).abs() < f64::EPSILON);
        assert!((percentage(3, 0) - 0.0).abs() < f64::EPSILON);
    }
}
