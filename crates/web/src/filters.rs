//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount with exactly two fractional digits.
///
/// Values that are not decimals are rendered unchanged.
///
/// Usage in templates: `{{ row.total_revenue|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

fn format_money(raw: &str) -> String {
    Decimal::from_str(raw).map_or_else(
        |_| raw.to_owned(),
        |amount| format!("{:.2}", amount.round_dp(2)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("35"), "35.00");
        assert_eq!(format_money("10.5"), "10.50");
        assert_eq!(format_money("1.005"), "1.00");
        assert_eq!(format_money("-2.345"), "-2.34");
        assert_eq!(format_money("n/a"), "n/a");
    }
}
