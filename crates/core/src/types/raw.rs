//! Untyped input rows, before sanitization.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::ProductRecord;

/// A single input cell for a numeric column.
///
/// CSV input arrives as [`RawValue::Text`]; callers that already hold typed
/// values can pass them through directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawValue {
    /// No value was supplied.
    #[default]
    Missing,
    /// An already-typed integer.
    Integer(i64),
    /// An already-typed decimal.
    Decimal(Decimal),
    /// Raw text that still has to be coerced.
    Text(String),
}

impl RawValue {
    /// Coerce this value to a decimal.
    ///
    /// Coercion never fails: text that is empty, `NaN`, or not a number
    /// yields `None`, which the sanitizer treats as a missing value.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Missing => None,
            Self::Integer(n) => Some(Decimal::from(*n)),
            Self::Decimal(d) => Some(*d),
            Self::Text(s) => parse_numeric(s),
        }
    }

    /// Returns `true` if no value was supplied.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Missing
        } else {
            Self::Text(s.to_owned())
        }
    }
}

impl From<Option<&str>> for RawValue {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Self::Missing, Self::from)
    }
}

impl From<Decimal> for RawValue {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// One input row with untyped numeric cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub name: String,
    pub category: String,
    pub price: RawValue,
    pub quantity_sold: RawValue,
    pub rating: RawValue,
}

impl RawRow {
    /// Create a raw row from its cells.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<RawValue>,
        quantity_sold: impl Into<RawValue>,
        rating: impl Into<RawValue>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price: price.into(),
            quantity_sold: quantity_sold.into(),
            rating: rating.into(),
        }
    }
}

impl From<&ProductRecord> for RawRow {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            price: RawValue::Decimal(record.price),
            quantity_sold: RawValue::Integer(record.quantity_sold),
            rating: RawValue::Decimal(record.rating),
        }
    }
}

/// Parse numeric text, accepting plain and scientific notation.
///
/// Only signs, digits, a decimal point and an exponent marker are allowed, so
/// digit separators such as `1_000` are not numbers.
fn parse_numeric(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty()
        || !s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
