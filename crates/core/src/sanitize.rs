//! Numeric coercion and missing-value imputation.
//!
//! [`sanitize`] turns raw rows into [`ProductRecord`]s without dropping or
//! reordering anything. Cells that cannot be read as numbers become missing
//! and are then filled column by column:
//!
//! 1. `price` - median of all valid prices
//! 2. `quantity_sold` - median of all valid quantities, rounded to a whole unit
//! 3. `rating` - mean of the valid ratings in the same category, or the mean
//!    of all valid ratings when the category has none
//!
//! A value is only left unresolved when its whole column has no valid
//! sample, which is reported as [`SanitizeError::MissingValueUnresolved`].

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::types::{ProductRecord, RawRow};

/// Errors raised while cleaning rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// A missing value has no sample to be imputed from.
    #[error("cannot impute {column} for row {row}: the column has no valid values")]
    MissingValueUnresolved {
        /// Column that could not be filled.
        column: &'static str,
        /// 1-based position of the row among the data rows.
        row: usize,
    },

    /// The values of a column sum past the range of a decimal.
    #[error("{column} values are too large to average")]
    Overflow {
        /// Column whose mean could not be computed.
        column: &'static str,
    },
}

/// Clean raw rows into product records.
///
/// The output has the same length and order as `rows`. Already-clean input
/// is returned unchanged.
///
/// # Errors
///
/// Returns `SanitizeError::MissingValueUnresolved` when a row is missing a
/// value and no row in the input provides a valid one for that column, and
/// `SanitizeError::Overflow` when the ratings sum past the range of `Decimal`.
pub fn sanitize(rows: &[RawRow]) -> Result<Vec<ProductRecord>, SanitizeError> {
    let prices: Vec<Option<Decimal>> = rows.iter().map(|r| r.price.to_decimal()).collect();
    let quantities: Vec<Option<i64>> = rows
        .iter()
        .map(|r| r.quantity_sold.to_decimal().and_then(whole_units))
        .collect();
    let ratings: Vec<Option<Decimal>> = rows.iter().map(|r| r.rating.to_decimal()).collect();

    let price_fill = median(prices.iter().flatten().copied());
    let quantity_fill = median(quantities.iter().flatten().map(|&q| Decimal::from(q)))
        .and_then(whole_units);
    let rating_fill = RatingMeans::from_rows(rows, &ratings)?;

    let mut records = Vec::with_capacity(rows.len());
    for (idx, ((row, price), (quantity, rating))) in rows
        .iter()
        .zip(prices)
        .zip(quantities.into_iter().zip(ratings))
        .enumerate()
    {
        let unresolved = |column| SanitizeError::MissingValueUnresolved {
            column,
            row: idx + 1,
        };

        let price = price.or(price_fill).ok_or_else(|| unresolved("price"))?;
        let quantity_sold = quantity
            .or(quantity_fill)
            .ok_or_else(|| unresolved("quantity_sold"))?;
        let rating = rating
            .or_else(|| rating_fill.for_category(&row.category))
            .ok_or_else(|| unresolved("rating"))?;

        records.push(ProductRecord {
            name: row.name.clone(),
            category: row.category.clone(),
            price,
            quantity_sold,
            rating,
        });
    }

    Ok(records)
}

/// Round to a whole number of units, midpoint away from zero.
fn whole_units(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Median of the given values, or `None` if there are none.
fn median(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let mut values: Vec<Decimal> = values.collect();
    values.sort_unstable();

    let mid = values.len() / 2;
    match values.len() {
        0 => None,
        n if n % 2 == 1 => values.get(mid).copied(),
        _ => {
            let (lower, upper) = (*values.get(mid - 1)?, *values.get(mid)?);
            // The sum only overflows when both share a sign, and then the
            // difference cannot.
            Some(lower.checked_add(upper).map_or_else(
                || lower + (upper - lower) / Decimal::TWO,
                |sum| sum / Decimal::TWO,
            ))
        }
    }
}

/// Running sum and count for a mean.
#[derive(Default, Clone, Copy)]
struct Mean {
    sum: Decimal,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: Decimal) -> Result<(), SanitizeError> {
        self.sum = self
            .sum
            .checked_add(value)
            .ok_or(SanitizeError::Overflow { column: "rating" })?;
        self.count += 1;
        Ok(())
    }

    fn value(self) -> Option<Decimal> {
        (self.count > 0).then(|| self.sum / Decimal::from(self.count))
    }
}

/// Per-category rating means with a global fallback.
struct RatingMeans<'a> {
    by_category: HashMap<&'a str, Decimal>,
    global: Option<Decimal>,
}

impl<'a> RatingMeans<'a> {
    fn from_rows(rows: &'a [RawRow], ratings: &[Option<Decimal>]) -> Result<Self, SanitizeError> {
        let mut by_category: HashMap<&str, Mean> = HashMap::new();
        let mut global = Mean::default();

        for (row, rating) in rows.iter().zip(ratings) {
            if let Some(rating) = *rating {
                by_category
                    .entry(row.category.as_str())
                    .or_default()
                    .add(rating)?;
                global.add(rating)?;
            }
        }

        Ok(Self {
            by_category: by_category
                .into_iter()
                .filter_map(|(category, mean)| mean.value().map(|m| (category, m)))
                .collect(),
            global: global.value(),
        })
    }

    fn for_category(&self, category: &str) -> Option<Decimal> {
        self.by_category.get(category).copied().or(self.global)
    }
}
