//! Per-category aggregation.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{CategorySummary, ProductRecord};

/// Errors raised while aggregating records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// A category's revenue does not fit in a decimal.
    #[error("total revenue for category {category} is out of range")]
    RevenueOverflow {
        /// Category whose total overflowed.
        category: String,
    },
}

/// Accumulates one category while scanning the records in order.
struct Group<'a> {
    total_revenue: Decimal,
    max_quantity: i64,
    /// Occurrences per product name.
    counts: HashMap<&'a str, usize>,
    /// Product names in order of first appearance.
    first_seen: Vec<&'a str>,
}

impl<'a> Group<'a> {
    fn new(record: &ProductRecord) -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            max_quantity: record.quantity_sold,
            counts: HashMap::new(),
            first_seen: Vec::new(),
        }
    }

    fn add(&mut self, record: &'a ProductRecord) -> Result<(), SummaryError> {
        self.total_revenue = self
            .total_revenue
            .checked_add(record.price)
            .ok_or_else(|| SummaryError::RevenueOverflow {
                category: record.category.clone(),
            })?;
        self.max_quantity = self.max_quantity.max(record.quantity_sold);

        let count = self.counts.entry(record.name.as_str()).or_insert(0);
        if *count == 0 {
            self.first_seen.push(record.name.as_str());
        }
        *count += 1;
        Ok(())
    }

    /// Most frequent name; the earliest one wins a tie.
    fn top_product(&self) -> &'a str {
        let mut best: Option<(&str, usize)> = None;
        for &name in &self.first_seen {
            let count = self.counts.get(name).copied().unwrap_or_default();
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name).unwrap_or_default()
    }
}

/// Summarize cleaned records, one row per distinct category.
///
/// Categories are matched exactly (case-sensitive) and returned in
/// lexicographic order. An empty input yields an empty summary.
///
/// `top_product_quantity_sold` is the largest quantity in the category,
/// computed independently of which product is the most frequent.
///
/// # Errors
///
/// Returns `SummaryError::RevenueOverflow` if a category's revenue exceeds
/// the range of `Decimal`.
pub fn summarize(records: &[ProductRecord]) -> Result<Vec<CategorySummary>, SummaryError> {
    let mut groups: BTreeMap<&str, Group<'_>> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.category.as_str())
            .or_insert_with(|| Group::new(record))
            .add(record)?;
    }

    Ok(groups
        .into_iter()
        .map(|(category, group)| CategorySummary {
            category: category.to_owned(),
            total_revenue: group.total_revenue,
            top_product: group.top_product().to_owned(),
            top_product_quantity_sold: group.max_quantity,
        })
        .collect())
}
