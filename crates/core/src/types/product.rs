//! Product sales records and per-category summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of cleaned sales data.
///
/// Every numeric field is present: missing values are imputed by
/// [`crate::sanitize`] before a record is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name.
    pub name: String,
    /// Product category, the grouping key for summaries.
    pub category: String,
    /// Unit price.
    pub price: Decimal,
    /// Units sold.
    pub quantity_sold: i64,
    /// Average customer rating, typically 0-5.
    pub rating: Decimal,
}

impl ProductRecord {
    /// Create a new product record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        quantity_sold: i64,
        rating: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            quantity_sold,
            rating,
        }
    }
}

/// Aggregated statistics for one category.
///
/// Derived on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category these figures describe.
    pub category: String,
    /// Sum of `price` over all records in the category.
    pub total_revenue: Decimal,
    /// The most frequent product name in the category.
    pub top_product: String,
    /// The largest `quantity_sold` in the category.
    ///
    /// This is a column maximum and need not belong to `top_product`.
    pub top_product_quantity_sold: i64,
}
