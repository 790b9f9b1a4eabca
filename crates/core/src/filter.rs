//! Metadata filtering for retrieval
//!
//! Equality-only filtering over structured chunk attributes. Each provided
//! field is an equality constraint; all provided fields are ANDed.
//!
//! The filter is LENIENT on missing fields: a chunk passes a field's
//! constraint when the chunk's corresponding metadata field is absent. This
//! keeps partially-tagged documents searchable, and means a chunk with no
//! metadata at all survives every filter. Exclusion requires the field to be
//! present with a different value.

use crate::types::{Chunk, MetaValue};
use serde::{Deserialize, Serialize};

/// Equality filter over the structured attributes of a chunk
///
/// All fields are optional; an empty filter matches every chunk.
///
/// # Example
///
/// ```
/// use quarry_core::filter::MetadataFilter;
///
/// let filter = MetadataFilter::new().with_year(2024).with_month(1);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    /// Calendar year constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,

    /// Calendar month constraint (1-12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,

    /// Category constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Merchant constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    /// Currency constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl MetadataFilter {
    /// Create an empty filter (matches all chunks)
    pub fn new() -> Self {
        MetadataFilter::default()
    }

    /// Builder: constrain the year
    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    /// Builder: constrain the month
    pub fn with_month(mut self, month: i64) -> Self {
        self.month = Some(month);
        self
    }

    /// Builder: constrain the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: constrain the merchant
    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    /// Builder: constrain the currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// True if no constraints are set
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.category.is_none()
            && self.merchant.is_none()
            && self.currency.is_none()
    }

    /// Check whether a chunk passes every provided constraint
    pub fn matches(&self, chunk: &Chunk) -> bool {
        int_field_passes(chunk, "year", self.year)
            && int_field_passes(chunk, "month", self.month)
            && text_field_passes(chunk, "category", self.category.as_deref())
            && text_field_passes(chunk, "merchant", self.merchant.as_deref())
            && text_field_passes(chunk, "currency", self.currency.as_deref())
    }

    /// Select the chunks passing this filter, preserving order
    pub fn apply<'a>(&self, chunks: &'a [Chunk]) -> Vec<&'a Chunk> {
        chunks.iter().filter(|c| self.matches(c)).collect()
    }
}

fn int_field_passes(chunk: &Chunk, key: &str, want: Option<i64>) -> bool {
    let Some(want) = want else {
        return true;
    };
    match chunk.meta(key) {
        // Missing field passes (lenient)
        None => true,
        Some(MetaValue::Int(have)) => *have == want,
        Some(MetaValue::Text(_)) => false,
    }
}

fn text_field_passes(chunk: &Chunk, key: &str, want: Option<&str>) -> bool {
    let Some(want) = want else {
        return true;
    };
    match chunk.meta(key) {
        None => true,
        Some(MetaValue::Text(have)) => have == want,
        Some(MetaValue::Int(_)) => false,
    }
}
