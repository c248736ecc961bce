use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single search hit, with the photos of its sibling SKUs collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    /// Relative photo path, or the placeholder path when the provider sent none.
    pub primary_photo: String,
    /// Sibling (variant) SKU ids, in provider order.
    pub sibling_ids: Vec<String>,
    /// Distinct sibling photos in first-seen order. Never contains `primary_photo`.
    pub sibling_photos: Vec<String>,
}

/// Search hits together with their count.
///
/// Only constructible through [`SearchResult::new`] or [`SearchResult::empty`]
/// so that `count` always equals `hits.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    count: usize,
    hits: Vec<SearchHit>,
}

impl SearchResult {
    #[must_use]
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            count: hits.len(),
            hits,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }
}

/// Display-ready brand, name and store for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub sku_id: String,
    /// `"English/中文"`, either half alone, or empty.
    pub brand: String,
    pub name: String,
    /// Empty when both `brand` and `name` are empty.
    pub store: String,
}

impl ProductInfo {
    /// Returns `true` when the record carried nothing worth displaying.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.brand.is_empty() && self.name.is_empty()
    }
}

/// SKU id to its relative photo paths, in provider order.
pub type PhotoSet = BTreeMap<String, Vec<String>>;

/// Whole-unit price, or `-1` when no price is available.
///
/// A quote of `0` is a real value, but the minimum-price reducer treats it
/// the same as "unavailable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceQuote(i64);

impl PriceQuote {
    pub const UNAVAILABLE: Self = Self(-1);

    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        self.0 != -1
    }

    /// `true` for quotes the minimum-price reducer may pick: neither `0` nor `-1`.
    #[must_use]
    pub const fn is_signal(self) -> bool {
        self.is_available() && self.0 != 0
    }
}

impl Default for PriceQuote {
    fn default() -> Self {
        Self::UNAVAILABLE
    }
}

impl std::fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
