//! Search and status filters over a fully loaded closet.
//!
//! The list view loads every item and narrows it here with a linear scan.
//! That is fine for a personal wardrobe of a few hundred pieces; anything
//! larger needs indexed queries in the database instead.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ItemStatus;

/// Read-only view of an item as the list, filters and dashboard see it.
pub trait CatalogEntry {
    fn item_name(&self) -> &str;
    /// Display brand: the override text when present, otherwise the joined brand.
    fn brand_name(&self) -> Option<&str>;
    fn category_name(&self) -> Option<&str>;
    fn colour(&self) -> Option<&str>;
    fn status(&self) -> Option<ItemStatus>;
    fn photo_count(&self) -> usize;
    fn retail_price(&self) -> Option<Decimal>;
    fn resale_price(&self) -> Option<Decimal>;
    fn estimated_resale_value(&self) -> Option<Decimal>;

    fn has_photos(&self) -> bool {
        self.photo_count() > 0
    }

    /// True unless both the retail and the resale price are known.
    fn needs_pricing(&self) -> bool {
        self.retail_price().is_none() || self.resale_price().is_none()
    }
}

/// The six mutually exclusive list filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ItemFilter {
    #[default]
    All,
    Keep,
    Sell,
    Donate,
    NoPhotos,
    NoPricing,
}

impl ItemFilter {
    pub const ALL: &'static [ItemFilter] = &[
        Self::All,
        Self::Keep,
        Self::Sell,
        Self::Donate,
        Self::NoPhotos,
        Self::NoPricing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Keep => "keep",
            Self::Sell => "sell",
            Self::Donate => "donate",
            Self::NoPhotos => "no-photos",
            Self::NoPricing => "no-pricing",
        }
    }

    pub fn matches<T: CatalogEntry + ?Sized>(&self, entry: &T) -> bool {
        match self {
            Self::All => true,
            Self::Keep => entry.status() == Some(ItemStatus::Keep),
            Self::Sell => entry.status() == Some(ItemStatus::Sell),
            Self::Donate => entry.status() == Some(ItemStatus::Donate),
            Self::NoPhotos => !entry.has_photos(),
            Self::NoPricing => entry.needs_pricing(),
        }
    }
}

impl fmt::Display for ItemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid filter '{0}'. Valid values: all, keep, sell, donate, no-photos, no-pricing")]
pub struct ParseFilterError(String);

impl FromStr for ItemFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.is_empty() {
            return Ok(Self::All);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// Case-insensitive substring match on name, brand, category and colour.
///
/// A blank query matches everything.
pub fn matches_search<T: CatalogEntry + ?Sized>(entry: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(&needle));

    hit(Some(entry.item_name()))
        || hit(entry.brand_name())
        || hit(entry.category_name())
        || hit(entry.colour())
}

/// Narrow a loaded closet to the entries matching both the search and the filter.
///
/// Order is preserved.
pub fn select<T: CatalogEntry>(entries: Vec<T>, search: Option<&str>, filter: ItemFilter) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| search.is_none_or(|q| matches_search(entry, q)) && filter.matches(entry))
        .collect()
}
