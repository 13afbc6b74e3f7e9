//! Headline numbers and value breakdowns for the dashboard.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::ItemStatus;
use crate::catalog::CatalogEntry;

/// Brand breakdown is cut to this many rows.
pub const TOP_BRANDS: usize = 10;

/// Group label for items without a brand or category.
pub const UNKNOWN_GROUP: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DashboardMetrics {
    #[schema(example = 42)]
    pub total_items: usize,
    /// Sum of retail prices; unpriced items count as zero.
    #[schema(example = 8450.0)]
    pub total_retail_value: Decimal,
    /// Sum of estimated resale values; unpriced items count as zero.
    #[schema(example = 3120.3)]
    pub total_resale_value: Decimal,
    pub items_to_sell: usize,
    pub items_to_photograph: usize,
    pub items_to_price: usize,
}

/// One bar of a value breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ValueBucket {
    #[schema(example = "Agolde")]
    pub name: String,
    /// Whole CAD, rounded.
    #[schema(example = 252)]
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    /// Top brands by estimated resale value, descending.
    pub value_by_brand: Vec<ValueBucket>,
    /// Every category by estimated resale value, descending.
    pub value_by_category: Vec<ValueBucket>,
}

pub fn summarize<T: CatalogEntry>(entries: &[T]) -> Dashboard {
    let metrics = DashboardMetrics {
        total_items: entries.len(),
        total_retail_value: entries.iter().filter_map(|e| e.retail_price()).sum(),
        total_resale_value: entries.iter().filter_map(|e| e.estimated_resale_value()).sum(),
        items_to_sell: entries
            .iter()
            .filter(|e| e.status() == Some(ItemStatus::Sell))
            .count(),
        items_to_photograph: entries.iter().filter(|e| !e.has_photos()).count(),
        items_to_price: entries.iter().filter(|e| e.needs_pricing()).count(),
    };

    let mut value_by_brand = group_value(entries, |e| e.brand_name());
    value_by_brand.truncate(TOP_BRANDS);

    Dashboard {
        metrics,
        value_by_brand,
        value_by_category: group_value(entries, |e| e.category_name()),
    }
}

fn group_value<T, F>(entries: &[T], key: F) -> Vec<ValueBucket>
where
    T: CatalogEntry,
    F: Fn(&T) -> Option<&str>,
{
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for entry in entries {
        let name = key(entry)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_GROUP);
        *totals.entry(name).or_default() += entry.estimated_resale_value().unwrap_or_default();
    }

    let mut buckets: Vec<ValueBucket> = totals
        .into_iter()
        .map(|(name, total)| ValueBucket {
            name: name.to_string(),
            value: total
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or(i64::MAX),
        })
        .collect();
    buckets.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    buckets
}
