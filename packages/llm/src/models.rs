//! Request and result types for the three AI operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Descriptors for item recognition. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionRequest {
    #[schema(example = "Black jeans")]
    pub item_name: Option<String>,
    pub brand_override: Option<String>,
    pub model_style: Option<String>,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub size: Option<String>,
    #[schema(example = "Washed Black")]
    pub colour: Option<String>,
    /// Photo as bare base64 or a `data:image/...;base64,` URL.
    pub photo_base64: Option<String>,
}

/// Best-effort guess. The model may leave out or null any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecognitionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "90s Pinch Waist High-Rise Straight Jeans")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Jeans")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Input for a price estimate. `brandName`, `itemName`, `categoryName` and
/// `conditionLabel` must be non-blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[serde(default)]
    #[schema(example = "Agolde")]
    pub brand_name: String,
    #[serde(default)]
    #[schema(example = "90s Pinch Waist Jeans")]
    pub item_name: String,
    pub model_style: Option<String>,
    #[serde(default)]
    #[schema(example = "Jeans")]
    pub category_name: String,
    pub subcategory_name: Option<String>,
    #[serde(default)]
    #[schema(example = "Excellent")]
    pub condition_label: String,
}

impl PricingRequest {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("brandName", &self.brand_name),
            ("itemName", &self.item_name),
            ("categoryName", &self.category_name),
            ("conditionLabel", &self.condition_label),
        ]
        .into_iter()
        .filter(|(_, v)| is_blank(v))
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Estimated original retail price in CAD.
    #[schema(example = 325)]
    pub retail_price: f64,
    /// Estimated current resale price in CAD.
    #[schema(example = 140)]
    pub resale_price: f64,
}

/// Input for listing copy. Everything but `modelStyle`, `subcategoryName` and
/// `conditionNotes` must be non-blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    #[serde(default)]
    #[schema(example = "Agolde")]
    pub brand_name: String,
    #[serde(default)]
    #[schema(example = "90s Pinch Waist Jeans")]
    pub item_name: String,
    pub model_style: Option<String>,
    #[serde(default)]
    #[schema(example = "Jeans")]
    pub category_name: String,
    pub subcategory_name: Option<String>,
    #[serde(default)]
    #[schema(example = "30")]
    pub size: String,
    #[serde(default)]
    #[schema(example = "Washed Black")]
    pub colour: String,
    #[serde(default)]
    #[schema(example = "Excellent")]
    pub condition_label: String,
    pub condition_notes: Option<String>,
}

impl ListingRequest {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("brandName", &self.brand_name),
            ("itemName", &self.item_name),
            ("categoryName", &self.category_name),
            ("size", &self.size),
            ("colour", &self.colour),
            ("conditionLabel", &self.condition_label),
        ]
        .into_iter()
        .filter(|(_, v)| is_blank(v))
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListingResult {
    #[schema(example = "Agolde – 90s Pinch Waist Jeans – 30 – Washed Black")]
    pub title: String,
    pub description: String,
}
