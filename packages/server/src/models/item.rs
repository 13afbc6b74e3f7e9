use chrono::{DateTime, NaiveDate, Utc};
use common::ItemStatus;
use common::catalog::{CatalogEntry, ItemFilter};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::closet_item;
use crate::error::AppError;

use super::shared::{clean_list, clean_text, validate_amount, validate_item_name};

pub const DEFAULT_CURRENCY: &str = "CAD";

/// Body of `POST /items` and `PUT /items/{id}`.
///
/// `PUT` replaces every field listed here; omitted optional fields are cleared.
/// `estimated_resale_value_cad` is derived from `resale_price_cad` and ignored
/// if sent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemRequest {
    #[schema(example = "90s Pinch Waist Jeans")]
    pub item_name: String,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub condition_id: Option<Uuid>,
    #[schema(example = "30")]
    pub size: Option<String>,
    #[schema(example = "Washed Black")]
    pub colour: Option<String>,
    #[schema(value_type = Option<f64>, example = 325.0)]
    pub purchase_price_cad: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    /// Defaults to `CAD`.
    pub currency: Option<String>,
    pub brand_override_text: Option<String>,
    pub model_style_text: Option<String>,
    pub ai_retail_price_raw: Option<String>,
    pub ai_resale_price_raw: Option<String>,
    #[schema(value_type = Option<f64>, example = 325.0)]
    pub retail_price_cad: Option<Decimal>,
    #[schema(value_type = Option<f64>, example = 140.0)]
    pub resale_price_cad: Option<Decimal>,
    pub ai_listing_title: Option<String>,
    pub ai_listing_description: Option<String>,
    /// Defaults to `Keep` on create.
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub for_sale: bool,
    #[serde(default)]
    pub sell_platforms: Vec<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl ItemRequest {
    /// Field-level checks and normalisation. Reference ids and photo hosts are
    /// checked by the handler.
    pub fn validate(mut self) -> Result<Self, AppError> {
        validate_item_name(&self.item_name)?;
        self.item_name = self.item_name.trim().to_string();

        self.purchase_price_cad = validate_amount("purchase_price_cad", self.purchase_price_cad)?;
        self.retail_price_cad = validate_amount("retail_price_cad", self.retail_price_cad)?;
        self.resale_price_cad = validate_amount("resale_price_cad", self.resale_price_cad)?;

        let currency = clean_text(self.currency.take())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
            .to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::Validation(
                "currency must be a three-letter code".into(),
            ));
        }
        self.currency = Some(currency);

        self.size = clean_text(self.size);
        self.colour = clean_text(self.colour);
        self.brand_override_text = clean_text(self.brand_override_text);
        self.model_style_text = clean_text(self.model_style_text);
        self.ai_retail_price_raw = clean_text(self.ai_retail_price_raw);
        self.ai_resale_price_raw = clean_text(self.ai_resale_price_raw);
        self.ai_listing_title = clean_text(self.ai_listing_title);
        self.ai_listing_description = clean_text(self.ai_listing_description);
        self.sell_platforms = clean_list(self.sell_platforms);
        self.photo_urls = clean_list(self.photo_urls);
        Ok(self)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemListQuery {
    /// Case-insensitive match on name, brand, category or colour.
    pub search: Option<String>,
    /// One of `all`, `keep`, `sell`, `donate`, `no-photos`, `no-pricing`.
    pub filter: Option<String>,
}

impl ItemListQuery {
    pub fn filter(&self) -> Result<ItemFilter, AppError> {
        self.filter
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|e: common::catalog::ParseFilterError| AppError::Validation(e.to_string()))
    }
}

/// An item with its reference names joined in.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub item_name: String,
    pub brand_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub subcategory_id: Option<Uuid>,
    pub subcategory_name: Option<String>,
    pub condition_id: Option<Uuid>,
    pub condition_label: Option<String>,
    /// Override text when present, otherwise the linked brand.
    pub display_brand: Option<String>,
    pub size: Option<String>,
    pub colour: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub purchase_price_cad: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub currency: String,
    pub brand_override_text: Option<String>,
    pub model_style_text: Option<String>,
    /// JSON text of the last recognition result.
    pub ai_item_recognition: Option<String>,
    pub ai_retail_price_raw: Option<String>,
    pub ai_resale_price_raw: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub retail_price_cad: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub resale_price_cad: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub estimated_resale_value_cad: Option<Decimal>,
    pub ai_listing_title: Option<String>,
    pub ai_listing_description: Option<String>,
    pub status: Option<ItemStatus>,
    pub for_sale: bool,
    pub sell_platforms: Vec<String>,
    pub photo_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reference names for one item.
#[derive(Debug, Clone, Default)]
pub struct JoinedNames {
    pub brand: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub condition: Option<String>,
    pub condition_notes: Option<String>,
}

impl ItemResponse {
    pub fn new(m: closet_item::Model, names: JoinedNames) -> Self {
        let display_brand = m.brand_override_text.clone().or_else(|| names.brand.clone());
        Self {
            id: m.id,
            item_name: m.item_name,
            brand_id: m.brand_id,
            brand_name: names.brand,
            category_id: m.category_id,
            category_name: names.category,
            subcategory_id: m.subcategory_id,
            subcategory_name: names.subcategory,
            condition_id: m.condition_id,
            condition_label: names.condition,
            display_brand,
            size: m.size,
            colour: m.colour,
            purchase_price_cad: m.purchase_price_cad,
            purchase_date: m.purchase_date,
            currency: m.currency,
            brand_override_text: m.brand_override_text,
            model_style_text: m.model_style_text,
            ai_item_recognition: m.ai_item_recognition,
            ai_retail_price_raw: m.ai_retail_price_raw,
            ai_resale_price_raw: m.ai_resale_price_raw,
            retail_price_cad: m.retail_price_cad,
            resale_price_cad: m.resale_price_cad,
            estimated_resale_value_cad: m.estimated_resale_value_cad,
            ai_listing_title: m.ai_listing_title,
            ai_listing_description: m.ai_listing_description,
            status: m.status,
            for_sale: m.for_sale,
            sell_platforms: closet_item::string_list(&m.sell_platforms),
            photo_urls: closet_item::string_list(&m.photo_urls),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl CatalogEntry for ItemResponse {
    fn item_name(&self) -> &str {
        &self.item_name
    }
    fn brand_name(&self) -> Option<&str> {
        self.display_brand.as_deref()
    }
    fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }
    fn colour(&self) -> Option<&str> {
        self.colour.as_deref()
    }
    fn status(&self) -> Option<ItemStatus> {
        self.status
    }
    fn photo_count(&self) -> usize {
        self.photo_urls.len()
    }
    fn retail_price(&self) -> Option<Decimal> {
        self.retail_price_cad
    }
    fn resale_price(&self) -> Option<Decimal> {
        self.resale_price_cad
    }
    fn estimated_resale_value(&self) -> Option<Decimal> {
        self.estimated_resale_value_cad
    }
}

#[derive(Serialize, ToSchema)]
pub struct ItemListResponse {
    pub data: Vec<ItemResponse>,
    /// Items matching the search and filter.
    pub total: usize,
    /// Items in the closet before narrowing.
    pub total_unfiltered: usize,
}
