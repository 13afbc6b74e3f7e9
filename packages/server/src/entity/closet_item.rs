use common::ItemStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "closet_item")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub item_name: String,

    pub brand_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "brand_id", to = "id")]
    pub brand: HasOne<super::brand::Entity>,

    pub category_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    pub subcategory_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "subcategory_id", to = "id")]
    pub subcategory: HasOne<super::subcategory::Entity>,

    pub condition_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "condition_id", to = "id")]
    pub condition: HasOne<super::condition::Entity>,

    pub size: Option<String>,
    pub colour: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub purchase_price_cad: Option<Decimal>,
    pub purchase_date: Option<Date>,
    #[sea_orm(default_value = "CAD")]
    pub currency: String,

    /// Free-text brand, shown instead of the linked brand when set.
    pub brand_override_text: Option<String>,
    pub model_style_text: Option<String>,

    /// JSON text of the last recognition result.
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_item_recognition: Option<String>,
    /// Prices exactly as the model returned them.
    pub ai_retail_price_raw: Option<String>,
    pub ai_resale_price_raw: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub retail_price_cad: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub resale_price_cad: Option<Decimal>,
    /// Always `round2(resale_price_cad * 0.9)`; written by the server only.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub estimated_resale_value_cad: Option<Decimal>,

    pub ai_listing_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_listing_description: Option<String>,

    pub status: Option<ItemStatus>,
    #[sea_orm(default_value = false)]
    pub for_sale: bool,

    /// JSON array of marketplace names.
    #[sea_orm(column_type = "JsonBinary")]
    pub sell_platforms: serde_json::Value,
    /// JSON array of photo URLs.
    #[sea_orm(column_type = "JsonBinary")]
    pub photo_urls: serde_json::Value,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// Read a JSON string-array column, ignoring anything that is not a string.
pub fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
