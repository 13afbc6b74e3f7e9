use chrono::{DateTime, Utc};
use common::BodyArea;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::{brand, category, condition, subcategory};

#[derive(Serialize, ToSchema)]
pub struct BrandResponse {
    pub id: Uuid,
    #[schema(example = "Agolde")]
    pub name: String,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[schema(example = "Jeans")]
    pub name: String,
    pub body_area: Option<BodyArea>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct SubcategoryResponse {
    pub id: Uuid,
    #[schema(example = "Denim")]
    pub name: String,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct ConditionResponse {
    pub id: Uuid,
    #[schema(example = "Excellent")]
    pub label: String,
    /// Higher is better.
    #[schema(example = 4)]
    pub score: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Every lookup list the item form needs.
#[derive(Serialize, ToSchema)]
pub struct ReferenceDataResponse {
    pub brands: Vec<BrandResponse>,
    pub categories: Vec<CategoryResponse>,
    pub subcategories: Vec<SubcategoryResponse>,
    pub conditions: Vec<ConditionResponse>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubcategoryQuery {
    /// Only subcategories of this category.
    pub category_id: Option<Uuid>,
}

impl From<brand::Model> for BrandResponse {
    fn from(m: brand::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            website: m.website,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<category::Model> for CategoryResponse {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            body_area: m.body_area,
            created_at: m.created_at,
        }
    }
}

impl From<subcategory::Model> for SubcategoryResponse {
    fn from(m: subcategory::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category_id: m.category_id,
            created_at: m.created_at,
        }
    }
}

impl From<condition::Model> for ConditionResponse {
    fn from(m: condition::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
            score: m.score,
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}
