use axum::Json;
use axum::extract::{Query, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{brand, category, condition, subcategory};
use crate::error::{AppError, ErrorBody};
use crate::models::reference::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/brands",
    tag = "Reference Data",
    operation_id = "listBrands",
    summary = "List brands by name",
    responses(
        (status = 200, description = "Brands", body = Vec<BrandResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandResponse>>, AppError> {
    Ok(Json(brands(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Reference Data",
    operation_id = "listCategories",
    summary = "List categories by name",
    responses(
        (status = 200, description = "Categories", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    Ok(Json(categories(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/subcategories",
    tag = "Reference Data",
    operation_id = "listSubcategories",
    summary = "List subcategories by name",
    params(SubcategoryQuery),
    responses(
        (status = 200, description = "Subcategories", body = Vec<SubcategoryResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(category_id = ?query.category_id))]
pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubcategoryQuery>,
) -> Result<Json<Vec<SubcategoryResponse>>, AppError> {
    Ok(Json(subcategories(&state.db, query.category_id).await?))
}

#[utoipa::path(
    get,
    path = "/conditions",
    tag = "Reference Data",
    operation_id = "listConditions",
    summary = "List conditions, best first",
    responses(
        (status = 200, description = "Conditions by score, descending", body = Vec<ConditionResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_conditions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConditionResponse>>, AppError> {
    Ok(Json(conditions(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/reference",
    tag = "Reference Data",
    operation_id = "getReferenceData",
    summary = "Every lookup list in one response",
    description = "Reads the four tables concurrently. Any failure fails the request.",
    responses(
        (status = 200, description = "All reference lists", body = ReferenceDataResponse),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_reference_data(
    State(state): State<AppState>,
) -> Result<Json<ReferenceDataResponse>, AppError> {
    let (brands, categories, subcategories, conditions) = tokio::try_join!(
        brands(&state.db),
        categories(&state.db),
        subcategories(&state.db, None),
        conditions(&state.db),
    )?;
    Ok(Json(ReferenceDataResponse {
        brands,
        categories,
        subcategories,
        conditions,
    }))
}

async fn brands(db: &DatabaseConnection) -> Result<Vec<BrandResponse>, DbErr> {
    let rows = brand::Entity::find()
        .order_by_asc(brand::Column::Name)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

async fn categories(db: &DatabaseConnection) -> Result<Vec<CategoryResponse>, DbErr> {
    let rows = category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

async fn subcategories(
    db: &DatabaseConnection,
    category_id: Option<uuid::Uuid>,
) -> Result<Vec<SubcategoryResponse>, DbErr> {
    let mut select = subcategory::Entity::find();
    if let Some(id) = category_id {
        select = select.filter(subcategory::Column::CategoryId.eq(id));
    }
    let rows = select
        .order_by_asc(subcategory::Column::Name)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

async fn conditions(db: &DatabaseConnection) -> Result<Vec<ConditionResponse>, DbErr> {
    let rows = condition::Entity::find()
        .order_by_desc(condition::Column::Score)
        .order_by_asc(condition::Column::Label)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}
