use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::ItemStatus;
use common::catalog;
use common::valuation::{amount_from_f64, estimated_resale_value};
use llm::{ListingRequest, PricingRequest, RecognitionRequest, RecognitionResult};
use sea_orm::*;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entity::closet_item;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::item::*;
use crate::state::AppState;
use crate::utils::reference::{ReferenceIndex, check_references, load_catalog};

#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    operation_id = "listItems",
    summary = "List closet items",
    description = "Returns every item, newest first, with brand, category, subcategory and \
        condition names joined in. `search` matches name, brand, category or colour \
        case-insensitively; `filter` narrows by status, missing photos or missing prices.",
    params(ItemListQuery),
    responses(
        (status = 200, description = "Matching items", body = ItemListResponse),
        (status = 400, description = "Unknown filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(search = ?query.search, filter = ?query.filter))]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<ItemListResponse>, AppError> {
    let filter = query.filter()?;
    let items = load_catalog(&state.db).await?;
    let total_unfiltered = items.len();

    let data = catalog::select(items, query.search.as_deref(), filter);
    Ok(Json(ItemListResponse {
        total: data.len(),
        total_unfiltered,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    operation_id = "getItem",
    summary = "Get an item",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item detail", body = ItemResponse),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(item_id = %id))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = find_item(&state.db, id).await?;
    let names = ReferenceIndex::for_item(&state.db, &item).await?;
    Ok(Json(ItemResponse::new(item, names)))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    operation_id = "createItem",
    summary = "Add an item to the closet",
    description = "Creates an item. `status` defaults to `Keep` and `currency` to `CAD`. \
        `estimated_resale_value_cad` is computed from `resale_price_cad`.",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(item_name = %payload.item_name))]
pub async fn create_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut payload = payload.validate()?;
    payload.status = payload.status.or(Some(ItemStatus::Keep));
    check_photo_urls(&state, &payload.photo_urls)?;
    check_references(&state.db, &payload).await?;

    let now = Utc::now();
    let mut active = closet_item::ActiveModel {
        id: Set(Uuid::now_v7()),
        ai_item_recognition: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    apply_request(&mut active, payload, now);

    let model = active.insert(&state.db).await?;
    info!(item_id = %model.id, "Item created");

    let names = ReferenceIndex::for_item(&state.db, &model).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::new(model, names))))
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "Items",
    operation_id = "updateItem",
    summary = "Replace an item's editable fields",
    description = "Full replace: optional fields left out of the body are cleared. \
        The stored recognition result is kept.",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(item_id = %id))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let payload = payload.validate()?;
    check_photo_urls(&state, &payload.photo_urls)?;

    let existing = find_item(&state.db, id).await?;
    check_references(&state.db, &payload).await?;

    let mut active: closet_item::ActiveModel = existing.into();
    apply_request(&mut active, payload, Utc::now());
    let model = active.update(&state.db).await?;

    let names = ReferenceIndex::for_item(&state.db, &model).await?;
    Ok(Json(ItemResponse::new(model, names)))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    operation_id = "deleteItem",
    summary = "Delete an item",
    description = "Removes the item. Referenced brands, categories and conditions are untouched, \
        and uploaded photos stay in the photo store.",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(item_id = %id))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = closet_item::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Item not found".into()));
    }
    info!("Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/items/{id}/pricing",
    tag = "Items",
    operation_id = "priceItem",
    summary = "Estimate and store prices for an item",
    description = "Asks the model for retail and resale prices using the item's brand, name, \
        model, category and condition. Prices and the raw model output are written only when \
        both estimates succeed.",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item with new prices", body = ItemResponse),
        (status = 400, description = "Brand, category or condition missing (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Model call failed (AI_FAILED)", body = ErrorBody),
        (status = 503, description = "AI disabled (AI_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(item_id = %id))]
pub async fn price_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    const FAILED: &str = "Failed to estimate pricing";

    let item = find_item(&state.db, id).await?;
    let names = ReferenceIndex::for_item(&state.db, &item).await?;

    let request = PricingRequest {
        brand_name: display_brand(&item, &names),
        item_name: item.item_name.clone(),
        model_style: item.model_style_text.clone(),
        category_name: names.category.clone().unwrap_or_default(),
        subcategory_name: names.subcategory.clone(),
        condition_label: names.condition.clone().unwrap_or_default(),
    };
    AppError::require_fields(request.missing_fields())?;
    let prices = state
        .gateway()?
        .estimate_pricing(&request)
        .await
        .map_err(|e| AppError::from_llm(e, FAILED))?;

    let retail = amount_from_f64(prices.retail_price);
    let resale = amount_from_f64(prices.resale_price);
    let (Some(retail), Some(resale)) = (retail, resale) else {
        tracing::error!(?prices, "Model prices do not fit the price columns");
        return Err(AppError::AiFailed(FAILED.into()));
    };

    let mut active: closet_item::ActiveModel = item.into();
    active.ai_retail_price_raw = Set(Some(prices.retail_price.to_string()));
    active.ai_resale_price_raw = Set(Some(prices.resale_price.to_string()));
    active.retail_price_cad = Set(Some(retail));
    active.resale_price_cad = Set(Some(resale));
    active.estimated_resale_value_cad = Set(estimated_resale_value(Some(resale)));
    active.updated_at = Set(Utc::now());
    let model = active.update(&state.db).await?;

    info!(%retail, %resale, "Item priced");
    Ok(Json(ItemResponse::new(model, names)))
}

#[utoipa::path(
    post,
    path = "/items/{id}/listing",
    tag = "Items",
    operation_id = "writeItemListing",
    summary = "Generate and store listing copy for an item",
    description = "Asks the model for a listing title and description. Requires brand, \
        category, condition, size and colour. Written only when both parts succeed.",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item with new listing copy", body = ItemResponse),
        (status = 400, description = "Required details missing (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Model call failed (AI_FAILED)", body = ErrorBody),
        (status = 503, description = "AI disabled (AI_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(item_id = %id))]
pub async fn write_item_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = find_item(&state.db, id).await?;
    let names = ReferenceIndex::for_item(&state.db, &item).await?;

    let request = ListingRequest {
        brand_name: display_brand(&item, &names),
        item_name: item.item_name.clone(),
        model_style: item.model_style_text.clone(),
        category_name: names.category.clone().unwrap_or_default(),
        subcategory_name: names.subcategory.clone(),
        size: item.size.clone().unwrap_or_default(),
        colour: item.colour.clone().unwrap_or_default(),
        condition_label: names.condition.clone().unwrap_or_default(),
        condition_notes: names.condition_notes.clone(),
    };
    AppError::require_fields(request.missing_fields())?;
    let listing = state
        .gateway()?
        .generate_listing(&request)
        .await
        .map_err(|e| AppError::from_llm(e, "Failed to generate listing"))?;

    let mut active: closet_item::ActiveModel = item.into();
    active.ai_listing_title = Set(Some(listing.title));
    active.ai_listing_description = Set(Some(listing.description));
    active.updated_at = Set(Utc::now());
    let model = active.update(&state.db).await?;

    Ok(Json(ItemResponse::new(model, names)))
}

#[utoipa::path(
    post,
    path = "/items/{id}/recognition",
    tag = "Items",
    operation_id = "recognizeItem",
    summary = "Run recognition on a stored item",
    description = "Sends the item's descriptors to the model and stores the JSON result \
        in `ai_item_recognition`.",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Recognition result", body = RecognitionResult),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Model call failed (AI_FAILED)", body = ErrorBody),
        (status = 503, description = "AI disabled (AI_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(item_id = %id))]
pub async fn recognize_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecognitionResult>, AppError> {
    let gateway = state.gateway()?;
    let item = find_item(&state.db, id).await?;
    let names = ReferenceIndex::for_item(&state.db, &item).await?;

    let request = RecognitionRequest {
        item_name: Some(item.item_name.clone()),
        brand_override: Some(display_brand(&item, &names)).filter(|b| !b.is_empty()),
        model_style: item.model_style_text.clone(),
        category_name: names.category,
        subcategory_name: names.subcategory,
        size: item.size.clone(),
        colour: item.colour.clone(),
        photo_base64: None,
    };
    let result = gateway
        .recognize(&request)
        .await
        .map_err(|e| AppError::from_llm(e, "Failed to recognize item"))?;

    let raw = serde_json::to_string(&result)
        .map_err(|e| AppError::Internal(format!("Failed to encode recognition result: {e}")))?;
    let mut active: closet_item::ActiveModel = item.into();
    active.ai_item_recognition = Set(Some(raw));
    active.updated_at = Set(Utc::now());
    active.update(&state.db).await?;

    Ok(Json(result))
}

async fn find_item<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<closet_item::Model, AppError> {
    closet_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".into()))
}

/// Override text first, then the linked brand. Empty when neither is set.
fn display_brand(item: &closet_item::Model, names: &JoinedNames) -> String {
    item.brand_override_text
        .clone()
        .or_else(|| names.brand.clone())
        .unwrap_or_default()
}

fn check_photo_urls(state: &AppState, urls: &[String]) -> Result<(), AppError> {
    for url in urls {
        state.photo_urls.check(url).map_err(AppError::Validation)?;
    }
    Ok(())
}

/// Copy every editable field onto the row and recompute the derived value.
fn apply_request(
    active: &mut closet_item::ActiveModel,
    req: ItemRequest,
    now: chrono::DateTime<Utc>,
) {
    active.item_name = Set(req.item_name);
    active.brand_id = Set(req.brand_id);
    active.category_id = Set(req.category_id);
    active.subcategory_id = Set(req.subcategory_id);
    active.condition_id = Set(req.condition_id);
    active.size = Set(req.size);
    active.colour = Set(req.colour);
    active.purchase_price_cad = Set(req.purchase_price_cad);
    active.purchase_date = Set(req.purchase_date);
    active.currency = Set(req.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()));
    active.brand_override_text = Set(req.brand_override_text);
    active.model_style_text = Set(req.model_style_text);
    active.ai_retail_price_raw = Set(req.ai_retail_price_raw);
    active.ai_resale_price_raw = Set(req.ai_resale_price_raw);
    active.retail_price_cad = Set(req.retail_price_cad);
    active.resale_price_cad = Set(req.resale_price_cad);
    active.estimated_resale_value_cad = Set(estimated_resale_value(req.resale_price_cad));
    active.ai_listing_title = Set(req.ai_listing_title);
    active.ai_listing_description = Set(req.ai_listing_description);
    active.status = Set(req.status);
    active.for_sale = Set(req.for_sale);
    active.sell_platforms = Set(serde_json::json!(req.sell_platforms));
    active.photo_urls = Set(serde_json::json!(req.photo_urls));
    active.updated_at = Set(now);
}
