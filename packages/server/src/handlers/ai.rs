use axum::Json;
use axum::extract::State;
use llm::{
    ListingRequest, ListingResult, PricingRequest, PricingResult, RecognitionRequest,
    RecognitionResult,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/ai/recognize",
    tag = "AI",
    operation_id = "recognize",
    summary = "Identify an item from its descriptors and an optional photo",
    description = "Every field is optional. `photoBase64` may be bare base64 or a `data:` URL.",
    request_body = RecognitionRequest,
    responses(
        (status = 200, description = "Recognition result", body = RecognitionResult),
        (status = 400, description = "Malformed body or photo (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Model call failed (AI_FAILED)", body = ErrorBody),
        (status = 503, description = "AI disabled (AI_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(has_photo = payload.photo_base64.is_some()))]
pub async fn recognize(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RecognitionRequest>,
) -> Result<Json<RecognitionResult>, AppError> {
    let result = state
        .gateway()?
        .recognize(&payload)
        .await
        .map_err(|e| AppError::from_llm(e, "Failed to recognize item"))?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/ai/pricing",
    tag = "AI",
    operation_id = "estimatePricing",
    summary = "Estimate retail and resale prices in CAD",
    description = "Requires `brandName`, `itemName`, `categoryName` and `conditionLabel`. \
        Both estimates are requested concurrently; either failing fails the call.",
    request_body = PricingRequest,
    responses(
        (status = 200, description = "Price estimates", body = PricingResult),
        (status = 400, description = "Missing required fields (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Model call failed (AI_FAILED)", body = ErrorBody),
        (status = 503, description = "AI disabled (AI_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(brand = %payload.brand_name, item = %payload.item_name))]
pub async fn estimate_pricing(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PricingRequest>,
) -> Result<Json<PricingResult>, AppError> {
    AppError::require_fields(payload.missing_fields())?;
    let result = state
        .gateway()?
        .estimate_pricing(&payload)
        .await
        .map_err(|e| AppError::from_llm(e, "Failed to estimate pricing"))?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/ai/listing",
    tag = "AI",
    operation_id = "generateListing",
    summary = "Write a marketplace title and description",
    description = "Requires brand, item name, category, size, colour and condition.",
    request_body = ListingRequest,
    responses(
        (status = 200, description = "Listing copy", body = ListingResult),
        (status = 400, description = "Missing required fields (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Model call failed (AI_FAILED)", body = ErrorBody),
        (status = 503, description = "AI disabled (AI_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(brand = %payload.brand_name, item = %payload.item_name))]
pub async fn generate_listing(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ListingRequest>,
) -> Result<Json<ListingResult>, AppError> {
    AppError::require_fields(payload.missing_fields())?;
    let result = state
        .gateway()?
        .generate_listing(&payload)
        .await
        .map_err(|e| AppError::from_llm(e, "Failed to generate listing"))?;
    Ok(Json(result))
}
