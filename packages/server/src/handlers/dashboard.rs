use axum::Json;
use axum::extract::State;
use common::dashboard::{Dashboard, summarize};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::utils::reference::load_catalog;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    operation_id = "getDashboard",
    summary = "Closet totals and value breakdowns",
    description = "Recomputed from every item on each call. Brand rows use the override \
        text when set and are cut to the top ten; category rows are not truncated.",
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let items = load_catalog(&state.db).await?;
    Ok(Json(summarize(&items)))
}
