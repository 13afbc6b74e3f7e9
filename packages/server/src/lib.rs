pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Closet Worthy API",
        version = "1.0.0",
        description = "Wardrobe catalogue with AI-assisted recognition, pricing and listing copy"
    ),
    tags(
        (name = "Items", description = "Closet item CRUD and per-item AI actions"),
        (name = "Reference Data", description = "Brands, categories, subcategories and conditions"),
        (name = "AI", description = "Stateless recognition, pricing and listing generation"),
        (name = "Dashboard", description = "Closet totals and value breakdowns"),
        (name = "Photos", description = "Item photo upload and download"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
