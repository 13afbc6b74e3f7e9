use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(item_routes())
        .merge(reference_routes())
        .merge(ai_routes())
        .routes(routes!(handlers::dashboard::get_dashboard))
        .merge(photo_routes(config))
}

fn item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::item::list_items,
            handlers::item::create_item
        ))
        .routes(routes!(
            handlers::item::get_item,
            handlers::item::update_item,
            handlers::item::delete_item
        ))
        .routes(routes!(handlers::item::price_item))
        .routes(routes!(handlers::item::write_item_listing))
        .routes(routes!(handlers::item::recognize_item))
}

fn reference_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::reference::list_brands))
        .routes(routes!(handlers::reference::list_categories))
        .routes(routes!(handlers::reference::list_subcategories))
        .routes(routes!(handlers::reference::list_conditions))
        .routes(routes!(handlers::reference::get_reference_data))
}

fn ai_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::ai::recognize))
        .routes(routes!(handlers::ai::estimate_pricing))
        .routes(routes!(handlers::ai::generate_listing))
}

fn photo_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::photo::upload_photos))
        .layer(handlers::photo::photo_upload_body_limit(
            config.storage.max_photo_size,
        ));

    OpenApiRouter::new()
        .routes(routes!(handlers::photo::get_photo))
        .merge(upload)
}
