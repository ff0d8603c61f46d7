use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::gallery;
use crate::state::AppState;

pub fn gallery_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(gallery::list_gallery))
        .routes(routes!(gallery::upload_form, gallery::submit_upload))
        .routes(routes!(gallery::get_image))
        .routes(routes!(gallery::get_thumbnail))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
}
