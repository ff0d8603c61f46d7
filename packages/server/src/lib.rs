pub mod config;
pub mod error;
pub mod gallery;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod thumbnail;
pub mod utils;
pub mod views;

use axum::Json;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Image Gallery",
        version = "1.0.0",
        description = "Upload images and browse them with generated thumbnails"
    ),
    tags(
        (name = "Gallery", description = "Gallery pages, uploads and image streaming"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::gallery_routes(&state.config))
        .split_for_parts();

    let spec = api.clone();
    router
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let spec = spec.clone();
                async move { Json(spec) }
            }),
        )
        .with_state(state)
        .merge(Scalar::with_url("/scalar", api))
        .layer(TraceLayer::new_for_http())
}
