//! Route handlers and router assembly.
//!
//! Each endpoint module exposes a `create_router()` that the top-level
//! `create_api_router` merges under the app state, then wraps with CORS
//! and request tracing.

pub mod data;
pub mod headlines;
pub mod health;
pub mod market;
pub mod sentiment;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

/// Assemble the full application router.
pub fn create_api_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(sentiment::create_router())
        .merge(headlines::create_router())
        .merge(market::create_router())
        .merge(data::create_router())
        .nest("/health", health::create_router());

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", axum::routing::get(openapi_json));

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

/// Browser access layer. Empty configured origins means a development
/// setup, which allows any origin; otherwise only the configured list.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
