use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::{ApiDocsConfig, Config};
use crate::core::error::AppError;
use crate::core::{middleware, openapi};
use crate::features::schools::{routes as schools_routes, SchoolService};
use crate::shared::constants::{LIVENESS_MESSAGE, NOT_FOUND_MESSAGE};
use crate::shared::types::StatusResponse;

/// Settings for the outer HTTP layers
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    pub api_docs: ApiDocsConfig,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024 * 1024,
            api_docs: ApiDocsConfig {
                title: "School API".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Record schools and list them by distance from a point".to_string(),
            },
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            cors_allowed_origins: config.app.cors_allowed_origins.clone(),
            max_request_body_size: config.app.max_request_body_size,
            api_docs: config.api_docs.clone(),
        }
    }
}

async fn liveness() -> Json<StatusResponse> {
    Json(StatusResponse {
        ok: true,
        message: LIVENESS_MESSAGE.to_string(),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

/// Every route the service answers, without outer layers
pub fn app_routes(school_service: Arc<SchoolService>, options: &RouterOptions) -> Router {
    let openapi = openapi::api_doc(&options.api_docs);
    let docs_route = Router::new().route(
        "/api-docs/openapi.json",
        get(move || {
            let openapi = openapi.clone();
            async move { Json(openapi) }
        }),
    );

    Router::new()
        .route("/", get(liveness))
        .merge(schools_routes::routes(school_service))
        .merge(docs_route)
}

/// Wrap `routes` in the 404 fallbacks and the shared layer stack.
///
/// Must be applied after every route is registered; the method fallback only
/// reaches routes that already exist.
pub fn apply_layers(routes: Router, options: &RouterOptions) -> Router {
    routes
        .fallback(not_found)
        // a known path with an unsupported method is still "not found"
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(options.max_request_body_size))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(middleware::cors_layer(&options.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

/// Assemble the application router with every layer applied
pub fn build_router(school_service: Arc<SchoolService>, options: RouterOptions) -> Router {
    apply_layers(app_routes(school_service, &options), &options)
}
