pub mod dtos;
pub mod errors;
pub mod handlers;

pub use errors::ApiError;

use axum::{Router, routing::get};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, export::ChartSeries, extractor::Record, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        handlers::scrape,
        handlers::scrape_csv,
        handlers::scrape_chart
    ),
    components(schemas(
        Record,
        ChartSeries,
        dtos::ScrapeResponse,
        dtos::ErrorResponse,
        health::HealthResponse
    )),
    tags(
        (name = "scrape", description = "Record progression extraction"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Full HTTP surface: scrape routes, health check, OpenAPI docs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/scrape", get(handlers::scrape))
        .route("/api/scrape/csv", get(handlers::scrape_csv))
        .route("/api/scrape/chart", get(handlers::scrape_chart))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
