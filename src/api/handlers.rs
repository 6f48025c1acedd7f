use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::{info, instrument};

use crate::{
    api::{
        dtos::{ErrorResponse, ScrapeQuery, ScrapeResponse},
        errors::{ApiError, MISSING_URL},
    },
    app_state::AppState,
    export::{ChartSeries, chart_series, records_to_csv},
    extractor::Record,
};

const CSV_FILENAME: &str = "records.csv";

#[instrument(skip_all, fields(url = tracing::field::Empty))]
async fn load_records(state: &AppState, query: &ScrapeQuery) -> Result<Vec<Record>, ApiError> {
    let url = query
        .page_url()
        .ok_or_else(|| ApiError::BadRequest(MISSING_URL.to_string()))?;
    tracing::Span::current().record("url", url);

    let html = state.source.fetch_html(url).await?;
    let records = state.extractor.extract(&html);

    info!(
        records = records.len(),
        marker = state.extractor.marker(),
        "extracted records"
    );
    Ok(records)
}

#[utoipa::path(
    get,
    path = "/api/scrape",
    tag = "scrape",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Records of the best table (possibly empty)", body = ScrapeResponse),
        (status = 400, description = "Missing or invalid url", body = ErrorResponse),
        (status = 500, description = "Page could not be fetched", body = ErrorResponse)
    )
)]
pub async fn scrape(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let data = load_records(&state, &query).await?;
    Ok(Json(ScrapeResponse { data }))
}

#[utoipa::path(
    get,
    path = "/api/scrape/csv",
    tag = "scrape",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Records as a CSV download", body = String, content_type = "text/csv"),
        (status = 400, description = "Missing or invalid url", body = ErrorResponse),
        (status = 500, description = "Page could not be fetched", body = ErrorResponse)
    )
)]
pub async fn scrape_csv(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = load_records(&state, &query).await?;
    let body = records_to_csv(&records)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/api/scrape/chart",
    tag = "scrape",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Chart series derived from the records", body = ChartSeries),
        (status = 400, description = "Missing or invalid url", body = ErrorResponse),
        (status = 500, description = "Page could not be fetched", body = ErrorResponse)
    )
)]
pub async fn scrape_chart(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> Result<Json<ChartSeries>, ApiError> {
    let records = load_records(&state, &query).await?;
    Ok(Json(chart_series(&records)))
}
