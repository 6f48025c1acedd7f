use axum::Router;

use progression::{
    api, app_state::AppState, config::Config, extractor::TableExtractor, fetcher::PageFetcher,
};

/// Router wired to the real HTTP fetcher with default limits.
pub fn test_app() -> Router {
    test_app_with(Config::default().table_extractor().unwrap())
}

pub fn test_app_with(extractor: TableExtractor) -> Router {
    let fetcher = PageFetcher::new(&Config::default().fetch_settings()).unwrap();
    api::router(AppState::new(fetcher, extractor))
}
