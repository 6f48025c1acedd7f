use crate::{extractor::TableExtractor, fetcher::PageSource};
use std::sync::Arc;

/// Shared, read-only request dependencies. Each request owns its own results.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PageSource + Send + Sync>,
    pub extractor: Arc<TableExtractor>,
}

impl AppState {
    pub fn new(source: impl PageSource + Send + Sync + 'static, extractor: TableExtractor) -> Self {
        Self {
            source: Arc::new(source),
            extractor: Arc::new(extractor),
        }
    }
}
