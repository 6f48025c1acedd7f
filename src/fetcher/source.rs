use async_trait::async_trait;

use crate::fetcher::{client::PageFetcher, errors::FetchError};

/// Where page HTML comes from. The API holds one behind an `Arc`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.fetch(url).await?.body_utf8)
    }
}
