use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::sources::{FetchError, Page, PageSource};

/// Fetches `<base_url>/<index>.json` over HTTP.
pub struct HttpPageSource {
    client: Client,
    base_url: String
}

impl HttpPageSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string()
        }
    }

    pub fn page_url(&self, index: u32) -> String {
        format!("{}/{}.json", self.base_url, index)
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, index: u32) -> Result<Page, FetchError> {
        let url = self.page_url(index);
        debug!("Fetching page [{index}] from {url}");

        let response = self.client.get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { page: index, source })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound { page: index }),
            status if !status.is_success() => return Err(FetchError::Status { page: index, status: status.as_u16() }),
            _ => {}
        }

        let body = response.bytes()
            .await
            .map_err(|source| FetchError::Transport { page: index, source })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { page: index, source })
    }
}
