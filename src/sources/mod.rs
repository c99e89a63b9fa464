mod directory;
mod errors;
mod http;
#[cfg(test)]
mod tests;

use std::future::Future;

use serde::Deserialize;
use serde_json::Value;

pub use directory::DirectoryPageSource;
pub use errors::FetchError;
pub use http::HttpPageSource;

/// One page of a paginated transaction listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Authoritative only on page 1.
    pub total_count: Option<u64>,
    #[serde(default)]
    pub transactions: Vec<Value>
}

/// Anything that can hand out pages by 1-based index.
///
/// Records are kept as raw JSON so that a malformed record fails on its own
/// instead of failing the whole page.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, index: u32) -> impl Future<Output = Result<Page, FetchError>> + Send;
}
