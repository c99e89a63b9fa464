use thiserror::Error;

use crate::sources::FetchError;

/// Terminal failures of a retrieval run.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("First page did not report a totalCount")]
    MissingTotalCount,
    #[error("Page [{page}] failed after [{attempts}] attempts: {source}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        #[source]
        source: FetchError
    },
    #[error("Page [{page}] was empty after [{seen}] of [{total}] records")]
    Truncated {
        page: u32,
        seen: u64,
        total: u64
    }
}
