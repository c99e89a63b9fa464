use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Page [{page}] does not exist")]
    NotFound {
        page: u32
    },
    #[error("Page [{page}] request failed with status [{status}]")]
    Status {
        page: u32,
        status: u16
    },
    #[error("Page [{page}] request failed: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error
    },
    #[error("Page [{page}] could not be read: {source}")]
    Io {
        page: u32,
        #[source]
        source: std::io::Error
    },
    #[error("Page [{page}] is not a valid page payload: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error
    },
    #[error("Page [{page}] timed out")]
    Timeout {
        page: u32
    }
}
