mod config;
mod errors;
mod retrieval;

pub use config::RetrievalConfig;
pub use errors::RetrievalError;
pub use retrieval::{RetrievalOrchestrator, RetrievalSummary};
