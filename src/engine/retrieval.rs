use crate::actors::AccountActor;
use crate::engine::{RetrievalConfig, RetrievalError};
use crate::normalizer::TransactionNormalizer;
use crate::sources::{FetchError, Page, PageSource};
use crate::storage::AccountStorage;
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// Counters describing a finished retrieval run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalSummary {
    /// The `totalCount` reported by page 1.
    pub total_count: u64,
    /// Records received so far, including those that failed to parse.
    pub records_seen: u64,
    /// Successful page fetches.
    pub pages_fetched: u32,
    /// Failed fetch attempts that were retried.
    pub retries: u32,
    /// Records dropped with a `ParseError`.
    pub skipped_records: u64
}

/// Pulls every page from a `PageSource` and feeds the records into per-account actors.
pub struct RetrievalOrchestrator<P: PageSource> {
    source: P,
    storage: Arc<AccountStorage>,
    config: RetrievalConfig
}

impl<P: PageSource> RetrievalOrchestrator<P> {
    pub fn new(source: P, storage: Arc<AccountStorage>) -> Self {
        Self {
            source,
            storage,
            config: RetrievalConfig::default()
        }
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the paging protocol to completion.
    ///
    /// Page 1 fixes `totalCount` for the whole run. Pages are then consumed in order
    /// until the number of records seen reaches it. Every account actor is drained
    /// into storage before this returns, whether the run succeeded or not.
    ///
    /// # Errors
    /// Returns `RetrievalError` if page 1 has no `totalCount`, a page keeps failing
    /// after `max_attempts`, or a page comes back empty before the total is reached.
    pub async fn run(&self) -> Result<RetrievalSummary, RetrievalError> {
        let mut actors = HashMap::<String, AccountActor>::new();
        let mut summary = RetrievalSummary::default();

        let result = self.retrieve(&mut actors, &mut summary).await;

        //NOTE: Drain actors on failure too, so whatever was retrieved stays queryable
        let despawns = actors.into_values().map(|actor| actor.despawn());

        for despawn_result in join_all(despawns).await {
            if let Err(error) = despawn_result {
                error!("An account actor did not despawn gracefully: {error:?}");
            }
        }

        match result {
            Ok(()) => {
                info!(
                    "Retrieved [{}] of [{}] records over [{}] pages ([{}] retries, [{}] skipped)",
                    summary.records_seen, summary.total_count, summary.pages_fetched, summary.retries, summary.skipped_records
                );
                Ok(summary)
            },
            Err(error) => {
                error!("Retrieval failed: {error}");
                Err(error)
            }
        }
    }

    async fn retrieve(&self, actors: &mut HashMap<String, AccountActor>, summary: &mut RetrievalSummary) -> Result<(), RetrievalError> {
        let first_page = self.fetch_with_retry(1, summary).await?;
        let total_count = first_page.total_count.ok_or(RetrievalError::MissingTotalCount)?;

        summary.total_count = total_count;

        let mut pending = Some(first_page);
        let mut page_index = 1;

        while summary.records_seen < total_count {
            let page = match pending.take() {
                Some(page) => page,
                None => self.fetch_with_retry(page_index, summary).await?
            };

            if page.transactions.is_empty() {
                return Err(RetrievalError::Truncated {
                    page: page_index,
                    seen: summary.records_seen,
                    total: total_count
                });
            }

            summary.records_seen += page.transactions.len() as u64;
            self.route(page_index, page.transactions, actors, summary);

            debug!("Page [{page_index}] consumed, [{}] of [{total_count}] records seen", summary.records_seen);

            page_index += 1;
        }

        Ok(())
    }

    async fn fetch_with_retry(&self, page_index: u32, summary: &mut RetrievalSummary) -> Result<Page, RetrievalError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match timeout(self.config.fetch_timeout, self.source.fetch_page(page_index)).await {
                Ok(Ok(page)) => {
                    summary.pages_fetched += 1;
                    return Ok(page);
                },
                Ok(Err(error)) => error,
                Err(_) => FetchError::Timeout { page: page_index }
            };

            if attempt >= max_attempts {
                return Err(RetrievalError::RetriesExhausted {
                    page: page_index,
                    attempts: attempt,
                    source: error
                });
            }

            warn!("Attempt [{attempt}] of [{max_attempts}] for page [{page_index}] failed: {error}");

            summary.retries += 1;
            sleep(self.config.retry_backoff * attempt).await;
            attempt += 1;
        }
    }

    fn route(&self, page_index: u32, records: Vec<Value>, actors: &mut HashMap<String, AccountActor>, summary: &mut RetrievalSummary) {
        for record in records {
            let transaction = match TransactionNormalizer::parse_value(record) {
                Ok(transaction) => transaction,
                Err(error) => {
                    summary.skipped_records += 1;
                    warn!("Skipping record on page [{page_index}]: {error}");
                    continue;
                }
            };

            let name = transaction.entity_name().to_string();

            let actor = actors.entry(name.clone()).or_insert_with(|| {
                AccountActor::new(name.clone(), self.storage.clone())
            });

            if !actor.accept(transaction) {
                error!("Account actor for [{name}] could not accept a transaction from page [{page_index}]");
            }
        }
    }
}
