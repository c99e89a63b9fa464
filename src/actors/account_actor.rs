use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::models::{Account, Admission, Transaction};
use crate::storage::Storage;

/// Owns one account for the duration of a run.
///
/// Every `add_transaction` for the account happens on the actor's task, so the
/// dedup scan, balance update and index update form a single critical section.
pub struct AccountActor {
    sender: mpsc::UnboundedSender<Transaction>,
    handle: JoinHandle<()>
}

impl AccountActor {
    /// Spawns a new actor, hydrating the account from storage if it already exists.
    pub fn new<S: Storage>(name: String, storage: Arc<S>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Transaction>();

        let handle = spawn(async move {
            let mut account = storage.load(&name)
                .unwrap_or_else(|| Account::new(name.clone()));

            while let Some(transaction) = receiver.recv().await {
                let date = transaction.date();
                let amount = transaction.amount();
                let ledger = transaction.raw_ledger_text().to_string();

                match account.add_transaction(transaction) {
                    Admission::Accepted => {
                        debug!("Transaction [{date}]:[{amount}]:[{ledger}] for account [{name}] accepted");
                    },
                    Admission::Rejected(reason) => {
                        warn!("Transaction [{date}]:[{amount}]:[{ledger}] for account [{name}] rejected as {reason:?}");
                    }
                }
            }

            storage.save(&name, account);
        });

        Self { sender, handle }
    }

    /// Queues a transaction. Returns `false` if the actor has already stopped.
    pub fn accept(&self, transaction: Transaction) -> bool {
        self.sender.send(transaction).is_ok()
    }

    /// Closes the queue and waits until every queued transaction is applied and the
    /// account is back in storage.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
