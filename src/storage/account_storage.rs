use crate::models::{Account, Transaction};
use crate::storage::Storage;
use crate::types::Monetary;
use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Accounts keyed by normalized entity name.
///
/// Actors take an account out with `load` while they own it and put it back with
/// `save`; once a run has drained its actors the query methods see the final state.
pub struct AccountStorage {
    cache: Arc<DashMap<String, Account>>
}

impl AccountStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new())
        }
    }

    pub fn get(&self, name: &str) -> Option<Ref<'_, String, Account>> {
        self.cache.get(name)
    }

    /// Known account names, sorted.
    pub fn account_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cache.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn balance_as_of(&self, name: &str, date: NaiveDate) -> Option<Monetary> {
        self.get(name).map(|account| account.balance_as_of(date))
    }

    pub fn transactions_by_keyword(&self, name: &str, keyword: &str) -> Vec<Transaction> {
        self.get(name)
            .map(|account| account.transactions_by_keyword(keyword).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn categories(&self, name: &str) -> BTreeMap<String, Vec<Transaction>> {
        self.get(name)
            .map(|account| {
                account.categories()
                    .into_iter()
                    .map(|(keyword, transactions)| (keyword.to_string(), transactions.into_iter().cloned().collect()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Storage for AccountStorage {
    fn load(&self, name: &str) -> Option<Account> {
        self.cache.remove(name).map(|(_, account)| account)
    }

    fn save(&self, name: &str, account: Account) {
        self.cache.insert(name.to_string(), account);
    }
}
