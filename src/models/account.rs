use crate::models::{Admission, Rejection, Transaction};
use crate::types::Monetary;
use chrono::NaiveDate;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

/// All transactions attributed to one normalized entity name.
///
/// The account is the sole owner of its transactions. Both the keyword index and
/// the duplicate fingerprints hold positions into `accepted`, never transactions.
#[derive(Debug, Clone)]
pub struct Account {
    /// The normalized entity name, used as the account key.
    pub name: String,
    /// Sum of the amounts of all accepted transactions.
    pub balance: Monetary,
    /// Accepted transactions in insertion order.
    accepted: Vec<Transaction>,
    /// Every invalid or duplicate transaction offered to this account.
    rejected: Vec<Transaction>,
    /// Keyword to positions in `accepted`, in insertion order, without repeats.
    keyword_index: HashMap<String, Vec<usize>>,
    /// Identity hash to positions in `accepted`; collisions are settled by full comparison.
    fingerprints: HashMap<u64, Vec<usize>>
}

impl Account {
    /// Creates a new, empty account for the given entity name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: Monetary::new(),
            accepted: Vec::new(),
            rejected: Vec::new(),
            keyword_index: HashMap::new(),
            fingerprints: HashMap::new()
        }
    }

    /// Offers a transaction to the account.
    ///
    /// Invalid transactions and exact duplicates of an already accepted transaction
    /// go to the rejected bucket and leave the balance and index untouched. Anything
    /// else is appended, added to the balance and registered under each of its
    /// distinct keywords.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Admission {
        if !transaction.is_valid() {
            return self.reject(transaction, Rejection::Invalid);
        }

        let fingerprint = fingerprint(&transaction);

        if self.is_duplicate(fingerprint, &transaction) {
            return self.reject(transaction, Rejection::Duplicate);
        }

        let Some(balance) = self.balance.checked_add(transaction.amount()) else {
            return self.reject(transaction, Rejection::Overflow);
        };

        let position = self.accepted.len();

        for keyword in transaction.keywords() {
            let positions = self.keyword_index.entry(keyword.clone()).or_default();

            //NOTE: positions only ever grow at the tail, so a repeated token in the same ledger text shows up as the last entry
            if positions.last() != Some(&position) {
                positions.push(position);
            }
        }

        self.fingerprints.entry(fingerprint).or_default().push(position);
        self.balance = balance;
        self.accepted.push(transaction);

        Admission::Accepted
    }

    /// Sum of accepted amounts dated strictly before `date`.
    pub fn balance_as_of(&self, date: NaiveDate) -> Monetary {
        let mut balance = Monetary::new();

        for transaction in self.accepted.iter().filter(|transaction| transaction.date() < date) {
            balance += transaction.amount();
        }

        balance
    }

    /// Case-insensitive keyword lookup. Returns an empty list for unknown keywords.
    pub fn transactions_by_keyword(&self, keyword: &str) -> Vec<&Transaction> {
        self.keyword_index
            .get(keyword.trim().to_lowercase().as_str())
            .map(|positions| self.resolve(positions))
            .unwrap_or_default()
    }

    /// The full keyword to transactions map, ordered by keyword.
    pub fn categories(&self) -> BTreeMap<&str, Vec<&Transaction>> {
        self.keyword_index
            .iter()
            .map(|(keyword, positions)| (keyword.as_str(), self.resolve(positions)))
            .collect()
    }

    pub fn accepted(&self) -> &[Transaction] {
        &self.accepted
    }

    pub fn rejected(&self) -> &[Transaction] {
        &self.rejected
    }

    fn reject(&mut self, transaction: Transaction, reason: Rejection) -> Admission {
        self.rejected.push(transaction);
        Admission::Rejected(reason)
    }

    fn is_duplicate(&self, fingerprint: u64, transaction: &Transaction) -> bool {
        self.fingerprints.get(&fingerprint).is_some_and(|positions| {
            positions.iter().any(|&position| self.accepted[position].identity() == transaction.identity())
        })
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&Transaction> {
        positions.iter().map(|&position| &self.accepted[position]).collect()
    }
}

fn fingerprint(transaction: &Transaction) -> u64 {
    let mut hasher = DefaultHasher::new();
    transaction.identity().hash(&mut hasher);
    hasher.finish()
}
