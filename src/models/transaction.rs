use chrono::NaiveDate;

use crate::types::Monetary;

/// A single normalized and validated ledger entry.
///
/// Built only by the `TransactionNormalizer`; every field, including `is_valid`,
/// is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    amount: Monetary,
    /// Display form of the payee after card and amount metadata are stripped.
    entity_name: String,
    /// The original free-text description.
    raw_ledger_text: String,
    /// Masked card fragment (e.g. `#1242` or `xxxx1242`) found in the company field.
    card_suffix: Option<String>,
    is_valid: bool,
    /// Lowercase tokens of the ledger text, in order, duplicates kept.
    keywords: Vec<String>
}

/// The fields that decide whether two transactions are the same entry.
pub type TransactionIdentity<'a> = (NaiveDate, Monetary, &'a str, &'a str, Option<&'a str>, bool);

impl Transaction {
    pub(crate) fn new(
        date: NaiveDate,
        amount: Monetary,
        entity_name: String,
        raw_ledger_text: String,
        card_suffix: Option<String>,
        is_valid: bool,
        keywords: Vec<String>
    ) -> Self {
        Self {
            date,
            amount,
            entity_name,
            raw_ledger_text,
            card_suffix,
            is_valid,
            keywords
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Monetary {
        self.amount
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn raw_ledger_text(&self) -> &str {
        &self.raw_ledger_text
    }

    pub fn card_suffix(&self) -> Option<&str> {
        self.card_suffix.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Identity tuple used for duplicate detection. Keywords are left out since
    /// they are derived from the ledger text.
    pub fn identity(&self) -> TransactionIdentity<'_> {
        (
            self.date,
            self.amount,
            &self.entity_name,
            &self.raw_ledger_text,
            self.card_suffix.as_deref(),
            self.is_valid
        )
    }
}
