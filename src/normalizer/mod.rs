mod transaction_normalizer;

use serde::Deserialize;

pub use transaction_normalizer::TransactionNormalizer;

/// A transaction record exactly as delivered by a page source.
///
/// Every field is optional at the decoding level so that a missing field
/// surfaces as a named `ParseError` rather than a decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<RawAmount>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Ledger")]
    pub ledger: Option<String>
}

/// Sources send amounts either as strings (`"-25.05"`) or bare JSON numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(serde_json::Number)
}

impl RawAmount {
    pub fn as_text(&self) -> String {
        match self {
            RawAmount::Text(text) => text.clone(),
            RawAmount::Number(number) => number.to_string()
        }
    }
}
