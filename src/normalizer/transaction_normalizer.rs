use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::models::{ParseError, Transaction};
use crate::normalizer::RawRecord;
use crate::types::Monetary;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn card_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    //NOTE: the regex crate has no lookahead, the trailing group keeps a fifth digit from matching
    RE.get_or_init(|| Regex::new(r"(?i)([#x]+[0-9]{4})(?:[^0-9]|$)").expect("invalid card number regex"))
}

fn embedded_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)([0-9]+\.[0-9]{2}) ?usd").expect("invalid embedded amount regex"))
}

/// Turns raw page records into validated `Transaction`s. Stateless.
pub struct TransactionNormalizer;

/// Outcome of scanning an entity name for embedded card and amount metadata.
#[derive(Debug, PartialEq, Eq)]
struct SanityCheck {
    entity_name: String,
    card_suffix: Option<String>,
    is_valid: bool
}

impl TransactionNormalizer {
    /// Decodes a JSON record and parses it.
    pub fn parse_value(value: Value) -> Result<Transaction, ParseError> {
        let record: RawRecord = serde_json::from_value(value)?;
        Self::parse(&record)
    }

    /// Parses one raw record.
    ///
    /// # Errors
    /// Returns `ParseError` if a required field is absent, the date is not
    /// `YYYY-MM-DD`, or the amount is not a decimal with at most two places.
    pub fn parse(record: &RawRecord) -> Result<Transaction, ParseError> {
        let date = parse_date(required(record.date.as_deref(), "Date")?)?;

        let amount_text = record.amount.as_ref()
            .ok_or_else(|| ParseError::missing_field("Amount"))?
            .as_text();

        let amount = Monetary::from_str(&amount_text)
            .map_err(|error| ParseError::invalid_amount(&amount_text, error))?;

        let company = required(record.company.as_deref(), "Company")?;
        let ledger = required(record.ledger.as_deref(), "Ledger")?;

        let check = sanity_check(&collapse_whitespace(&company.to_lowercase()), amount);

        Ok(Transaction::new(
            date,
            amount,
            capitalize(&collapse_whitespace(&check.entity_name)),
            ledger.to_string(),
            check.card_suffix,
            check.is_valid,
            tokenize(ledger)
        ))
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ParseError> {
    value.ok_or_else(|| ParseError::missing_field(field))
}

fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    //NOTE: chrono accepts unpadded months and days, round-tripping the format rejects them
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
        .ok_or_else(|| ParseError::invalid_date(value))
}

/// Strips a masked card number and an embedded `<amount> usd` from the entity name.
/// The embedded amount, when present, must equal the record amount.
fn sanity_check(entity_name: &str, amount: Monetary) -> SanityCheck {
    let mut entity_name = entity_name.to_string();
    let mut card_suffix = None;
    let mut is_valid = true;

    let card = card_number_re().captures(&entity_name)
        .and_then(|captures| captures.get(1))
        .map(|card| (card.range(), card.as_str().to_string()));

    if let Some((range, card)) = card {
        entity_name.replace_range(range, "");
        card_suffix = Some(card);
    }

    let embedded = embedded_amount_re().captures(&entity_name)
        .and_then(|captures| Some((captures.get(0)?.range(), captures.get(1)?.as_str().to_string())));

    if let Some((range, embedded)) = embedded {
        is_valid = Monetary::from_str(&embedded).is_ok_and(|embedded| embedded == amount);
        entity_name.replace_range(range, "");
    }

    SanityCheck { entity_name, card_suffix, is_valid }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new()
    }
}

/// Lowercase whitespace-separated tokens. Anything that is not a letter, digit or
/// whitespace is dropped, Unicode quotes and dashes included.
fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}
