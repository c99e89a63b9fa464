use thiserror::Error;

use crate::types::MonetaryError;

/// A raw record that could not be turned into a `Transaction`.
///
/// Never fatal to a retrieval run: the record is counted as seen, logged and skipped.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Record is missing required field [{field}]")]
    MissingField {
        field: &'static str
    },
    #[error("Record has an unparsable date [{value}], expected YYYY-MM-DD")]
    InvalidDate {
        value: String
    },
    #[error("Record has an unparsable amount [{value}]: {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: MonetaryError
    },
    #[error("Record is malformed: {0}")]
    Malformed(#[from] serde_json::Error)
}

impl ParseError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_date(value: &str) -> Self {
        Self::InvalidDate { value: value.to_string() }
    }

    pub fn invalid_amount(value: &str, source: MonetaryError) -> Self {
        Self::InvalidAmount { value: value.to_string(), source }
    }
}
