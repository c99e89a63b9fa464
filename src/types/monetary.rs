use crate::types::errors::MonetaryError;
use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DECIMAL_PLACES: u32 = 2;

/// A signed amount held at a fixed scale of two decimal places.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Monetary(Decimal);

impl Monetary {
    pub fn new() -> Self {
        Monetary(Decimal::ZERO)
    }

    pub fn checked_add(self, rhs: Monetary) -> Option<Monetary> {
        self.0.checked_add(rhs.0).map(Monetary)
    }
}

impl AddAssign<Monetary> for Monetary {
    fn add_assign(&mut self, rhs: Monetary) {
        if let Some(new_val) = self.checked_add(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Monetary AddAssign error: Overflow")
        }
    }
}

impl Display for Monetary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.*}", DECIMAL_PLACES as usize, self.0)
    }
}

impl FromStr for Monetary {
    type Err = MonetaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(MonetaryError::InvalidFormat("Value is an empty string".to_string()));
        }

        //NOTE: Decimal::from_str also takes "1_000" and similar, only plain [sign]digits[.digits] is an amount here
        let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "0"));

        if integer.is_empty() || fraction.is_empty() || !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(MonetaryError::InvalidFormat(format!("Value [{value}] is not a plain decimal number")));
        }

        let mut decimal = Decimal::from_str(value).map_err(|error| {
            MonetaryError::InvalidFormat(format!("Value [{value}] is not a decimal: {error}"))
        })?.normalize();

        //NOTE: "1.500" is fine, "1.505" is not; trailing zeros are dropped by normalize() before the check
        if decimal.scale() > DECIMAL_PLACES {
            return Err(MonetaryError::ExcessPrecision(DECIMAL_PLACES));
        }

        decimal.rescale(DECIMAL_PLACES);

        Ok(Monetary(decimal))
    }
}
