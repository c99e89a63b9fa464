mod account;
mod errors;
#[cfg(test)]
mod tests;
mod transaction;

pub use account::Account;
pub use errors::ParseError;
pub use transaction::Transaction;

/// Result of offering a transaction to an account.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Admission {
    Accepted,
    Rejected(Rejection)
}

/// Why a transaction landed in the rejected bucket. These are data outcomes, not faults.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rejection {
    /// The embedded amount in the company field disagreed with the record amount.
    Invalid,
    /// An accepted transaction with the same identity already exists.
    Duplicate,
    /// Accepting the amount would overflow the running balance.
    Overflow
}
