//! Errors raised while turning user input into domain values.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Malformed values only. Transport failures belong to `motor-client`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("not an amount: {input:?}")]
    InvalidAmount { input: String },

    #[error("amount must not be negative: {input:?}")]
    NegativeAmount { input: String },

    #[error("amount is too large: {input:?}")]
    AmountTooLarge { input: String },

    /// `kind` names the identifier type, e.g. `AccountId`.
    #[error("invalid {kind}: {reason}")]
    InvalidId { kind: &'static str, reason: String },
}

impl DomainError {
    pub fn invalid_amount(input: &str) -> Self {
        Self::InvalidAmount { input: input.to_string() }
    }

    pub fn invalid_id(kind: &'static str, reason: impl ToString) -> Self {
        Self::InvalidId { kind, reason: reason.to_string() }
    }
}
