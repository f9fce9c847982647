use motor_core::Amount;
use thiserror::Error;

use crate::line::LineId;

/// Validation failures raised while editing or submitting a draft.
///
/// All of them are recoverable by correcting the form. Messages are shown
/// to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("a voucher needs at least {min} lines")]
    MinimumLines { min: usize },

    #[error("line {0} does not exist")]
    LineNotFound(LineId),

    #[error("the voucher is not balanced: debits and credits differ by {difference}")]
    Unbalanced { difference: Amount },

    #[error("the voucher total must be greater than zero")]
    ZeroTotal,

    #[error("the voucher needs a description")]
    MissingDescription,

    #[error("line {position} has an amount but no account")]
    MissingAccount { position: usize },
}
