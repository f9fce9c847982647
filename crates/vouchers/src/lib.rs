//! Voucher drafts (double-entry lines, balance rule, submit payload).
//!
//! Pure domain logic only: no IO, no HTTP, no DOM.

pub mod draft;
pub mod error;
pub mod line;
pub mod payload;
pub mod reference;
pub mod totals;

pub use draft::{MIN_LINES, VoucherDraft, VoucherType};
pub use error::DraftError;
pub use line::{AmountInput, LineDraft, LineId, LineIdGen};
pub use payload::{VoucherLinePayload, VoucherPayload};
pub use reference::{Account, ThirdParty};
pub use totals::{BalanceStatus, BalanceTolerance, Totals};
