//! Voucher lines as edited in the form.

use motor_core::{AccountId, Amount, ThirdPartyId};
use serde::{Deserialize, Serialize};

/// Identifier of a line within one draft.
///
/// Local to the draft that issued it and never sent to the API.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(u32);

impl LineId {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for LineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Monotonic id source scoped to a single draft. Ids are never reused,
/// even after the line that held one is removed.
#[derive(Debug, Clone)]
pub struct LineIdGen {
    next: u32,
}

impl LineIdGen {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> LineId {
        let id = LineId(self.next);
        self.next += 1;
        id
    }
}

impl Default for LineIdGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw text of an amount field, kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountInput(String);

impl AmountInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Value used for totals. Empty or unparseable text counts as zero.
    pub fn amount(&self) -> Amount {
        Amount::parse_or_zero(&self.0)
    }
}

impl From<Amount> for AmountInput {
    fn from(value: Amount) -> Self {
        Self(value.value().to_string())
    }
}

/// One debit/credit row of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    id: LineId,
    pub account_id: Option<AccountId>,
    pub description: String,
    pub debit: AmountInput,
    pub credit: AmountInput,
    pub third_party_id: Option<ThirdPartyId>,
}

impl LineDraft {
    pub fn empty(id: LineId) -> Self {
        Self {
            id,
            account_id: None,
            description: String::new(),
            debit: AmountInput::default(),
            credit: AmountInput::default(),
            third_party_id: None,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn debit_amount(&self) -> Amount {
        self.debit.amount()
    }

    pub fn credit_amount(&self) -> Amount {
        self.credit.amount()
    }

    /// True when either column holds a strictly positive amount.
    pub fn has_amount(&self) -> bool {
        self.debit_amount().is_positive() || self.credit_amount().is_positive()
    }

    /// Whether the line is carried into the submitted payload.
    pub fn contributes(&self) -> bool {
        self.account_id.is_some() && self.has_amount()
    }
}
