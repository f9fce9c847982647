//! The voucher being composed in the entry form.

use chrono::NaiveDate;
use motor_core::ThirdPartyId;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::line::{LineDraft, LineId, LineIdGen};
use crate::payload::{VoucherLinePayload, VoucherPayload};
use crate::totals::{BalanceTolerance, Totals};

/// A draft never holds fewer lines than this.
pub const MIN_LINES: usize = 2;

/// Kind of accounting document.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    #[default]
    Journal,
    Sale,
    Purchase,
    Receipt,
    Payment,
    Adjustment,
}

impl VoucherType {
    pub const ALL: [VoucherType; 6] = [
        VoucherType::Journal,
        VoucherType::Sale,
        VoucherType::Purchase,
        VoucherType::Receipt,
        VoucherType::Payment,
        VoucherType::Adjustment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherType::Journal => "journal",
            VoucherType::Sale => "sale",
            VoucherType::Purchase => "purchase",
            VoucherType::Receipt => "receipt",
            VoucherType::Payment => "payment",
            VoucherType::Adjustment => "adjustment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoucherType::Journal => "Journal",
            VoucherType::Sale => "Sale",
            VoucherType::Purchase => "Purchase",
            VoucherType::Receipt => "Cash receipt",
            VoucherType::Payment => "Payment",
            VoucherType::Adjustment => "Adjustment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Transient, page-scoped voucher state.
#[derive(Debug, Clone)]
pub struct VoucherDraft {
    pub voucher_type: VoucherType,
    pub date: NaiveDate,
    pub description: String,
    pub reference: String,
    pub third_party_id: Option<ThirdPartyId>,
    lines: Vec<LineDraft>,
    ids: LineIdGen,
}

impl VoucherDraft {
    /// Blank draft holding the minimum number of empty lines.
    pub fn new(date: NaiveDate) -> Self {
        let mut draft = Self {
            voucher_type: VoucherType::default(),
            date,
            description: String::new(),
            reference: String::new(),
            third_party_id: None,
            lines: Vec::with_capacity(MIN_LINES),
            ids: LineIdGen::new(),
        };
        draft.ensure_min_lines();
        draft
    }

    pub fn lines(&self) -> &[LineDraft] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&LineDraft> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn line_mut(&mut self, id: LineId) -> Result<&mut LineDraft, DraftError> {
        self.lines
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or(DraftError::LineNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append an empty line and return its fresh id.
    pub fn add_line(&mut self) -> LineId {
        let id = self.ids.next_id();
        self.lines.push(LineDraft::empty(id));
        id
    }

    /// Remove a line, refusing when that would leave fewer than
    /// [`MIN_LINES`] lines.
    pub fn remove_line(&mut self, id: LineId) -> Result<LineDraft, DraftError> {
        if self.lines.len() <= MIN_LINES {
            return Err(DraftError::MinimumLines { min: MIN_LINES });
        }
        let pos = self
            .lines
            .iter()
            .position(|l| l.id() == id)
            .ok_or(DraftError::LineNotFound(id))?;
        Ok(self.lines.remove(pos))
    }

    /// Top the draft up to [`MIN_LINES`] empty lines.
    pub fn ensure_min_lines(&mut self) {
        while self.lines.len() < MIN_LINES {
            self.add_line();
        }
    }

    pub fn totals(&self, tolerance: BalanceTolerance) -> Totals {
        Totals::compute(&self.lines, tolerance)
    }

    /// Validate against `totals` (as last displayed) and build the request
    /// body. Lines without an account and amount are left out.
    pub fn to_payload(&self, totals: &Totals) -> Result<VoucherPayload, DraftError> {
        if !totals.is_balanced() {
            return Err(DraftError::Unbalanced {
                difference: totals.difference,
            });
        }
        if totals.debit.is_zero() {
            return Err(DraftError::ZeroTotal);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }
        if let Some(pos) = self
            .lines
            .iter()
            .position(|l| l.has_amount() && l.account_id.is_none())
        {
            return Err(DraftError::MissingAccount { position: pos + 1 });
        }

        let voucher_lines = self
            .lines
            .iter()
            .filter(|l| l.contributes())
            .filter_map(|l| {
                Some(VoucherLinePayload {
                    account_id: l.account_id?,
                    description: l.description.trim().to_string(),
                    debit_amount: l.debit_amount(),
                    credit_amount: l.credit_amount(),
                    third_party_id: l.third_party_id,
                })
            })
            .collect();

        Ok(VoucherPayload {
            voucher_type: self.voucher_type,
            date: self.date,
            description: self.description.trim().to_string(),
            reference: self.reference.trim().to_string(),
            third_party_id: self.third_party_id,
            voucher_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::AmountInput;
    use motor_core::{AccountId, Amount};
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn fill(draft: &mut VoucherDraft, id: LineId, account: i64, debit: &str, credit: &str) {
        let line = draft.line_mut(id).unwrap();
        line.account_id = Some(AccountId::new(account));
        line.debit = AmountInput::new(debit);
        line.credit = AmountInput::new(credit);
    }

    fn sale_draft() -> VoucherDraft {
        let mut draft = VoucherDraft::new(date());
        draft.voucher_type = VoucherType::Sale;
        draft.description = "  Sale of goods ".to_string();
        let ids: Vec<LineId> = draft.lines().iter().map(LineDraft::id).collect();
        fill(&mut draft, ids[0], 1305, "100000", "0");
        fill(&mut draft, ids[1], 4135, "0", "60000");
        let third = draft.add_line();
        fill(&mut draft, third, 2408, "0", "40000");
        draft
    }

    #[test]
    fn new_draft_has_two_empty_lines() {
        let draft = VoucherDraft::new(date());
        assert_eq!(draft.len(), MIN_LINES);
        assert!(draft.lines().iter().all(|l| !l.has_amount()));
        assert_ne!(draft.lines()[0].id(), draft.lines()[1].id());
    }

    #[test]
    fn remove_refuses_below_minimum() {
        let mut draft = VoucherDraft::new(date());
        let first = draft.lines()[0].id();
        assert_eq!(
            draft.remove_line(first),
            Err(DraftError::MinimumLines { min: MIN_LINES })
        );
        assert_eq!(draft.len(), 2);

        draft.add_line();
        assert!(draft.remove_line(first).is_ok());
        assert_eq!(draft.len(), 2);
        assert!(draft.line(first).is_none());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut draft = VoucherDraft::new(date());
        let third = draft.add_line();
        draft.remove_line(third).unwrap();
        let fourth = draft.add_line();
        assert!(fourth > third);
    }

    #[test]
    fn removing_unknown_line_is_reported() {
        let mut draft = VoucherDraft::new(date());
        let extra = draft.add_line();
        draft.remove_line(extra).unwrap();
        draft.add_line();
        assert_eq!(draft.remove_line(extra), Err(DraftError::LineNotFound(extra)));
    }

    #[test]
    fn balanced_sale_builds_payload() {
        let draft = sale_draft();
        let totals = draft.totals(BalanceTolerance::default());
        let payload = draft.to_payload(&totals).unwrap();

        assert_eq!(payload.voucher_type, VoucherType::Sale);
        assert_eq!(payload.description, "Sale of goods");
        assert_eq!(payload.voucher_lines.len(), 3);
        assert_eq!(payload.voucher_lines[0].debit_amount, Amount::from_units(100_000));
        assert_eq!(payload.voucher_lines[2].credit_amount, Amount::from_units(40_000));
    }

    #[test]
    fn placeholder_lines_are_dropped() {
        let mut draft = sale_draft();
        draft.add_line();
        let with_account = draft.add_line();
        draft.line_mut(with_account).unwrap().account_id = Some(AccountId::new(9));

        let totals = draft.totals(BalanceTolerance::default());
        let payload = draft.to_payload(&totals).unwrap();
        assert_eq!(draft.len(), 5);
        assert_eq!(payload.voucher_lines.len(), 3);
        assert!(payload.voucher_lines.iter().all(|l| l.account_id != AccountId::new(9)));
    }

    #[test]
    fn unbalanced_is_rejected() {
        let mut draft = sale_draft();
        let first = draft.lines()[0].id();
        draft.line_mut(first).unwrap().debit = AmountInput::new("99000");
        let totals = draft.totals(BalanceTolerance::default());
        assert_eq!(
            draft.to_payload(&totals).unwrap_err(),
            DraftError::Unbalanced {
                difference: Amount::from_units(1_000)
            }
        );
    }

    #[test]
    fn zero_total_is_rejected_even_though_balanced() {
        let mut draft = VoucherDraft::new(date());
        draft.description = "Empty".to_string();
        let totals = draft.totals(BalanceTolerance::default());
        assert!(totals.is_balanced());
        assert_eq!(draft.to_payload(&totals).unwrap_err(), DraftError::ZeroTotal);
    }

    #[test]
    fn missing_description_is_rejected() {
        let mut draft = sale_draft();
        draft.description = "   ".to_string();
        let totals = draft.totals(BalanceTolerance::default());
        assert_eq!(draft.to_payload(&totals).unwrap_err(), DraftError::MissingDescription);
    }

    #[test]
    fn amount_without_account_is_rejected() {
        let mut draft = sale_draft();
        let third = draft.lines()[2].id();
        draft.line_mut(third).unwrap().account_id = None;
        let totals = draft.totals(BalanceTolerance::default());
        assert_eq!(
            draft.to_payload(&totals).unwrap_err(),
            DraftError::MissingAccount { position: 3 }
        );
    }

    #[test]
    fn validation_uses_the_displayed_totals() {
        let mut draft = sale_draft();
        let stale = draft.totals(BalanceTolerance::default());
        let first = draft.lines()[0].id();
        draft.line_mut(first).unwrap().debit = AmountInput::new("1");
        // Totals not recomputed: the displayed state still reads balanced.
        assert!(draft.to_payload(&stale).is_ok());
    }

    #[test]
    fn voucher_type_round_trips_through_str() {
        for t in VoucherType::ALL {
            assert_eq!(VoucherType::parse(t.as_str()), Some(t));
        }
        assert_eq!(VoucherType::parse("bogus"), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Add), (0usize..8).prop_map(Op::Remove)]
    }

    proptest! {
        /// Property: no sequence of add/remove drops the draft below two lines.
        #[test]
        fn line_count_never_below_minimum(ops in prop::collection::vec(op(), 0..64)) {
            let mut draft = VoucherDraft::new(date());
            for op in ops {
                match op {
                    Op::Add => {
                        let before = draft.len();
                        draft.add_line();
                        prop_assert_eq!(draft.len(), before + 1);
                    }
                    Op::Remove(i) => {
                        let before = draft.len();
                        let id = draft.lines()[i % before].id();
                        match draft.remove_line(id) {
                            Ok(_) => prop_assert_eq!(draft.len(), before - 1),
                            Err(e) => {
                                prop_assert_eq!(e, DraftError::MinimumLines { min: MIN_LINES });
                                prop_assert_eq!(draft.len(), before);
                            }
                        }
                    }
                }
                prop_assert!(draft.len() >= MIN_LINES);
            }
        }
    }
}
