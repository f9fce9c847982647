//! Voucher entry form controller.
//!
//! Owns the draft, the reference lists loaded from the API, the totals as
//! last displayed and a queue of notices for the view to show.

use std::time::Duration;

use chrono::NaiveDate;
use motor_client::{AccountingApi, ApiError, CreatedVoucher};
use motor_core::{AccountId, ThirdPartyId};
use motor_vouchers::{
    Account, AmountInput, BalanceTolerance, DraftError, LineId, ThirdParty, Totals, VoucherDraft,
    VoucherPayload, VoucherType,
};
use thiserror::Error;

use crate::notice::Notice;

const SAVE_FAILED: &str = "Could not save the voucher. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub tolerance: BalanceTolerance,
    /// Listing page opened after a successful submit.
    pub redirect_to: String,
    pub redirect_delay: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            tolerance: BalanceTolerance::default(),
            redirect_to: "/vouchers".to_string(),
            redirect_delay: Duration::from_millis(1500),
        }
    }
}

/// Navigation the view performs once `after` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub voucher: CreatedVoucher,
    pub redirect: Redirect,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] DraftError),
    #[error(transparent)]
    Transport(#[from] ApiError),
    #[error("the voucher is already being saved")]
    AlreadySubmitting,
}

pub struct VoucherForm<A> {
    api: A,
    config: FormConfig,
    draft: VoucherDraft,
    accounts: Vec<Account>,
    third_parties: Vec<ThirdParty>,
    totals: Totals,
    notices: Vec<Notice>,
    submitting: bool,
}

impl<A: AccountingApi> VoucherForm<A> {
    /// Load reference data and open a blank draft dated `today`.
    ///
    /// A failed load leaves that list empty and queues an error notice;
    /// the form is usable either way.
    pub async fn initialize(api: A, today: NaiveDate, config: FormConfig) -> Self {
        let mut notices = Vec::new();

        let accounts = match api.list_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                tracing::error!(error = %err, "failed to load accounts");
                notices.push(Notice::error(err.user_message("Could not load the chart of accounts.")));
                Vec::new()
            }
        };
        let third_parties = match api.list_third_parties().await {
            Ok(parties) => parties,
            Err(err) => {
                tracing::error!(error = %err, "failed to load third parties");
                notices.push(Notice::error(err.user_message("Could not load third parties.")));
                Vec::new()
            }
        };
        tracing::info!(
            accounts = accounts.len(),
            third_parties = third_parties.len(),
            "voucher form initialized"
        );

        let draft = VoucherDraft::new(today);
        let totals = draft.totals(config.tolerance);
        Self {
            api,
            config,
            draft,
            accounts,
            third_parties,
            totals,
            notices,
            submitting: false,
        }
    }
}

impl<A> VoucherForm<A> {
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn draft(&self) -> &VoucherDraft {
        &self.draft
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn third_parties(&self) -> &[ThirdParty] {
        &self.third_parties
    }

    /// Totals as last displayed.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn add_line(&mut self) {
        self.draft.add_line();
        self.recompute_totals();
    }

    /// Remove a line, refusing with a warning while only two remain.
    pub fn remove_line(&mut self, id: LineId) -> Result<(), DraftError> {
        match self.draft.remove_line(id) {
            Ok(_) => {
                self.recompute_totals();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(line = %id, error = %err, "line not removed");
                self.notices.push(Notice::warning(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn recompute_totals(&mut self) -> Totals {
        self.totals = self.draft.totals(self.config.tolerance);
        self.totals
    }

    pub fn set_debit(&mut self, id: LineId, text: impl Into<String>) -> Result<(), DraftError> {
        self.draft.line_mut(id)?.debit = AmountInput::new(text);
        self.recompute_totals();
        Ok(())
    }

    pub fn set_credit(&mut self, id: LineId, text: impl Into<String>) -> Result<(), DraftError> {
        self.draft.line_mut(id)?.credit = AmountInput::new(text);
        self.recompute_totals();
        Ok(())
    }

    pub fn set_account(&mut self, id: LineId, account: Option<AccountId>) -> Result<(), DraftError> {
        self.draft.line_mut(id)?.account_id = account;
        Ok(())
    }

    pub fn set_line_description(&mut self, id: LineId, text: impl Into<String>) -> Result<(), DraftError> {
        self.draft.line_mut(id)?.description = text.into();
        Ok(())
    }

    pub fn set_line_third_party(&mut self, id: LineId, party: Option<ThirdPartyId>) -> Result<(), DraftError> {
        self.draft.line_mut(id)?.third_party_id = party;
        Ok(())
    }

    pub fn set_voucher_type(&mut self, voucher_type: VoucherType) {
        self.draft.voucher_type = voucher_type;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.date = date;
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.draft.description = text.into();
    }

    pub fn set_reference(&mut self, text: impl Into<String>) {
        self.draft.reference = text.into();
    }

    pub fn set_third_party(&mut self, party: Option<ThirdPartyId>) {
        self.draft.third_party_id = party;
    }

    /// Validate against the displayed totals and mark the form as
    /// submitting. The caller sends the returned payload and reports the
    /// result through [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<VoucherPayload, SubmitError> {
        if self.submitting {
            return Err(SubmitError::AlreadySubmitting);
        }
        match self.draft.to_payload(&self.totals) {
            Ok(payload) => {
                self.submitting = true;
                tracing::info!(
                    lines = payload.voucher_lines.len(),
                    total = %payload.total_debit(),
                    "submitting voucher"
                );
                Ok(payload)
            }
            Err(err) => {
                tracing::warn!(error = %err, "voucher rejected before submit");
                self.notices.push(Notice::error(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Record the create-voucher result. Success resets the draft; failure
    /// keeps it for resubmission.
    pub fn finish_submit(&mut self, result: Result<CreatedVoucher, ApiError>) -> Result<SubmitOutcome, SubmitError> {
        self.submitting = false;
        match result {
            Ok(voucher) => {
                self.notices
                    .push(Notice::success(format!("Voucher {} saved.", voucher.number)));
                self.draft = VoucherDraft::new(self.draft.date);
                self.recompute_totals();
                Ok(SubmitOutcome {
                    voucher,
                    redirect: Redirect {
                        to: self.config.redirect_to.clone(),
                        after: self.config.redirect_delay,
                    },
                })
            }
            Err(err) => {
                tracing::error!(error = %err, "voucher submit failed");
                self.notices.push(Notice::error(err.user_message(SAVE_FAILED)));
                Err(err.into())
            }
        }
    }

    /// Validate, send and record in one step.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError>
    where
        A: AccountingApi,
    {
        let payload = self.begin_submit()?;
        let result = self.api.create_voucher(&payload).await;
        self.finish_submit(result)
    }
}
