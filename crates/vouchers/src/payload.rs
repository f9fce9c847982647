//! Request body of `POST /vouchers`.

use chrono::NaiveDate;
use motor_core::{AccountId, Amount, ThirdPartyId};
use serde::{Deserialize, Serialize};

use crate::draft::VoucherType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherPayload {
    pub voucher_type: VoucherType,
    pub date: NaiveDate,
    pub description: String,
    pub reference: String,
    pub third_party_id: Option<ThirdPartyId>,
    pub voucher_lines: Vec<VoucherLinePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherLinePayload {
    pub account_id: AccountId,
    pub description: String,
    pub debit_amount: Amount,
    pub credit_amount: Amount,
    pub third_party_id: Option<ThirdPartyId>,
}

impl VoucherPayload {
    pub fn total_debit(&self) -> Amount {
        self.voucher_lines.iter().map(|l| l.debit_amount).sum()
    }

    pub fn total_credit(&self) -> Amount {
        self.voucher_lines.iter().map(|l| l.credit_amount).sum()
    }
}
