//! The accounting API as seen by the front end.

use async_trait::async_trait;
use motor_core::VoucherId;
use motor_vouchers::{Account, ThirdParty, VoucherPayload};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Voucher created by `POST /vouchers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedVoucher {
    pub id: VoucherId,
    /// Consecutive number assigned by the server (e.g. `"CD-0012"` or `12`).
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
}

/// Response of `POST /vouchers/{id}/post`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedVoucher {
    pub voucher_id: VoucherId,
    pub message: Option<String>,
    /// Whatever the server returned under `data` (journal entry, lines...).
    pub data: Option<serde_json::Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

/// Remote operations used by the voucher form and the scenarios.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AccountingApi {
    /// `GET /accounts`
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError>;

    /// `GET /third-parties`
    async fn list_third_parties(&self) -> Result<Vec<ThirdParty>, ApiError>;

    /// `POST /vouchers`
    async fn create_voucher(&self, payload: &VoucherPayload) -> Result<CreatedVoucher, ApiError>;

    /// `POST /vouchers/{id}/post` (no body).
    async fn post_voucher(&self, id: VoucherId) -> Result<PostedVoucher, ApiError>;
}
