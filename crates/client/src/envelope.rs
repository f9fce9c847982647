//! Response envelope shared by every endpoint:
//! `{ success?, data?, message?, error? }`.

use motor_vouchers::{Account, ThirdParty};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::CreatedVoucher;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
    /// Either an error code string or a structured object.
    pub error: Option<Value>,
}

impl<T> Envelope<T> {
    /// `message`, else `error` when it is a plain string.
    pub fn message_text(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.as_ref().and_then(|e| e.as_str().map(str::to_string)))
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountsData {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub struct ThirdPartiesData {
    pub third_parties: Vec<ThirdParty>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedData {
    Nested { voucher: CreatedVoucher },
    Flat(CreatedVoucher),
}

impl From<CreatedData> for CreatedVoucher {
    fn from(value: CreatedData) -> Self {
        match value {
            CreatedData::Nested { voucher } | CreatedData::Flat(voucher) => voucher,
        }
    }
}

/// Decoded body of a 2xx response.
pub struct Decoded<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Turn a status code and raw body into data or an [`ApiError`].
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<Decoded<T>, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Envelope<Value>>(body)
            .ok()
            .and_then(|env| env.message_text());
        return Err(ApiError::Api { status, message });
    }

    // Some endpoints answer 204 / empty body.
    if body.trim().is_empty() {
        return Ok(Decoded { data: None, message: None });
    }

    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    if envelope.success == Some(false) {
        let message = envelope
            .message_text()
            .unwrap_or_else(|| "request rejected".to_string());
        return Err(ApiError::Rejected(message));
    }

    let message = envelope.message_text();
    Ok(Decoded {
        data: envelope.data,
        message,
    })
}

/// Like [`decode_body`], but a missing `data` is a parse error.
pub fn decode_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    decode_body(status, body)?
        .data
        .ok_or_else(|| ApiError::Parse("response has no data".to_string()))
}
