//! reqwest-backed implementation of [`AccountingApi`].

use async_trait::async_trait;
use motor_core::VoucherId;
use motor_vouchers::{Account, ThirdParty, VoucherPayload};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::{AccountingApi, CreatedVoucher, PostedVoucher};
use crate::config::ClientConfig;
use crate::envelope::{self, AccountsData, CreatedData, Decoded, ThirdPartiesData};
use crate::error::ApiError;

/// HTTP client for the accounting API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpAccountingClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl HttpAccountingClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            token: None,
        }
    }

    pub fn with_token(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(api_url)
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.token {
            Some(token) => Self::with_token(config.api_url.clone(), token.clone()),
            None => Self::new(config.api_url.clone()),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<Decoded<T>, ApiError> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(request = what, error = %e, "accounting API unreachable");
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let decoded = envelope::decode_body(status, &body);
        match &decoded {
            Ok(_) => tracing::debug!(request = what, status, "accounting API call succeeded"),
            Err(e) => tracing::warn!(request = what, status, error = %e, "accounting API call failed"),
        }
        decoded
    }

    async fn send_data<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T, ApiError> {
        self.send(req, what)
            .await?
            .data
            .ok_or_else(|| ApiError::Parse(format!("{what}: response has no data")))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AccountingApi for HttpAccountingClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let data: AccountsData = self
            .send_data(self.request(Method::GET, "/accounts"), "list_accounts")
            .await?;
        Ok(data.accounts)
    }

    async fn list_third_parties(&self) -> Result<Vec<ThirdParty>, ApiError> {
        let data: ThirdPartiesData = self
            .send_data(self.request(Method::GET, "/third-parties"), "list_third_parties")
            .await?;
        Ok(data.third_parties)
    }

    async fn create_voucher(&self, payload: &VoucherPayload) -> Result<CreatedVoucher, ApiError> {
        let req = self.request(Method::POST, "/vouchers").json(payload);
        let data: CreatedData = self.send_data(req, "create_voucher").await?;
        let created = CreatedVoucher::from(data);
        tracing::info!(voucher_id = %created.id, number = %created.number, "voucher created");
        Ok(created)
    }

    async fn post_voucher(&self, id: VoucherId) -> Result<PostedVoucher, ApiError> {
        let path = format!("/vouchers/{id}/post");
        let decoded: Decoded<serde_json::Value> = self
            .send(self.request(Method::POST, &path), "post_voucher")
            .await?;
        tracing::info!(voucher_id = %id, "voucher posted");
        Ok(PostedVoucher {
            voucher_id: id,
            message: decoded.message,
            data: decoded.data,
        })
    }
}
