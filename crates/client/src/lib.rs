//! `motor-client`
//!
//! **Responsibility:** talk to the external accounting API.
//!
//! The API (rules engine, journal posting, persistence) lives outside this
//! workspace. This crate only knows its wire contract:
//! - `GET /accounts`, `GET /third-parties` for reference data
//! - `POST /vouchers` to create a voucher
//! - `POST /vouchers/{id}/post` to generate its journal entry
//!
//! Every call is attempted exactly once; there is no retry or timeout.

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;

pub use api::{AccountingApi, CreatedVoucher, PostedVoucher};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::HttpAccountingClient;
