//! Read-only lookup data fetched from the accounting API.

use motor_core::{AccountId, ThirdPartyId};
use serde::{Deserialize, Serialize};

/// Ledger account as listed by `GET /accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub code: String,
    pub name: String,
}

impl Account {
    /// Text shown in the account dropdown.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Customer, supplier or employee referenced by a voucher or line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdParty {
    pub id: ThirdPartyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl ThirdParty {
    pub fn label(&self) -> String {
        match &self.document {
            Some(doc) => format!("{} ({doc})", self.name),
            None => self.name.clone(),
        }
    }
}
