//! `motor-core` — shared building blocks for the Motor Contable front end.
//!
//! Pure values only: typed identifiers, money amounts and the domain error.
//! Nothing here performs IO.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{AccountId, ThirdPartyId, VoucherId};
pub use money::Amount;
