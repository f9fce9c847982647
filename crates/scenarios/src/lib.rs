//! `motor-scenarios`
//!
//! **Responsibility:** narrated end-to-end walkthroughs of a running Motor
//! Contable instance.
//!
//! Each scenario drives the voucher form controller and the accounting API
//! the way a user would, logs every step, and prints the figures the engine
//! is expected to produce so an observer can compare them with what the
//! site shows. Checks are coarse: HTTP success and the presence of the
//! expected response fields.

pub mod accounts;
pub mod cli;
pub mod counting;
pub mod narrator;
pub mod runner;
pub mod scenarios;
pub mod tax;

pub use narrator::Narrator;
pub use runner::{ScenarioContext, ScenarioReport, run_all};
pub use scenarios::ScenarioName;
