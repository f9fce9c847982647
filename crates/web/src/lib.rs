//! `motor-web`
//!
//! **Responsibility:** browser-side controllers of the Motor Contable site.
//!
//! - [`sidebar`]: collapsible navigation panel with a persisted preference
//! - [`voucher_form`]: voucher entry with live balance tracking
//!
//! Controllers are plain Rust and run natively under test. The Leptos views
//! binding them to the DOM are compiled for `wasm32` only.

pub mod notice;
pub mod sidebar;
pub mod storage;
pub mod voucher_form;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use notice::{Notice, NoticeLevel};
pub use sidebar::{NavEntry, Sidebar, SidebarConfig, SidebarMode};
pub use storage::{MemoryStore, PreferenceStore, StorageError};
pub use voucher_form::{FormConfig, Redirect, SubmitError, SubmitOutcome, VoucherForm};
