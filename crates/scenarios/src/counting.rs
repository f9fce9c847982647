//! [`AccountingApi`] wrapper that counts write calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use motor_client::{AccountingApi, ApiError, CreatedVoucher, PostedVoucher};
use motor_core::VoucherId;
use motor_vouchers::{Account, ThirdParty, VoucherPayload};

/// Lets a scenario assert that a rejected voucher never reached the API.
#[derive(Debug, Clone)]
pub struct CountingApi<A> {
    inner: A,
    writes: Arc<AtomicUsize>,
}

impl<A> CountingApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner, writes: Arc::new(AtomicUsize::new(0)) }
    }

    /// Number of create/post calls made so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<A: AccountingApi + Send + Sync> AccountingApi for CountingApi<A> {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.inner.list_accounts().await
    }

    async fn list_third_parties(&self) -> Result<Vec<ThirdParty>, ApiError> {
        self.inner.list_third_parties().await
    }

    async fn create_voucher(&self, payload: &VoucherPayload) -> Result<CreatedVoucher, ApiError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create_voucher(payload).await
    }

    async fn post_voucher(&self, id: VoucherId) -> Result<PostedVoucher, ApiError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.post_voucher(id).await
    }
}
