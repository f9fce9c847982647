//! Built-in scenarios.

mod balanced_voucher;
mod post_voucher;
mod sale_with_tax;
mod unbalanced_rejected;

use anyhow::{Context, ensure};
use clap::ValueEnum;
use motor_client::AccountingApi;
use motor_vouchers::{Account, LineId};
use motor_web::{FormConfig, VoucherForm};

use crate::runner::ScenarioContext;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum ScenarioName {
    BalancedVoucher,
    UnbalancedRejected,
    SaleWithTax,
    PostVoucher,
}

impl ScenarioName {
    pub const ALL: [ScenarioName; 4] = [
        ScenarioName::BalancedVoucher,
        ScenarioName::UnbalancedRejected,
        ScenarioName::SaleWithTax,
        ScenarioName::PostVoucher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::BalancedVoucher => "balanced-voucher",
            ScenarioName::UnbalancedRejected => "unbalanced-rejected",
            ScenarioName::SaleWithTax => "sale-with-tax",
            ScenarioName::PostVoucher => "post-voucher",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            ScenarioName::BalancedVoucher => "Enter a three-line sale (100000 = 60000 + 40000) and save it",
            ScenarioName::UnbalancedRejected => "Unbalanced and zero-total vouchers are refused before any request",
            ScenarioName::SaleWithTax => "Save and post a sale, comparing the generated tax line with the expected one",
            ScenarioName::PostVoucher => "Save a journal voucher and post it to the ledger",
        }
    }

    pub async fn run<A>(self, ctx: &ScenarioContext<A>) -> anyhow::Result<()>
    where
        A: AccountingApi + Clone + Send + Sync,
    {
        match self {
            ScenarioName::BalancedVoucher => balanced_voucher::run(ctx).await,
            ScenarioName::UnbalancedRejected => unbalanced_rejected::run(ctx).await,
            ScenarioName::SaleWithTax => sale_with_tax::run(ctx).await,
            ScenarioName::PostVoucher => post_voucher::run(ctx).await,
        }
    }
}

/// Open the voucher form the way the page does and require a usable chart
/// of accounts.
async fn open_form<A, B>(ctx: &ScenarioContext<A>, api: B) -> anyhow::Result<VoucherForm<B>>
where
    B: AccountingApi,
{
    ctx.narrator.step("Open the voucher form").await;
    let mut form = VoucherForm::initialize(api, ctx.today, FormConfig::default()).await;
    for notice in form.take_notices() {
        tracing::warn!(level = ?notice.level, "  notice: {}", notice.message);
    }
    ctx.narrator.observed("accounts loaded", form.accounts().len());
    ctx.narrator.observed("third parties loaded", form.third_parties().len());
    ensure!(!form.accounts().is_empty(), "the form loaded no accounts");
    ensure!(form.draft().len() >= 2, "the form opened with {} lines", form.draft().len());
    Ok(form)
}

fn line_ids<B>(form: &VoucherForm<B>) -> Vec<LineId> {
    form.draft().lines().iter().map(|l| l.id()).collect()
}

/// Type one row: account, then debit, then credit.
async fn enter_line<A, B>(
    ctx: &ScenarioContext<A>,
    form: &mut VoucherForm<B>,
    id: LineId,
    account: &Account,
    debit: &str,
    credit: &str,
) -> anyhow::Result<()> {
    ctx.narrator
        .step(format!("Line {id}: {} debit {debit:>8} credit {credit:>8}", account.label()))
        .await;
    form.set_account(id, Some(account.id))
        .with_context(|| format!("choosing the account of line {id}"))?;
    form.set_debit(id, debit).with_context(|| format!("typing the debit of line {id}"))?;
    form.set_credit(id, credit).with_context(|| format!("typing the credit of line {id}"))?;
    let totals = form.totals();
    ctx.narrator.observed(
        "running totals",
        format!("debit {} / credit {} ({})", totals.debit, totals.credit, totals.status.as_str()),
    );
    Ok(())
}
