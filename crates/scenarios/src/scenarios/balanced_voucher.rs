use anyhow::{Context, ensure};
use motor_client::AccountingApi;
use motor_core::Amount;
use motor_vouchers::{BalanceStatus, VoucherType};

use super::{ScenarioName, enter_line, line_ids, open_form};
use crate::accounts::{self, RECEIVABLE, REVENUE, TAX_PAYABLE};
use crate::runner::ScenarioContext;

pub async fn run<A>(ctx: &ScenarioContext<A>) -> anyhow::Result<()>
where
    A: AccountingApi + Clone,
{
    let n = &ctx.narrator;
    let mut form = open_form(ctx, ctx.api.clone()).await?;

    let receivable = accounts::pick(form.accounts(), RECEIVABLE)?.clone();
    let revenue = accounts::pick(form.accounts(), REVENUE)?.clone();
    let tax_payable = accounts::pick(form.accounts(), TAX_PAYABLE)?.clone();

    n.step("Fill in the header").await;
    form.set_voucher_type(VoucherType::Sale);
    form.set_description("Scenario: balanced three-line sale");
    form.set_reference(ctx.reference(ScenarioName::BalancedVoucher));

    n.step("Add a third line").await;
    form.add_line();
    let ids = line_ids(&form);
    ensure!(ids.len() == 3, "expected 3 lines, the form shows {}", ids.len());

    enter_line(ctx, &mut form, ids[0], &receivable, "100000", "0").await?;
    enter_line(ctx, &mut form, ids[1], &revenue, "0", "60000").await?;
    enter_line(ctx, &mut form, ids[2], &tax_payable, "0", "40000").await?;

    let totals = form.totals();
    let expected = Amount::from_units(100_000);
    n.expect("totals", format!("debit {expected} / credit {expected} (balanced)"));
    n.observed("totals", format!("debit {} / credit {} ({})", totals.debit, totals.credit, totals.status.as_str()));
    ensure!(
        totals.debit == expected && totals.credit == expected,
        "totals read debit {} / credit {}",
        totals.debit,
        totals.credit
    );
    ensure!(totals.status == BalanceStatus::Balanced, "status reads {}", totals.status.as_str());

    n.step("Save the voucher").await;
    let outcome = form.submit().await.context("saving the balanced voucher")?;
    n.observed("voucher", format!("{} (id {})", outcome.voucher.number, outcome.voucher.id));
    n.observed(
        "redirect",
        format!("{} after {} ms", outcome.redirect.to, outcome.redirect.after.as_millis()),
    );
    Ok(())
}
