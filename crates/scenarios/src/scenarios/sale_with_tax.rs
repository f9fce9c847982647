use anyhow::Context;
use motor_client::AccountingApi;
use motor_core::Amount;
use motor_vouchers::VoucherType;

use super::{ScenarioName, enter_line, line_ids, open_form};
use crate::accounts::{self, RECEIVABLE, REVENUE, TAX_PAYABLE};
use crate::runner::ScenarioContext;
use crate::tax::expected_tax;

pub async fn run<A>(ctx: &ScenarioContext<A>) -> anyhow::Result<()>
where
    A: AccountingApi + Clone,
{
    let n = &ctx.narrator;
    let mut form = open_form(ctx, ctx.api.clone()).await?;

    let receivable = accounts::pick(form.accounts(), RECEIVABLE)?.clone();
    let revenue = accounts::pick(form.accounts(), REVENUE)?.clone();
    let tax_payable = accounts::pick(form.accounts(), TAX_PAYABLE)?.clone();

    let base = Amount::from_units(100_000);
    let tax = expected_tax(base, ctx.tax_rate);

    n.step("Fill in a sale").await;
    form.set_voucher_type(VoucherType::Sale);
    form.set_description("Scenario: sale subject to tax");
    form.set_reference(ctx.reference(ScenarioName::SaleWithTax));
    if let Some(party) = form.third_parties().first().map(|p| p.id) {
        form.set_third_party(Some(party));
    }

    let ids = line_ids(&form);
    let base_text = base.value().to_string();
    enter_line(ctx, &mut form, ids[0], &receivable, &base_text, "0").await?;
    enter_line(ctx, &mut form, ids[1], &revenue, "0", &base_text).await?;

    n.step("Save the sale").await;
    let outcome = form.submit().await.context("saving the sale")?;
    n.observed("voucher", format!("{} (id {})", outcome.voucher.number, outcome.voucher.id));

    if tax.is_zero() {
        n.expect("tax line", format!("none (rate {}%)", ctx.tax_rate));
    } else {
        n.expect(
            "tax line",
            format!("credit {} {tax} ({}% of {base})", tax_payable.label(), ctx.tax_rate),
        );
        n.expect("receivable after tax", format!("debit {} {}", receivable.label(), base + tax));
    }

    n.step("Post the sale so the rules engine generates its journal entry").await;
    let posted = ctx
        .api
        .post_voucher(outcome.voucher.id)
        .await
        .context("posting the sale")?;
    if let Some(message) = &posted.message {
        n.observed("server message", message);
    }
    match &posted.data {
        Some(data) => n.observed(
            "journal entry",
            serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string()),
        ),
        None => tracing::warn!("post response carried no data to compare"),
    }
    n.step("Compare the generated tax line with the expectation above").await;
    Ok(())
}
