use anyhow::Context;
use motor_client::AccountingApi;
use motor_vouchers::VoucherType;

use super::{ScenarioName, enter_line, line_ids, open_form};
use crate::accounts::{self, CASH, EXPENSE};
use crate::runner::ScenarioContext;

pub async fn run<A>(ctx: &ScenarioContext<A>) -> anyhow::Result<()>
where
    A: AccountingApi + Clone,
{
    let n = &ctx.narrator;
    let mut form = open_form(ctx, ctx.api.clone()).await?;

    let expense = accounts::pick(form.accounts(), EXPENSE)?.clone();
    let cash = accounts::pick(form.accounts(), CASH)?.clone();

    form.set_voucher_type(VoucherType::Journal);
    form.set_description("Scenario: petty cash expense");
    form.set_reference(ctx.reference(ScenarioName::PostVoucher));
    let ids = line_ids(&form);
    enter_line(ctx, &mut form, ids[0], &expense, "25000", "0").await?;
    enter_line(ctx, &mut form, ids[1], &cash, "0", "25000").await?;

    n.step("Save the voucher").await;
    let created = form.submit().await.context("saving the journal voucher")?.voucher;
    n.observed("voucher", format!("{} (id {})", created.number, created.id));

    n.step("Post it").await;
    let posted = ctx.api.post_voucher(created.id).await.context("posting the voucher")?;
    n.expect("journal entry", format!("debit {} 25000.00 / credit {} 25000.00", expense.code, cash.code));
    n.observed(
        "server",
        posted.message.as_deref().unwrap_or("posted (no message)"),
    );
    Ok(())
}
