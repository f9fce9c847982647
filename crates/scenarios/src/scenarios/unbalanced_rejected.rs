use anyhow::{bail, ensure};
use motor_client::AccountingApi;
use motor_vouchers::DraftError;
use motor_web::SubmitError;

use super::{ScenarioName, enter_line, line_ids, open_form};
use crate::accounts::{self, CASH, REVENUE};
use crate::counting::CountingApi;
use crate::runner::ScenarioContext;

pub async fn run<A>(ctx: &ScenarioContext<A>) -> anyhow::Result<()>
where
    A: AccountingApi + Clone + Send + Sync,
{
    let n = &ctx.narrator;
    let api = CountingApi::new(ctx.api.clone());
    let mut form = open_form(ctx, api.clone()).await?;

    let cash = accounts::pick(form.accounts(), CASH)?.clone();
    let revenue = accounts::pick(form.accounts(), REVENUE)?.clone();

    form.set_description("Scenario: unbalanced voucher");
    form.set_reference(ctx.reference(ScenarioName::UnbalancedRejected));
    let ids = line_ids(&form);

    enter_line(ctx, &mut form, ids[0], &cash, "50000", "0").await?;
    enter_line(ctx, &mut form, ids[1], &revenue, "0", "49990").await?;
    n.expect("status", "unbalanced, difference 10.00");

    n.step("Try to save the unbalanced voucher").await;
    match form.submit().await {
        Err(SubmitError::Validation(DraftError::Unbalanced { difference })) => {
            n.observed("refused, difference", difference);
        }
        other => bail!("expected an unbalanced refusal, got {other:?}"),
    }

    n.step("Clear both amounts and try again").await;
    form.set_debit(ids[0], "0")?;
    form.set_credit(ids[1], "")?;
    n.expect("status", "balanced at zero, still refused");
    match form.submit().await {
        Err(SubmitError::Validation(DraftError::ZeroTotal)) => n.observed("refused", "zero total"),
        other => bail!("expected a zero-total refusal, got {other:?}"),
    }

    for notice in form.take_notices() {
        n.observed("notice", notice.message);
    }
    ensure!(api.writes() == 0, "{} request(s) reached the API", api.writes());
    n.observed("requests sent", 0);
    Ok(())
}
