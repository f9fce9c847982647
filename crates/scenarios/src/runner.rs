//! Runs scenarios in order and collects their reports.

use std::fmt;
use std::time::Instant;

use chrono::NaiveDate;
use motor_client::AccountingApi;
use rust_decimal::Decimal;
use tracing::Instrument;
use uuid::Uuid;

use crate::narrator::Narrator;
use crate::scenarios::ScenarioName;

/// Everything a scenario needs; scenarios keep no state of their own.
pub struct ScenarioContext<A> {
    pub api: A,
    pub narrator: Narrator,
    /// Tax rate (percent) the rules engine is expected to apply to sales.
    pub tax_rate: Decimal,
    pub today: NaiveDate,
    /// Tags every voucher of one run so they are easy to find in the listing.
    pub run_id: Uuid,
}

impl<A> ScenarioContext<A> {
    pub fn new(api: A, narrator: Narrator, tax_rate: Decimal) -> Self {
        Self {
            api,
            narrator,
            tax_rate,
            today: chrono::Local::now().date_naive(),
            run_id: Uuid::now_v7(),
        }
    }

    /// Voucher reference for this run, e.g. `SCN-0190a1b2-post-voucher`.
    pub fn reference(&self, name: ScenarioName) -> String {
        let run = self.run_id.simple().to_string();
        format!("SCN-{}-{}", &run[..8], name.as_str())
    }
}

#[derive(Debug)]
pub struct ScenarioReport {
    pub name: ScenarioName,
    pub outcome: Result<(), String>,
    pub elapsed_ms: u64,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(()) => write!(f, "PASS  {:<22} ({} ms)", self.name.as_str(), self.elapsed_ms),
            Err(reason) => write!(f, "FAIL  {:<22} ({} ms) {reason}", self.name.as_str(), self.elapsed_ms),
        }
    }
}

/// Run `names` in order. A failing scenario does not stop the ones after it.
pub async fn run_all<A>(ctx: &ScenarioContext<A>, names: &[ScenarioName]) -> Vec<ScenarioReport>
where
    A: AccountingApi + Clone + Send + Sync,
{
    let mut reports = Vec::with_capacity(names.len());
    for &name in names {
        let span = tracing::info_span!("scenario", name = name.as_str(), run_id = %ctx.run_id);
        let started = Instant::now();
        let outcome = async {
            tracing::info!("{}", name.summary());
            name.run(ctx).await
        }
        .instrument(span.clone())
        .await
        .map_err(|e| format!("{e:#}"));
        let elapsed_ms = started.elapsed().as_millis() as u64;

        span.in_scope(|| match &outcome {
            Ok(()) => tracing::info!(elapsed_ms, "scenario passed"),
            Err(reason) => tracing::error!(elapsed_ms, %reason, "scenario failed"),
        });
        reports.push(ScenarioReport { name, outcome, elapsed_ms });
    }
    reports
}
