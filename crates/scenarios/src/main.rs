//! Scenario runner entry point.

use anyhow::Context;
use clap::Parser;
use motor_client::HttpAccountingClient;
use motor_scenarios::cli::{Cli, Command};
use motor_scenarios::{ScenarioContext, ScenarioName, run_all};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    motor_observability::init_with(cli.log_format.into());

    match &cli.command {
        Command::List => {
            for name in ScenarioName::ALL {
                println!("{:<22} {}", name.as_str(), name.summary());
            }
            Ok(())
        }
        Command::Run(args) => {
            let names = args.selected().context("nothing to run")?;
            let client = HttpAccountingClient::from_config(&cli.client_config());
            tracing::info!(api_url = %client.api_url(), scenarios = names.len(), "starting scenario run");

            let ctx = ScenarioContext::new(client, args.narrator(), args.tax_rate);
            let reports = run_all(&ctx, &names).await;

            println!();
            for report in &reports {
                println!("{report}");
            }
            let failed = reports.iter().filter(|r| !r.passed()).count();
            if failed > 0 {
                anyhow::bail!("{failed} of {} scenario(s) failed", reports.len());
            }
            Ok(())
        }
    }
}
