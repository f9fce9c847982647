//! Command-line interface.

use std::time::Duration;

use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};
use motor_client::ClientConfig;
use motor_client::config::DEFAULT_API_URL;
use motor_observability::LogFormat;
use rust_decimal::Decimal;

use crate::narrator::Narrator;
use crate::scenarios::ScenarioName;

#[derive(Debug, Parser)]
#[command(
    name = "motor-scenarios",
    about = "Narrated walkthroughs against a running Motor Contable instance"
)]
pub struct Cli {
    /// Base URL of the accounting API.
    #[arg(long, env = "MOTOR_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Bearer token sent with every request.
    #[arg(long, env = "MOTOR_AUTH_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone());
        match self.token.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available scenarios.
    List,
    /// Run one or more scenarios in order.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scenarios to run, in order.
    #[arg(value_enum)]
    pub scenarios: Vec<ScenarioName>,

    /// Run every scenario.
    #[arg(long)]
    pub all: bool,

    /// Pause between narrated steps, in milliseconds (0 disables).
    #[arg(long, default_value_t = 800)]
    pub pace_ms: u64,

    /// Tax rate in percent the rules engine is expected to apply to sales.
    #[arg(long, default_value = "19")]
    pub tax_rate: Decimal,
}

impl RunArgs {
    pub fn selected(&self) -> anyhow::Result<Vec<ScenarioName>> {
        if self.all {
            return Ok(ScenarioName::ALL.to_vec());
        }
        if self.scenarios.is_empty() {
            bail!("name at least one scenario or pass --all (see `motor-scenarios list`)");
        }
        Ok(self.scenarios.clone())
    }

    pub fn narrator(&self) -> Narrator {
        Narrator::new(Duration::from_millis(self.pace_ms))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}
