//! Step-by-step narration for a human observer.

use std::fmt::Display;
use std::time::Duration;

/// Logs scenario steps and pauses between them so an observer watching the
/// site can follow along.
#[derive(Debug, Clone)]
pub struct Narrator {
    pace: Duration,
}

impl Narrator {
    pub fn new(pace: Duration) -> Self {
        Self { pace }
    }

    /// No pauses; used by tests.
    pub fn silent() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn pace(&self) -> Duration {
        self.pace
    }

    /// Announce a step, then pause.
    pub async fn step(&self, text: impl Display) {
        tracing::info!("▶ {text}");
        self.pause().await;
    }

    /// A figure the engine should produce, for manual comparison.
    pub fn expect(&self, what: &str, value: impl Display) {
        tracing::info!(expected = %value, "  expect {what}");
    }

    /// A figure observed on the live instance.
    pub fn observed(&self, what: &str, value: impl Display) {
        tracing::info!(observed = %value, "  observed {what}");
    }

    pub async fn pause(&self) {
        if !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
    }
}
