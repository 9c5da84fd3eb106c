use std::future::Future;
use std::time::Duration;

use prodline_core::config::Config;
use prodline_core::error::Result;
use prodline_core::time::reading_time_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::client::SensorClient;
use crate::generator::{GeneratorConfig, SensorState};

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub submit_url: String,
    pub wait_time: Duration,
    /// `None` keeps posting until shutdown.
    pub iterations: Option<u64>,
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
}

impl SimulatorConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            submit_url: cfg.submit_url(),
            wait_time: cfg.wait_time,
            iterations: None,
            seed: None,
            generator: GeneratorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: u64,
    pub delivered: u64,
    pub failed: u64,
    pub state: SensorState,
}

/// Generate, post, sleep; repeated until the iteration budget is spent or
/// `shutdown` resolves. A failed post drops that sample only, the counters
/// keep their increments. Shutdown also cancels a post still in flight.
pub async fn run_simulator<F>(cfg: SimulatorConfig, shutdown: F) -> Result<RunSummary>
where
    F: Future<Output = ()>,
{
    cfg.generator.validate()?;
    let client = SensorClient::new(cfg.submit_url.clone())?;
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = SensorState::new();
    let mut summary = RunSummary {
        iterations: 0,
        delivered: 0,
        failed: 0,
        state,
    };

    info!(url = %client.url(), wait = ?cfg.wait_time, "sensor simulator started");
    tokio::pin!(shutdown);

    while !budget_spent(&cfg, &summary) {
        state.advance(&mut rng, &cfg.generator);
        let reading = state.reading(reading_time_now());
        debug!(payload = ?reading, url = %client.url(), "sending reading");

        let outcome = tokio::select! {
            outcome = client.submit(&reading) => outcome,
            _ = &mut shutdown => {
                info!(time = %reading.time, "sensor simulator stopping, reading abandoned");
                break;
            }
        };
        match outcome {
            Ok(status) => {
                summary.delivered += 1;
                info!(time = %reading.time, status = status.as_u16(), "reading posted");
            }
            Err(err) => {
                summary.failed += 1;
                warn!(error = %err, time = %reading.time, "reading dropped");
            }
        }
        summary.iterations += 1;
        summary.state = state;

        if budget_spent(&cfg, &summary) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(cfg.wait_time) => {}
            _ = &mut shutdown => {
                info!("sensor simulator stopping");
                break;
            }
        }
    }

    Ok(summary)
}

fn budget_spent(cfg: &SimulatorConfig, summary: &RunSummary) -> bool {
    cfg.iterations.is_some_and(|max| summary.iterations >= max)
}
