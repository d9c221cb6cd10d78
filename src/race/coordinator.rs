//! First-qualifying-response race across providers.
//!
//! # Algorithm
//! ```text
//! spawn fetch+normalize per provider into a request-private JoinSet
//! start deadline timer
//! loop:
//!     task finished with envelope  → Won
//!     task finished with absence   → keep waiting
//!     no tasks left                → TimedOut (no need to wait out the timer)
//!     deadline elapsed             → TimedOut
//! abort whatever is still in flight
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{self, JoinSet};

use crate::config::GatewayConfig;
use crate::lookup::LookupKey;
use crate::observability::metrics;
use crate::providers::{
    build_http_client, build_providers, Provider, ProviderError, ProviderId, ProviderResult,
};
use crate::race::normalize::{normalize, Envelope};

/// Terminal value of one race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    Won(Envelope),
    TimedOut,
}

impl RaceOutcome {
    fn label(&self) -> &'static str {
        match self {
            RaceOutcome::Won(_) => "won",
            RaceOutcome::TimedOut => "timed_out",
        }
    }
}

/// Races a fixed provider set under a fixed deadline.
///
/// Holds no per-request state: every call to [`RaceCoordinator::race`] owns
/// its own task set and timer, so one coordinator serves concurrent requests.
#[derive(Clone)]
pub struct RaceCoordinator {
    providers: Vec<Arc<dyn Provider>>,
    deadline: Duration,
}

impl std::fmt::Debug for RaceCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaceCoordinator")
            .field("providers", &self.providers.iter().map(|p| p.id()).collect::<Vec<_>>())
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl RaceCoordinator {
    pub fn new(providers: Vec<Arc<dyn Provider>>, deadline: Duration) -> Self {
        Self { providers, deadline }
    }

    /// Build HTTP providers and the deadline from configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.outbound)?;
        let providers = build_providers(&config.effective_providers(), &client);
        Ok(Self::new(providers, config.race.deadline()))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    /// Query every provider concurrently and keep the first usable answer.
    pub async fn race(&self, key: &LookupKey) -> RaceOutcome {
        let start = Instant::now();
        let mut tasks = JoinSet::new();
        // Lets a panicked task be attributed to its provider.
        let mut owners: HashMap<task::Id, ProviderId> = HashMap::with_capacity(self.providers.len());

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let owner = provider.id().clone();
            let key = key.clone();
            let handle = tasks.spawn(async move {
                let source = provider.id().clone();
                provider
                    .fetch(&key)
                    .await
                    .map(|record| normalize(source, record))
            });
            owners.insert(handle.id(), owner);
        }

        let deadline = tokio::time::sleep(self.deadline);
        tokio::pin!(deadline);

        let outcome = loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    Some(Ok(Ok(envelope))) => break RaceOutcome::Won(envelope),
                    // Absence was already logged by the provider.
                    Some(Ok(Err(_))) => continue,
                    Some(Err(e)) => {
                        let provider = owners
                            .get(&e.id())
                            .map_or("unknown", ProviderId::as_str);
                        let failed: ProviderResult = Err(ProviderError::TaskFailed(e.to_string()));
                        tracing::warn!(key = %key, provider, error = %e, "Provider task did not complete");
                        metrics::record_provider_result(provider, &failed);
                        continue;
                    }
                    None => {
                        tracing::debug!(key = %key, "Every provider reported absence before the deadline");
                        break RaceOutcome::TimedOut;
                    }
                },
                () = &mut deadline => break RaceOutcome::TimedOut,
            }
        };

        // Losers still in flight are aborted here; their results never surface.
        tasks.abort_all();

        let elapsed = start.elapsed();
        match &outcome {
            RaceOutcome::Won(envelope) => tracing::info!(
                key = %key,
                source = %envelope.source,
                elapsed_ms = elapsed.as_millis() as u64,
                "Race won"
            ),
            RaceOutcome::TimedOut => tracing::warn!(
                key = %key,
                deadline_ms = self.deadline.as_millis() as u64,
                elapsed_ms = elapsed.as_millis() as u64,
                "Race ended without a usable response"
            ),
        }
        metrics::record_race_duration(outcome.label(), elapsed);

        outcome
    }
}
