//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the CEP gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Race settings shared by every lookup.
    pub race: RaceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Outbound HTTP client settings shared by all providers.
    pub outbound: OutboundConfig,

    /// Upstream lookup providers, raced against each other.
    pub providers: Vec<ProviderConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GatewayConfig {
    /// Providers to race, falling back to the built-in BrasilAPI/ViaCEP pair
    /// when the file lists none.
    pub fn effective_providers(&self) -> Vec<ProviderConfig> {
        if self.providers.is_empty() {
            ProviderConfig::defaults()
        } else {
            self.providers.clone()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Race configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Time allowed for any provider to produce a usable answer, in milliseconds.
    pub deadline_ms: u64,
}

impl RaceConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self { deadline_ms: 1000 }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Hard ceiling for an inbound request, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 5 }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Connection establishment timeout, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 500,
            system_proxy: true,
        }
    }
}

/// Response shape spoken by an upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSchema {
    /// `https://brasilapi.com.br/api/cep/v1/{key}`
    BrasilApi,
    /// `http://viacep.com.br/ws/{key}/json/`
    ViaCep,
}

/// A single upstream provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Source tag reported in the response envelope.
    pub name: String,

    /// Endpoint with a `{key}` placeholder for the lookup key.
    pub url_template: String,

    /// Native response shape of the endpoint.
    pub schema: ProviderSchema,
}

impl ProviderConfig {
    /// The two public CEP services.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                name: "BrasilAPI".to_string(),
                url_template: "https://brasilapi.com.br/api/cep/v1/{key}".to_string(),
                schema: ProviderSchema::BrasilApi,
            },
            Self {
                name: "ViaCEP".to_string(),
                url_template: "http://viacep.com.br/ws/{key}/json/".to_string(),
                schema: ProviderSchema::ViaCep,
            },
        ]
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
