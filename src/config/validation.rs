//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (deadline > 0, addresses parse)
//! - Check provider definitions (unique names, usable URL templates)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Placeholder substituted with the lookup key in provider URL templates.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("race deadline must be greater than zero")]
    ZeroDeadline,

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("race deadline ({deadline_ms}ms) must be shorter than the request timeout ({request_secs}s)")]
    DeadlineExceedsRequestTimeout { deadline_ms: u64, request_secs: u64 },

    #[error("provider name must not be empty")]
    EmptyProviderName,

    #[error("duplicate provider name '{0}'")]
    DuplicateProvider(String),

    #[error("provider '{name}' url template is missing the {{key}} placeholder")]
    MissingPlaceholder { name: String },

    #[error("provider '{name}' url template is not a valid URL: {reason}")]
    InvalidUrl { name: String, reason: String },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.race.deadline_ms == 0 {
        errors.push(ValidationError::ZeroDeadline);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if config.race.deadline_ms >= config.timeouts.request_secs.saturating_mul(1000) {
        // The request timeout would answer 408 before the race can answer 504.
        errors.push(ValidationError::DeadlineExceedsRequestTimeout {
            deadline_ms: config.race.deadline_ms,
            request_secs: config.timeouts.request_secs,
        });
    }

    let mut seen = HashSet::new();
    for provider in &config.providers {
        if provider.name.trim().is_empty() {
            errors.push(ValidationError::EmptyProviderName);
        } else if !seen.insert(provider.name.as_str()) {
            errors.push(ValidationError::DuplicateProvider(provider.name.clone()));
        }

        if !provider.url_template.contains(KEY_PLACEHOLDER) {
            errors.push(ValidationError::MissingPlaceholder {
                name: provider.name.clone(),
            });
        }
        // Probe with a representative key so the template parses as a real URL.
        let probe = provider.url_template.replace(KEY_PLACEHOLDER, "00000000");
        if let Err(e) = url::Url::parse(&probe) {
            errors.push(ValidationError::InvalidUrl {
                name: provider.name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
