//! Upstream lookup providers.
//!
//! # Data Flow
//! ```text
//! LookupKey
//!     → http.rs (one GET against the provider's url template)
//!     → decode.rs (body → provider-native AddressRecord)
//!     → ProviderResult: Ok(record) or Err(absence marker)
//! ```
//!
//! # Design Decisions
//! - Exactly one attempt per lookup; no retries
//! - Failures never propagate as errors to the caller, only as absence
//! - The reqwest client is built once from config and passed in explicitly

pub mod decode;
pub mod error;
pub mod http;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{OutboundConfig, ProviderConfig};
use crate::lookup::{AddressRecord, LookupKey};

pub use error::ProviderError;
pub use http::HttpProvider;

/// Outcome of one provider invocation. `Err` is the absence marker.
pub type ProviderResult = Result<AddressRecord, ProviderError>;

/// Source tag identifying which provider produced an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One upstream service queried for a lookup.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Source tag reported when this provider wins.
    fn id(&self) -> &ProviderId;

    /// Perform exactly one lookup. The key is already validated.
    async fn fetch(&self, key: &LookupKey) -> ProviderResult;
}

/// Build the outbound HTTP client shared by all providers of one coordinator.
pub fn build_http_client(outbound: &OutboundConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(outbound.connect_timeout_ms))
        .user_agent(concat!("cep-gateway/", env!("CARGO_PKG_VERSION")));
    if !outbound.system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// Instantiate one HTTP provider per configured entry.
pub fn build_providers(configs: &[ProviderConfig], client: &reqwest::Client) -> Vec<Arc<dyn Provider>> {
    configs
        .iter()
        .map(|config| Arc::new(HttpProvider::new(config, client.clone())) as Arc<dyn Provider>)
        .collect()
}
