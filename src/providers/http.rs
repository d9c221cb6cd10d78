//! HTTP+JSON upstream provider.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

use crate::config::validation::KEY_PLACEHOLDER;
use crate::config::{ProviderConfig, ProviderSchema};
use crate::lookup::{AddressRecord, LookupKey};
use crate::observability::metrics;
use crate::providers::decode::decode;
use crate::providers::error::ProviderError;
use crate::providers::{Provider, ProviderId, ProviderResult};

/// Issues exactly one GET per lookup against a templated endpoint.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    id: ProviderId,
    url_template: String,
    schema: ProviderSchema,
    client: Client,
}

impl HttpProvider {
    pub fn new(config: &ProviderConfig, client: Client) -> Self {
        Self {
            id: ProviderId::new(&config.name),
            url_template: config.url_template.clone(),
            schema: config.schema,
            client,
        }
    }

    pub fn url_for(&self, key: &LookupKey) -> String {
        self.url_template.replace(KEY_PLACEHOLDER, key.as_str())
    }

    async fn request(&self, url: &str) -> Result<AddressRecord, ProviderError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode(self.schema, &body)
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn fetch(&self, key: &LookupKey) -> ProviderResult {
        let url = self.url_for(key);
        let start = Instant::now();
        let result = self.request(&url).await;

        match &result {
            Ok(_) => {
                tracing::debug!(
                    provider = %self.id,
                    key = %key,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Provider answered"
                );
            }
            Err(e) => {
                tracing::warn!(
                    provider = %self.id,
                    key = %key,
                    url = %url,
                    error = %e,
                    "Provider produced no usable result"
                );
            }
        }
        metrics::record_provider_result(self.id.as_str(), &result);
        result
    }
}
