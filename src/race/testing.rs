//! Scripted providers for race and handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::lookup::{AddressRecord, BrasilApiAddress, LookupKey};
use crate::providers::{Provider, ProviderError, ProviderId, ProviderResult};

enum Script {
    Answer(ProviderResult),
    Panic,
}

/// Sleeps for a fixed delay, then answers with a canned result.
pub struct FakeProvider {
    id: ProviderId,
    delay: Duration,
    script: Script,
    calls: AtomicUsize,
    /// Set once the delay has elapsed, i.e. the task was not aborted.
    pub completed: AtomicBool,
}

impl FakeProvider {
    fn build(name: &str, delay: Duration, script: Script) -> Arc<Self> {
        Arc::new(Self {
            id: ProviderId::new(name),
            delay,
            script,
            calls: AtomicUsize::new(0),
            completed: AtomicBool::new(false),
        })
    }

    pub fn ok(name: &str, delay: Duration, record: AddressRecord) -> Arc<Self> {
        Self::build(name, delay, Script::Answer(Ok(record)))
    }

    pub fn failing(name: &str, delay: Duration, error: ProviderError) -> Arc<Self> {
        Self::build(name, delay, Script::Answer(Err(error)))
    }

    pub fn panicking(name: &str, delay: Duration) -> Arc<Self> {
        Self::build(name, delay, Script::Panic)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn fetch(&self, _key: &LookupKey) -> ProviderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.completed.store(true, Ordering::SeqCst);
        match &self.script {
            Script::Answer(result) => result.clone(),
            Script::Panic => panic!("scripted provider failure"),
        }
    }
}

pub fn brasil_api_record(city: &str) -> AddressRecord {
    AddressRecord::BrasilApi(BrasilApiAddress {
        cep: "01001000".into(),
        state: "SP".into(),
        city: city.into(),
        neighborhood: "Sé".into(),
        street: "Praça da Sé".into(),
        service: "test".into(),
    })
}
