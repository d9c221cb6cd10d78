//! Response normalization.

use serde::Serialize;

use crate::lookup::{Address, AddressRecord};
use crate::providers::ProviderId;

/// The single result handed back for a lookup: who answered, and what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub source: ProviderId,
    pub data: AddressRecord,
}

/// Envelope variant whose payload has been projected onto [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedEnvelope {
    pub source: ProviderId,
    pub data: Address,
}

impl Envelope {
    pub fn unified(&self) -> UnifiedEnvelope {
        UnifiedEnvelope {
            source: self.source.clone(),
            data: self.data.unified(),
        }
    }
}

/// Tag a provider-native record with its source.
pub fn normalize(source: ProviderId, record: AddressRecord) -> Envelope {
    Envelope { source, data: record }
}
