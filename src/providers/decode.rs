//! Per-schema body decoding.

use crate::config::ProviderSchema;
use crate::lookup::{AddressRecord, BrasilApiAddress, ViaCepAddress};
use crate::providers::error::ProviderError;

/// Decode a successful response body into the schema's native record.
pub fn decode(schema: ProviderSchema, body: &[u8]) -> Result<AddressRecord, ProviderError> {
    match schema {
        ProviderSchema::BrasilApi => {
            let address: BrasilApiAddress = serde_json::from_slice(body)?;
            Ok(AddressRecord::BrasilApi(address))
        }
        ProviderSchema::ViaCep => {
            let address: ViaCepAddress = serde_json::from_slice(body)?;
            if address.is_not_found() {
                return Err(ProviderError::NotFound);
            }
            Ok(AddressRecord::ViaCep(address))
        }
    }
}
