//! Provider-native address records and the unified projection.

use serde::{Deserialize, Deserializer, Serialize};

/// Upstreams send `null` for fields they have no value for (city-wide CEPs
/// carry no street); treat it like a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// BrasilAPI `/api/cep/v1/{cep}` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrasilApiAddress {
    #[serde(deserialize_with = "null_as_empty")]
    pub cep: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub street: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub service: String,
}

/// ViaCEP `/ws/{cep}/json/` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepAddress {
    #[serde(deserialize_with = "null_as_empty")]
    pub cep: String,
    #[serde(rename = "logradouro", deserialize_with = "null_as_empty")]
    pub street: String,
    #[serde(rename = "complemento", deserialize_with = "null_as_empty")]
    pub complement: String,
    #[serde(rename = "bairro", deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(rename = "localidade", deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(rename = "uf", deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub ibge: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub gia: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub ddd: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub siafi: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub unidade: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub estado: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub regiao: String,
    /// ViaCEP answers unknown CEPs with `200 {"erro": true}` (older
    /// deployments send the string `"true"`).
    #[serde(skip_serializing)]
    pub erro: Option<serde_json::Value>,
}

impl ViaCepAddress {
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Closed set of upstream shapes. Serialized without a tag: the envelope's
/// `source` field identifies the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AddressRecord {
    BrasilApi(BrasilApiAddress),
    ViaCep(ViaCepAddress),
}

/// Provider-independent view of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
}

impl AddressRecord {
    /// Project the native record onto the common field names.
    pub fn unified(&self) -> Address {
        match self {
            AddressRecord::BrasilApi(a) => Address {
                cep: a.cep.clone(),
                state: a.state.clone(),
                city: a.city.clone(),
                neighborhood: a.neighborhood.clone(),
                street: a.street.clone(),
            },
            AddressRecord::ViaCep(a) => Address {
                // ViaCEP formats as "01001-000"
                cep: a.cep.replace('-', ""),
                state: a.state.clone(),
                city: a.city.clone(),
                neighborhood: a.neighborhood.clone(),
                street: a.street.clone(),
            },
        }
    }
}
