//! Validated lookup keys.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static CEP_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{8}$").unwrap_or_else(|e| unreachable!("CEP pattern is a literal: {e}"))
});

/// Reasons a raw key is refused before any provider is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid CEP '{0}': expected exactly 8 digits")]
    InvalidFormat(String),

    #[error("missing CEP path parameter")]
    Missing,
}

/// A postal code (CEP) that has passed format validation.
///
/// The only way to obtain one is [`LookupKey::parse`] (or the axum extractor,
/// which delegates to it), so holding a `LookupKey` proves the format check ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Validate a raw key.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        if CEP_FORMAT.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(KeyError::InvalidFormat(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for LookupKey
where
    S: Send + Sync,
{
    type Rejection = KeyError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| KeyError::Missing)?;
        LookupKey::parse(&raw)
    }
}
