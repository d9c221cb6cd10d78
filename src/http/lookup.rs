use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::http::response::{pretty_json, LookupError};
use crate::http::server::AppState;
use crate::lookup::LookupKey;
use crate::observability::metrics;
use crate::race::RaceOutcome;

/// Shape of the `data` field in a successful response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Provider-native object, as the winning upstream returned it.
    #[default]
    Native,
    /// Common field names regardless of provider.
    Unified,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub format: ResponseFormat,
}

/// `GET /lookup/{key}`: race the providers and return the first answer.
///
/// The key is validated by the [`LookupKey`] extractor; a malformed key is
/// rejected with 400 before this function runs.
pub async fn lookup(
    State(state): State<AppState>,
    key: LookupKey,
    Query(params): Query<LookupParams>,
) -> Response {
    let coordinator = state.coordinator.load_full();

    match coordinator.race(&key).await {
        RaceOutcome::Won(envelope) => {
            metrics::record_lookup("won");
            let encoded = match params.format {
                ResponseFormat::Native => pretty_json(&envelope),
                ResponseFormat::Unified => pretty_json(&envelope.unified()),
            };
            encoded.unwrap_or_else(IntoResponse::into_response)
        }
        RaceOutcome::TimedOut => {
            metrics::record_lookup("timed_out");
            LookupError::TimedOut.into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
