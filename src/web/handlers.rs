//! HTTP request handlers.

use super::AppState;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

/// Query parameters of the probe route. Missing values validate as empty strings.
#[derive(Debug, Default)]
pub struct ProbeQuery {
    pub url: Option<String>,
    pub method: Option<String>,
    pub timeout: Option<String>,
}

impl ProbeQuery {
    /// Build from decoded query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "url" => &mut query.url,
                "method" => &mut query.method,
                "timeout" => &mut query.timeout,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Probe the requested target and answer with the JSON summary.
///
/// Always 200: probe failures are reported in the body.
pub async fn handle_probe(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let query = ProbeQuery::from_pairs(pairs);
    let url = state.config.target_for(query.url.as_deref());
    let method = query.method.unwrap_or_default();
    let timeout = query.timeout.unwrap_or_default();

    let result = state.prober.probe(&url, &method, &timeout).await;
    Json(result)
}
