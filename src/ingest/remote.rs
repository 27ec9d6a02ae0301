// src/ingest/remote.rs
//
// HTTP-backed ingest source: GETs the locator and expects the remote
// analyzer's JSON — either a scored incident or an `{ "error": ... }`
// payload. Content analysis happens on the analyzer's side; this client
// only transports and shape-checks.

use serde_json::Value;

use crate::error::EngineError;
use crate::incident::PreScoredIncident;
use crate::ingest::IngestSource;

pub struct RemoteAnalyzer {
    client: reqwest::Client,
}

impl RemoteAnalyzer {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for RemoteAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IngestSource for RemoteAnalyzer {
    async fn fetch(&self, locator: &str) -> Result<PreScoredIncident, EngineError> {
        let resp = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| EngineError::Ingestion(format!("request failed: {e}")))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| EngineError::Ingestion(format!("non-JSON analyzer response: {e}")))?;

        // Explicit error payloads take precedence over the HTTP status.
        if let Some(msg) = body.get("error").and_then(Value::as_str) {
            return Err(EngineError::Ingestion(msg.to_string()));
        }
        if !status.is_success() {
            return Err(EngineError::Ingestion(format!(
                "analyzer returned status {status}"
            )));
        }

        serde_json::from_value(body)
            .map_err(|e| EngineError::Ingestion(format!("unrecognized analyzer payload: {e}")))
    }

    fn name(&self) -> &'static str {
        "remote-analyzer"
    }
}
