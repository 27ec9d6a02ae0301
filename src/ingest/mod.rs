// src/ingest/mod.rs
//
// Ingestion boundary: acquiring a pre-scored incident from an external
// analyzer by locator. The call is atomic from the core's point of view —
// success yields exactly one well-formed incident, failure yields nothing.
// Retry, de-duplication, and cancellation belong to the calling layer.

pub mod remote;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::error::EngineError;
use crate::incident::{IncidentRecord, PreScoredIncident};
use crate::registry::IncidentRegistry;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_accepted_total",
            "Pre-scored incidents accepted into the collection."
        );
        describe_counter!(
            "ingest_failed_total",
            "Ingestion calls that failed or returned an error payload."
        );
        describe_counter!(
            "ingest_malformed_total",
            "Analyzer responses rejected for missing scoring fields."
        );
    });
}

/// A source of pre-scored incidents, addressed by locator.
#[async_trait::async_trait]
pub trait IngestSource: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<PreScoredIncident, EngineError>;
    fn name(&self) -> &'static str;
}

/// Run one ingestion: fetch from the source, then normalize-and-append.
/// Exactly one record is added on success; on any failure the collection is
/// left as it was.
pub async fn ingest_once(
    source: &dyn IngestSource,
    registry: &IncidentRegistry,
    locator: &str,
) -> Result<IncidentRecord, EngineError> {
    ensure_metrics_described();

    let incoming = match source.fetch(locator).await {
        Ok(incoming) => incoming,
        Err(e) => {
            tracing::warn!(error = %e, source = source.name(), locator, "ingest fetch failed");
            counter!("ingest_failed_total").increment(1);
            return Err(e);
        }
    };

    match registry.ingest_prescored(incoming) {
        Ok(record) => {
            counter!("ingest_accepted_total").increment(1);
            tracing::info!(id = record.id, points = record.points, "ingested incident");
            Ok(record)
        }
        Err(e) => {
            tracing::warn!(error = %e, source = source.name(), locator, "ingest payload rejected");
            counter!("ingest_malformed_total").increment(1);
            Err(e)
        }
    }
}

/// Deterministic in-process source: serves a canned response per call.
/// Backs integration tests and local runs without a live analyzer.
pub struct StaticIngestSource {
    responses: std::sync::Mutex<Vec<Result<PreScoredIncident, EngineError>>>,
}

impl StaticIngestSource {
    /// Queue of responses, served front to back; an exhausted queue answers
    /// with an ingestion error.
    pub fn new(mut responses: Vec<Result<PreScoredIncident, EngineError>>) -> Self {
        responses.reverse();
        Self {
            responses: std::sync::Mutex::new(responses),
        }
    }

    pub fn single(response: PreScoredIncident) -> Self {
        Self::new(vec![Ok(response)])
    }
}

#[async_trait::async_trait]
impl IngestSource for StaticIngestSource {
    async fn fetch(&self, _locator: &str) -> Result<PreScoredIncident, EngineError> {
        self.responses
            .lock()
            .expect("static source mutex poisoned")
            .pop()
            .unwrap_or_else(|| Err(EngineError::Ingestion("static source exhausted".into())))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::Severity;
    use crate::lexicon::Lexicon;

    fn prescored() -> PreScoredIncident {
        PreScoredIncident {
            kind: "chemical".into(),
            title: "Plant leak".into(),
            location: "Industrial park".into(),
            timestamp: Some("2025-03-01 11:00 AM".into()),
            description: "contained".into(),
            points: Some(95),
            severity: Some(Severity::High),
            trust_score: Some(75),
            keywords: vec!["hazard".into()],
        }
    }

    #[tokio::test]
    async fn successful_ingest_appends_one_record() {
        let registry = IncidentRegistry::new(Lexicon::default_seed());
        let source = StaticIngestSource::single(prescored());
        let rec = ingest_once(&source, &registry, "https://example.com/incident")
            .await
            .unwrap();
        assert_eq!(rec.id, 1);
        assert_eq!(rec.points, 95);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_collection_unchanged() {
        let registry = IncidentRegistry::new(Lexicon::default_seed());
        let source =
            StaticIngestSource::new(vec![Err(EngineError::Ingestion("boom".into()))]);
        let res = ingest_once(&source, &registry, "https://example.com/incident").await;
        assert!(matches!(res, Err(EngineError::Ingestion(_))));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn incomplete_payload_is_malformed_and_not_appended() {
        let registry = IncidentRegistry::new(Lexicon::default_seed());
        let mut p = prescored();
        p.points = None;
        let source = StaticIngestSource::single(p);
        let res = ingest_once(&source, &registry, "https://example.com/incident").await;
        assert!(matches!(res, Err(EngineError::MalformedResponse { .. })));
        assert!(registry.is_empty());
    }
}
