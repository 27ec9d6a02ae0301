//! registry.rs — the owned, append-only incident collection plus the
//! normalization step that turns drafts and pre-scored payloads into records.
//!
//! The registry is the only component that mutates the collection. An append
//! is all-or-nothing: id assignment and the push happen under one lock, so a
//! reader never observes a partially normalized record. Records are never
//! updated or deleted within a session.

use std::sync::Mutex;

use crate::error::EngineError;
use crate::incident::{Category, IncidentDraft, IncidentRecord, PreScoredIncident};
use crate::lexicon::Lexicon;
use crate::ranker;
use crate::scorer;
use crate::validator;

#[derive(Debug)]
pub struct IncidentRegistry {
    lexicon: Lexicon,
    records: Mutex<Vec<IncidentRecord>>,
}

impl IncidentRegistry {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Start from an already-known set of records (the session listing).
    /// Seed records are trusted as-is, like any externally scored input.
    pub fn with_seed(lexicon: Lexicon, seed: Vec<IncidentRecord>) -> Self {
        Self {
            lexicon,
            records: Mutex::new(seed),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Normalize and append a locally authored draft: validate, score,
    /// assign identity. The draft is rejected — and nothing is appended —
    /// if a required field is empty.
    pub fn submit_manual(&self, draft: &IncidentDraft) -> Result<IncidentRecord, EngineError> {
        validator::validate(draft)?;
        let outcome = scorer::score(draft, &self.lexicon);

        let mut records = self.records.lock().expect("registry mutex poisoned");
        let record = IncidentRecord {
            id: next_id(&records),
            category: draft.category(),
            title: draft.title.clone(),
            location: draft.location.clone(),
            timestamp: draft.timestamp.clone(),
            description: draft.description.clone(),
            points: outcome.points,
            severity: outcome.severity,
            trust_score: outcome.trust_score,
            keywords: outcome.keywords,
        };
        records.push(record.clone());
        Ok(record)
    }

    /// Normalize and append an externally ingested incident. Scoring fields
    /// are passed through exactly as supplied — the engine never re-scores
    /// external values, even when they disagree with the local rule table.
    /// A payload missing any scoring field is rejected outright.
    pub fn ingest_prescored(
        &self,
        incoming: PreScoredIncident,
    ) -> Result<IncidentRecord, EngineError> {
        let points = incoming
            .points
            .ok_or(EngineError::MalformedResponse { missing: "points" })?;
        let severity = incoming.severity.ok_or(EngineError::MalformedResponse {
            missing: "severity",
        })?;
        let trust_score = incoming.trust_score.ok_or(EngineError::MalformedResponse {
            missing: "trustScore",
        })?;

        let mut records = self.records.lock().expect("registry mutex poisoned");
        let record = IncidentRecord {
            id: next_id(&records),
            category: Category::parse(&incoming.kind),
            title: incoming.title,
            location: incoming.location,
            timestamp: incoming.timestamp.unwrap_or_else(now_stamp),
            description: incoming.description,
            points,
            severity,
            trust_score,
            keywords: incoming.keywords,
        };
        records.push(record.clone());
        Ok(record)
    }

    /// Current collection in display order (descending points, stable ties).
    pub fn ranked(&self) -> Vec<IncidentRecord> {
        let records = self.records.lock().expect("registry mutex poisoned");
        ranker::rank(&records)
    }

    /// Current collection in insertion order.
    pub fn snapshot(&self) -> Vec<IncidentRecord> {
        self.records.lock().expect("registry mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("registry mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One greater than the current maximum id; 1 for an empty collection.
fn next_id(records: &[IncidentRecord]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

/// Server-side stamp for ingested records that arrive without a timestamp,
/// in the dashboard's display format (`YYYY-MM-DD HH:MM AM/PM`).
fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %I:%M %p").to_string()
}
