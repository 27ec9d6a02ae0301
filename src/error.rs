//! Error taxonomy for the engine. Every variant is recoverable: the incident
//! collection is left untouched by any failure and the caller may retry
//! immediately.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A manually authored draft is missing a required field. The draft is
    /// not added to the collection.
    #[error("missing required field: {field}")]
    Validation { field: &'static str },

    /// The external ingestion call failed outright or returned an error
    /// payload. No record is added.
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    /// The external call succeeded but the record lacks scoring fields.
    /// Treated like an ingestion failure; missing scores are never guessed.
    #[error("analyzer response incomplete: missing {missing}")]
    MalformedResponse { missing: &'static str },
}

impl EngineError {
    pub fn validation(field: &'static str) -> Self {
        EngineError::Validation { field }
    }
}
