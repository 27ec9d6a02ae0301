//! Manual-draft validation. Externally ingested incidents never pass through
//! here; they arrive pre-validated from the analyzer.

use crate::error::EngineError;
use crate::incident::IncidentDraft;

/// Check required fields in reporting order, failing fast on the first empty
/// one and naming it. Category is deliberately not required: an absent or
/// unknown category folds to `general` at normalization instead.
pub fn validate(draft: &IncidentDraft) -> Result<(), EngineError> {
    if draft.title.trim().is_empty() {
        return Err(EngineError::validation("title"));
    }
    if draft.location.trim().is_empty() {
        return Err(EngineError::validation("location"));
    }
    if draft.timestamp.trim().is_empty() {
        return Err(EngineError::validation("timestamp"));
    }
    if draft.description.trim().is_empty() {
        return Err(EngineError::validation("description"));
    }
    Ok(())
}
