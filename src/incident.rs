//! Incident data model: categories, severity tiers, authoring drafts, and the
//! stored record shape the dashboard consumes.
//!
//! Wire names follow the dashboard contract (`type`, `trustScore`, `keywords`),
//! so records serialize 1:1 into what the UI already renders.

use serde::{Deserialize, Serialize};

/// Known incident categories. Anything else folds to `General` at
/// normalization time; a category is never grounds for rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fire,
    Medical,
    Flood,
    Chemical,
    Storm,
    #[serde(other)]
    General,
}

impl Category {
    /// Parse a raw category label: trim, lowercase, fold unknown to `General`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fire" => Category::Fire,
            "medical" => Category::Medical,
            "flood" => Category::Flood,
            "chemical" => Category::Chemical,
            "storm" => Category::Storm,
            _ => Category::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fire => "fire",
            Category::Medical => "medical",
            Category::Flood => "flood",
            Category::Chemical => "chemical",
            Category::Storm => "storm",
            Category::General => "general",
        }
    }
}

/// Discrete severity tier, a pure function of `points` (see `Lexicon::tier`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Authoring-time input: what a user types into the report form, before
/// identity assignment and scoring.
///
/// `timestamp` is free-form text (expected shape `YYYY-MM-DD HH:MM AM/PM`);
/// it is displayed, not parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentDraft {
    /// Raw category label; normalized via [`Category::parse`].
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub description: String,
}

impl IncidentDraft {
    pub fn category(&self) -> Category {
        Category::parse(&self.kind)
    }
}

/// The persisted, scored entity. Append-only: once a record exists it is
/// never mutated or deleted for the lifetime of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub category: Category,
    pub title: String,
    pub location: String,
    pub timestamp: String,
    pub description: String,
    pub points: i32,
    pub severity: Severity,
    /// Nominally 0–100 but deliberately not clamped: the original rule set
    /// never bounded it, and "fixing" that is a product decision.
    #[serde(rename = "trustScore")]
    pub trust_score: i32,
    /// Urgency/risk keywords that fired during scoring, for audit display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// An externally ingested incident as returned by the remote analyzer.
/// Scoring fields are optional on the wire; all three must be present for
/// the payload to be accepted (a partial response is an error, never
/// re-scored locally).
#[derive(Debug, Clone, Deserialize)]
pub struct PreScoredIncident {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub description: String,
    pub points: Option<i32>,
    pub severity: Option<Severity>,
    #[serde(rename = "trustScore")]
    pub trust_score: Option<i32>,
    #[serde(default)]
    pub keywords: Vec<String>,
}
