//! # Severity & Trust Scorer
//! Pure, testable logic that maps an `IncidentDraft` → points, severity tier,
//! and trust score. No I/O, no side effects; suitable for unit tests and
//! offline rule-set audits.
//!
//! Matching is case-insensitive substring containment against the
//! description, each keyword counted at most once. "danger" therefore also
//! fires inside "dangerous" — a known imprecision of the rule set, kept as-is.

use serde::Serialize;

use crate::incident::{IncidentDraft, Severity};
use crate::lexicon::Lexicon;

/// Output of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    pub points: i32,
    pub severity: Severity,
    #[serde(rename = "trustScore")]
    pub trust_score: i32,
    /// Which urgency/risk keywords fired, in rule-table order.
    pub keywords: Vec<String>,
}

/// Score a draft against the rule table.
///
/// Deterministic and order-independent: the same draft always yields the
/// same outcome, regardless of where keywords sit in the description.
pub fn score(draft: &IncidentDraft, lexicon: &Lexicon) -> ScoreOutcome {
    let text = draft.description.to_lowercase();

    let mut points = lexicon.base_score(draft.category());
    let mut keywords = Vec::new();

    for kw in &lexicon.keywords.urgency {
        if text.contains(kw.as_str()) {
            points += lexicon.keywords.urgency_weight;
            keywords.push(kw.clone());
        }
    }
    for kw in &lexicon.keywords.risk {
        if text.contains(kw.as_str()) {
            points += lexicon.keywords.risk_weight;
            keywords.push(kw.clone());
        }
    }

    let severity = lexicon.tier(points);
    let trust_score = lexicon.scoring.base_trust + lexicon.trust_modifier(&text);

    ScoreOutcome {
        points,
        severity,
        trust_score,
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::Severity;

    fn draft(kind: &str, description: &str) -> IncidentDraft {
        IncidentDraft {
            kind: kind.to_string(),
            title: "t".into(),
            location: "l".into(),
            timestamp: "2025-03-01 10:00 AM".into(),
            description: description.to_string(),
        }
    }

    #[test]
    fn base_score_only_for_empty_description() {
        let lex = Lexicon::default_seed();
        let out = score(&draft("fire", ""), &lex);
        assert_eq!(out.points, 20);
        assert_eq!(out.severity, Severity::Low);
        assert_eq!(out.trust_score, 50);
        assert!(out.keywords.is_empty());
    }

    #[test]
    fn forest_fire_example() {
        // base 20 + risk "evacuation" 15 = 35 → low, trust untouched
        let lex = Lexicon::default_seed();
        let out = score(
            &draft(
                "fire",
                "Large forest fire spreading rapidly, evacuation in progress",
            ),
            &lex,
        );
        assert_eq!(out.points, 35);
        assert_eq!(out.severity, Severity::Low);
        assert_eq!(out.trust_score, 50);
        assert_eq!(out.keywords, vec!["evacuation".to_string()]);
    }

    #[test]
    fn chemical_leak_example() {
        // base 20 + urgency(hazard, critical, emergency) 60 + risk(evacuation) 15 = 95
        let lex = Lexicon::default_seed();
        let out = score(
            &draft(
                "chemical",
                "Confirmed hazardous leak, critical emergency, evacuation ordered",
            ),
            &lex,
        );
        assert_eq!(out.points, 95);
        assert_eq!(out.severity, Severity::High);
        assert_eq!(out.trust_score, 75);
        assert!(out.keywords.contains(&"hazard".to_string()));
        assert!(out.keywords.contains(&"critical".to_string()));
        assert!(out.keywords.contains(&"emergency".to_string()));
        assert!(out.keywords.contains(&"evacuation".to_string()));
    }

    #[test]
    fn keyword_counts_once_regardless_of_repeats() {
        let lex = Lexicon::default_seed();
        let once = score(&draft("storm", "danger ahead"), &lex);
        let twice = score(&draft("storm", "danger danger danger ahead"), &lex);
        assert_eq!(once.points, twice.points);
        assert_eq!(once.keywords, twice.keywords);
    }

    #[test]
    fn matching_is_substring_not_word_boundary() {
        let lex = Lexicon::default_seed();
        let out = score(&draft("storm", "a disasterous turn of events"), &lex);
        // "disaster" matches inside "disasterous"
        assert_eq!(out.points, 10 + 15);
        assert_eq!(out.keywords, vec!["disaster".to_string()]);
    }

    #[test]
    fn unknown_category_uses_default_base() {
        let lex = Lexicon::default_seed();
        let out = score(&draft("earthquake", ""), &lex);
        assert_eq!(out.points, 10);
    }

    #[test]
    fn doubt_bucket_drives_trust_down() {
        let lex = Lexicon::default_seed();
        let out = score(&draft("flood", "possible levee breach, unconfirmed"), &lex);
        assert_eq!(out.trust_score, 35);
    }

    #[test]
    fn scoring_is_deterministic_across_runs() {
        let lex = Lexicon::default_seed();
        let d = draft("medical", "urgent rescue needed, severe injuries reported");
        let a = score(&d, &lex);
        let b = score(&d, &lex);
        assert_eq!(a, b);
    }
}
