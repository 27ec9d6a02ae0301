//! Lexicon: the scoring rule table as explicit config-as-data.
//!
//! Category base scores, keyword weights, trust-modifier buckets, and the
//! severity thresholds all live in one TOML document instead of being
//! scattered across call sites, so the rule set can be audited and tested in
//! isolation. The shipped `config/lexicon.toml` is also compiled in as the
//! default seed, so the service boots without any config file present.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::incident::{Category, Severity};

// --- env defaults & names ---
pub const DEFAULT_LEXICON_CONFIG_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_CONFIG_PATH: &str = "LEXICON_CONFIG_PATH";

static DEFAULT_TOML: &str = include_str!("../config/lexicon.toml");

static DEFAULT_SEED: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::from_toml_str(DEFAULT_TOML).expect("valid embedded lexicon"));

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub scoring: ScoringSection,
    /// Base score per category name; categories absent here fall back to
    /// `scoring.default_base`.
    pub base_scores: HashMap<String, i32>,
    pub keywords: KeywordSection,
    pub trust: TrustSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSection {
    pub default_base: i32,
    pub base_trust: i32,
    pub high_over: i32,
    pub medium_over: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSection {
    pub urgency_weight: i32,
    pub risk_weight: i32,
    pub urgency: Vec<String>,
    pub risk: Vec<String>,
}

/// Trust buckets in priority order. Evaluation picks the first bucket with a
/// match; buckets never stack.
#[derive(Debug, Clone, Deserialize)]
pub struct TrustSection {
    pub confirmation_bonus: i32,
    pub sourced_bonus: i32,
    pub doubt_penalty: i32,
    pub confirmation: Vec<String>,
    pub sourced: Vec<String>,
    pub doubt: Vec<String>,
}

impl Lexicon {
    /// Load from a TOML file. Uses LEXICON_CONFIG_PATH or defaults to
    /// "config/lexicon.toml".
    pub fn from_toml() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_LEXICON_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_CONFIG_PATH));

        let content = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read lexicon config at {}: {}", path.display(), e)
        })?;

        Self::from_toml_str(&content)
    }

    /// Load from a TOML string, normalizing keyword casing and rejecting
    /// inconsistent rule tables.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut lex: Lexicon = toml::from_str(toml_str)?;

        if lex.scoring.high_over <= lex.scoring.medium_over {
            anyhow::bail!(
                "lexicon thresholds inverted: high_over {} must exceed medium_over {}",
                lex.scoring.high_over,
                lex.scoring.medium_over
            );
        }

        // Keys and keywords are matched lowercase; normalize once at load.
        lex.base_scores = lex
            .base_scores
            .into_iter()
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v))
            .collect();
        for list in [
            &mut lex.keywords.urgency,
            &mut lex.keywords.risk,
            &mut lex.trust.confirmation,
            &mut lex.trust.sourced,
            &mut lex.trust.doubt,
        ] {
            for kw in list.iter_mut() {
                *kw = kw.trim().to_ascii_lowercase();
            }
            list.retain(|kw| !kw.is_empty());
        }
        if lex.keywords.urgency.is_empty() && lex.keywords.risk.is_empty() {
            anyhow::bail!("lexicon has no urgency or risk keywords");
        }

        Ok(lex)
    }

    /// The compiled-in canonical rule set (`config/lexicon.toml`).
    pub fn default_seed() -> Self {
        DEFAULT_SEED.clone()
    }

    /// Load from the configured path, falling back to the embedded seed so a
    /// missing config file never prevents boot.
    pub fn load_or_seed() -> Self {
        match Self::from_toml() {
            Ok(lex) => lex,
            Err(e) => {
                tracing::warn!(error = ?e, "lexicon config not loaded; using embedded seed");
                Self::default_seed()
            }
        }
    }

    /// Category base score, `default_base` for anything not in the table.
    pub fn base_score(&self, category: Category) -> i32 {
        *self
            .base_scores
            .get(category.as_str())
            .unwrap_or(&self.scoring.default_base)
    }

    /// Severity tier for a points total. Pure function of `points` alone.
    pub fn tier(&self, points: i32) -> Severity {
        if points > self.scoring.high_over {
            Severity::High
        } else if points > self.scoring.medium_over {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Trust adjustment for an already-lowercased description: first bucket
    /// with a substring match wins, no stacking, no match leaves 0.
    pub fn trust_modifier(&self, text_lower: &str) -> i32 {
        let hit = |terms: &[String]| terms.iter().any(|t| text_lower.contains(t.as_str()));
        if hit(&self.trust.confirmation) {
            self.trust.confirmation_bonus
        } else if hit(&self.trust.sourced) {
            self.trust.sourced_bonus
        } else if hit(&self.trust.doubt) {
            -self.trust.doubt_penalty
        } else {
            0
        }
    }
}

/* ----------------------------
Tests
---------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_parses_and_carries_canonical_values() {
        let lex = Lexicon::default_seed();
        assert_eq!(lex.base_score(Category::Fire), 20);
        assert_eq!(lex.base_score(Category::Chemical), 20);
        assert_eq!(lex.base_score(Category::Flood), 18);
        assert_eq!(lex.base_score(Category::Medical), 15);
        assert_eq!(lex.base_score(Category::Storm), 10);
        assert_eq!(lex.base_score(Category::General), 10);
        assert_eq!(lex.keywords.urgency_weight, 20);
        assert_eq!(lex.keywords.risk_weight, 15);
        assert_eq!(lex.scoring.base_trust, 50);
    }

    #[test]
    fn tier_boundaries_are_exclusive() {
        let lex = Lexicon::default_seed();
        assert_eq!(lex.tier(65), Severity::Low);
        assert_eq!(lex.tier(66), Severity::Medium);
        assert_eq!(lex.tier(90), Severity::Medium);
        assert_eq!(lex.tier(91), Severity::High);
    }

    #[test]
    fn trust_chain_first_bucket_wins() {
        let lex = Lexicon::default_seed();
        // Confirmation outranks doubt even when both are present.
        assert_eq!(lex.trust_modifier("confirmed but possible overrun"), 25);
        assert_eq!(lex.trust_modifier("reported by bystanders"), 15);
        assert_eq!(lex.trust_modifier("possible gas leak"), -15);
        assert_eq!(lex.trust_modifier("nothing notable"), 0);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let bad = r#"
[scoring]
default_base = 10
base_trust = 50
high_over = 60
medium_over = 80

[base_scores]
fire = 20

[keywords]
urgency_weight = 20
risk_weight = 15
urgency = ["urgent"]
risk = []

[trust]
confirmation_bonus = 25
sourced_bonus = 15
doubt_penalty = 15
confirmation = []
sourced = []
doubt = []
"#;
        assert!(Lexicon::from_toml_str(bad).is_err());
    }

    #[test]
    fn keywords_normalized_to_lowercase_on_load() {
        let cfg = r#"
[scoring]
default_base = 10
base_trust = 50
high_over = 90
medium_over = 65

[base_scores]
fire = 20

[keywords]
urgency_weight = 20
risk_weight = 15
urgency = [" URGENT ", ""]
risk = ["High Risk"]

[trust]
confirmation_bonus = 25
sourced_bonus = 15
doubt_penalty = 15
confirmation = ["Confirmed"]
sourced = []
doubt = []
"#;
        let lex = Lexicon::from_toml_str(cfg).unwrap();
        assert_eq!(lex.keywords.urgency, vec!["urgent".to_string()]);
        assert_eq!(lex.keywords.risk, vec!["high risk".to_string()]);
        assert_eq!(lex.trust_modifier("confirmed on scene"), 25);
    }
}
