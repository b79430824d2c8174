use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{EvidenceRef, SatsEvaluation, Score};

/// Strategy turning one raw score into its contribution to a hypothesis total.
///
/// `evidence` is `None` when the score references evidence the session does
/// not list; implementations must still return a usable contribution.
pub trait EvidenceWeighting: Send + Sync {
    fn weigh(&self, score: &Score, evidence: Option<&EvidenceRef>) -> f64;
}

impl<W: EvidenceWeighting + ?Sized> EvidenceWeighting for Box<W> {
    fn weigh(&self, score: &Score, evidence: Option<&EvidenceRef>) -> f64 {
        (**self).weigh(score, evidence)
    }
}

impl<W: EvidenceWeighting + ?Sized> EvidenceWeighting for &W {
    fn weigh(&self, score: &Score, evidence: Option<&EvidenceRef>) -> f64 {
        (**self).weigh(score, evidence)
    }
}

/// Pass-through weighting: every score counts at face value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityWeighting;

impl EvidenceWeighting for IdentityWeighting {
    fn weigh(&self, score: &Score, _evidence: Option<&EvidenceRef>) -> f64 {
        score.score
    }
}

/// Scales each score by the evidence's SATS grade (`overall / 5`).
///
/// Evidence without an evaluation keeps full weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SatsWeighting;

impl SatsWeighting {
    pub fn multiplier(sats: Option<&SatsEvaluation>) -> f64 {
        sats.map(|sats| sats.overall_score() / f64::from(SatsEvaluation::MAX_GRADE))
            .unwrap_or(1.0)
    }
}

impl EvidenceWeighting for SatsWeighting {
    fn weigh(&self, score: &Score, evidence: Option<&EvidenceRef>) -> f64 {
        let sats = evidence.and_then(|evidence| evidence.sats.as_ref());
        score.score * Self::multiplier(sats)
    }
}

/// Multiplies each score by the analyst's explicit evidence weight.
///
/// Evidence without a weight, or missing from the session, counts once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitWeighting;

impl ExplicitWeighting {
    pub const DEFAULT_WEIGHT: f64 = 1.0;
}

impl EvidenceWeighting for ExplicitWeighting {
    fn weigh(&self, score: &Score, evidence: Option<&EvidenceRef>) -> f64 {
        let weight = evidence
            .and_then(|evidence| evidence.weight)
            .unwrap_or(Self::DEFAULT_WEIGHT);
        score.score * weight
    }
}

/// Named weighting strategies selectable from configuration or requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    #[default]
    Identity,
    Sats,
    Explicit,
}

impl WeightingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "identity" | "none" | "raw" => Some(Self::Identity),
            "sats" | "quality" => Some(Self::Sats),
            "explicit" | "weight" | "weighted" => Some(Self::Explicit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeightingMode::Identity => "identity",
            WeightingMode::Sats => "sats",
            WeightingMode::Explicit => "explicit",
        }
    }

    pub fn strategy(&self) -> Box<dyn EvidenceWeighting> {
        match self {
            WeightingMode::Identity => Box::new(IdentityWeighting),
            WeightingMode::Sats => Box::new(SatsWeighting),
            WeightingMode::Explicit => Box::new(ExplicitWeighting),
        }
    }
}

impl fmt::Display for WeightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn graded_evidence(grade: u8) -> EvidenceRef {
        let date = NaiveDate::from_ymd_opt(2025, 8, 16).expect("valid date");
        EvidenceRef::new("e1", "Intercept").with_sats(SatsEvaluation::uniform(grade, date))
    }

    #[test]
    fn identity_returns_raw_score() {
        let score = Score::new("e1", "h1", -3.0);
        assert_eq!(IdentityWeighting.weigh(&score, None), -3.0);
        assert_eq!(IdentityWeighting.weigh(&score, Some(&graded_evidence(1))), -3.0);
    }

    #[test]
    fn sats_scales_by_overall_grade() {
        let score = Score::new("e1", "h1", 4.0);
        assert_eq!(SatsWeighting.weigh(&score, Some(&graded_evidence(5))), 4.0);
        assert!((SatsWeighting.weigh(&score, Some(&graded_evidence(2))) - 1.6).abs() < 1e-9);
    }

    #[test]
    fn sats_keeps_full_weight_without_evaluation() {
        let score = Score::new("e1", "h1", -2.0);
        assert_eq!(SatsWeighting.weigh(&score, None), -2.0);
        assert_eq!(
            SatsWeighting.weigh(&score, Some(&EvidenceRef::new("e1", "Intercept"))),
            -2.0
        );
    }

    #[test]
    fn modes_parse_and_build_strategies() {
        assert_eq!(WeightingMode::parse("SATS"), Some(WeightingMode::Sats));
        assert_eq!(WeightingMode::parse("none"), Some(WeightingMode::Identity));
        assert_eq!(WeightingMode::parse("bayes"), None);

        let score = Score::new("e1", "h1", 4.0);
        let strategy = WeightingMode::Sats.strategy();
        assert!((strategy.weigh(&score, Some(&graded_evidence(3))) - 2.4).abs() < 1e-9);

        assert_eq!(WeightingMode::parse("Explicit"), Some(WeightingMode::Explicit));
        assert_eq!(WeightingMode::Explicit.to_string(), "explicit");
    }

    #[test]
    fn explicit_multiplies_by_evidence_weight() {
        let score = Score::new("e1", "h1", -4.0);
        let heavy = EvidenceRef::new("e1", "Intercept").with_weight(1.5);
        let ignored = EvidenceRef::new("e1", "Intercept").with_weight(0.0);

        assert_eq!(ExplicitWeighting.weigh(&score, Some(&heavy)), -6.0);
        assert_eq!(ExplicitWeighting.weigh(&score, Some(&ignored)), 0.0);
    }

    #[test]
    fn explicit_defaults_to_unit_weight() {
        let score = Score::new("e1", "h1", 3.0);
        assert_eq!(ExplicitWeighting.weigh(&score, None), 3.0);
        assert_eq!(
            ExplicitWeighting.weigh(&score, Some(&graded_evidence(1))),
            3.0
        );
        assert_eq!(
            WeightingMode::Explicit
                .strategy()
                .weigh(&score, Some(&EvidenceRef::new("e1", "Intercept").with_weight(2.0))),
            6.0
        );
    }

    #[test]
    fn weight_is_optional_in_json() {
        let parsed: EvidenceRef =
            serde_json::from_str(r#"{"evidence_id":"e1","evidence_title":"Intercept"}"#)
                .expect("evidence parses");
        assert_eq!(parsed.weight, None);

        let weighted: EvidenceRef = serde_json::from_str(
            r#"{"evidence_id":"e1","evidence_title":"Intercept","weight":0.5}"#,
        )
        .expect("weighted evidence parses");
        assert_eq!(weighted.weight, Some(0.5));
    }
}
