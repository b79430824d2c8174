use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for competing hypotheses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HypothesisId(pub String);

/// Identifier wrapper for evidence linked into a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvidenceId(pub String);

impl HypothesisId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl EvidenceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Competing explanation under analysis. Order is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: HypothesisId,
    pub text: String,
}

impl Hypothesis {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: HypothesisId::new(id),
            text: text.into(),
        }
    }
}

/// Reference to a piece of evidence. Content lives with the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRef {
    pub evidence_id: EvidenceId,
    pub evidence_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sats: Option<SatsEvaluation>,
    /// Analyst-assigned multiplier; absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl EvidenceRef {
    pub fn new(evidence_id: impl Into<String>, evidence_title: impl Into<String>) -> Self {
        Self {
            evidence_id: EvidenceId::new(evidence_id),
            evidence_title: evidence_title.into(),
            sats: None,
            weight: None,
        }
    }

    pub fn with_sats(mut self, sats: SatsEvaluation) -> Self {
        self.sats = Some(sats);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// One analyst judgment of how consistent an evidence item is with a hypothesis.
///
/// At most one score exists per (evidence, hypothesis) pair; callers uphold
/// that, the engine never deduplicates. A missing pair is not a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub evidence_id: EvidenceId,
    pub hypothesis_id: HypothesisId,
    pub score: f64,
}

impl Score {
    pub fn new(evidence_id: impl Into<String>, hypothesis_id: impl Into<String>, score: f64) -> Self {
        Self {
            evidence_id: EvidenceId::new(evidence_id),
            hypothesis_id: HypothesisId::new(hypothesis_id),
            score,
        }
    }
}

/// Source/Accuracy/Timeliness/Significance grading of an evidence item.
///
/// Every criterion is graded 1 (poor) through 5 (excellent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatsEvaluation {
    pub reliability: u8,
    pub credibility: u8,
    pub validity: u8,
    pub relevance: u8,
    pub significance: u8,
    pub timeliness: u8,
    pub accuracy: u8,
    pub completeness: u8,
    pub evaluation_date: NaiveDate,
    #[serde(default)]
    pub evaluator: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SatsEvaluation {
    pub const MIN_GRADE: u8 = 1;
    pub const MAX_GRADE: u8 = 5;

    /// Uniform grading across all eight criteria.
    pub fn uniform(grade: u8, evaluation_date: NaiveDate) -> Self {
        Self {
            reliability: grade,
            credibility: grade,
            validity: grade,
            relevance: grade,
            significance: grade,
            timeliness: grade,
            accuracy: grade,
            completeness: grade,
            evaluation_date,
            evaluator: None,
            notes: None,
        }
    }

    fn grades(&self) -> [u8; 8] {
        [
            self.reliability,
            self.credibility,
            self.validity,
            self.relevance,
            self.significance,
            self.timeliness,
            self.accuracy,
            self.completeness,
        ]
    }

    /// Mean of the eight criteria, each clamped into the 1..=5 grade range.
    pub fn overall_score(&self) -> f64 {
        let grades = self.grades();
        let total: u32 = grades
            .iter()
            .map(|grade| u32::from((*grade).clamp(Self::MIN_GRADE, Self::MAX_GRADE)))
            .sum();
        f64::from(total) / grades.len() as f64
    }
}

/// Everything the engine needs for one analysis session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    #[serde(default)]
    pub evidence: Vec<EvidenceRef>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

pub(crate) const UNKNOWN_HYPOTHESIS_LABEL: &str = "Unknown";

/// Resolve a hypothesis label, degrading to "Unknown" for ids the session lacks.
pub(crate) fn hypothesis_label<'a>(hypotheses: &'a [Hypothesis], id: &HypothesisId) -> &'a str {
    match hypotheses.iter().find(|hypothesis| &hypothesis.id == id) {
        Some(hypothesis) => hypothesis.text.as_str(),
        None => {
            tracing::warn!(hypothesis_id = %id.0, "score references unknown hypothesis");
            UNKNOWN_HYPOTHESIS_LABEL
        }
    }
}
