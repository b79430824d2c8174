use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::bands::{DiagnosticityBand, NO_SCORES_REASONING};
use super::domain::{hypothesis_label, EvidenceId, EvidenceRef, Hypothesis, HypothesisId, Score};
use super::scale::Scale;

/// Diagnosticity above which evidence counts as diagnostic (exclusive).
pub const DIAGNOSTIC_CUTOFF: f64 = 50.0;

const MAX_DIAGNOSTICITY: f64 = 100.0;

/// A hypothesis paired with the score one evidence item gave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisScore {
    pub hypothesis_id: HypothesisId,
    pub hypothesis_text: String,
    pub score: f64,
}

/// How strongly one evidence item discriminates between hypotheses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticityResult {
    pub evidence_id: EvidenceId,
    pub evidence_title: String,
    /// Normalized to [0, 100] against the scale's full span.
    pub diagnosticity: f64,
    /// `max - min` of the raw scores for this evidence.
    pub range: f64,
    pub band: DiagnosticityBand,
    pub reasoning: String,
    /// `None` when the evidence has not been scored yet.
    pub top_hypothesis: Option<HypothesisScore>,
    /// Every other scored hypothesis, highest score first.
    pub other_hypotheses: Vec<HypothesisScore>,
    pub is_diagnostic: bool,
}

impl DiagnosticityResult {
    fn unscored(evidence_id: &EvidenceId, evidence_title: &str) -> Self {
        Self {
            evidence_id: evidence_id.clone(),
            evidence_title: evidence_title.to_string(),
            diagnosticity: 0.0,
            range: 0.0,
            band: DiagnosticityBand::VeryLow,
            reasoning: NO_SCORES_REASONING.to_string(),
            top_hypothesis: None,
            other_hypotheses: Vec::new(),
            is_diagnostic: false,
        }
    }
}

/// Measure how much a single evidence item discriminates between hypotheses.
///
/// Unscored evidence yields a zeroed result rather than an error. When
/// several hypotheses share the maximum score, the first one in `all_scores`
/// order becomes the top hypothesis.
pub fn compute_diagnosticity(
    evidence_id: &EvidenceId,
    evidence_title: &str,
    all_scores: &[Score],
    hypotheses: &[Hypothesis],
    scale: &Scale,
) -> DiagnosticityResult {
    let scores: Vec<&Score> = all_scores
        .iter()
        .filter(|score| &score.evidence_id == evidence_id)
        .collect();

    if scores.is_empty() {
        return DiagnosticityResult::unscored(evidence_id, evidence_title);
    }

    let max_score = scores
        .iter()
        .map(|score| score.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_score = scores
        .iter()
        .map(|score| score.score)
        .fold(f64::INFINITY, f64::min);
    let range = max_score - min_score;

    let diagnosticity = normalize(range, scale);
    let band = DiagnosticityBand::classify(diagnosticity);

    let top_index = scores
        .iter()
        .position(|score| score.score == max_score)
        .unwrap_or(0);

    let mut top_hypothesis = None;
    let mut other_hypotheses = Vec::with_capacity(scores.len().saturating_sub(1));
    for (index, score) in scores.iter().enumerate() {
        let entry = HypothesisScore {
            hypothesis_id: score.hypothesis_id.clone(),
            hypothesis_text: hypothesis_label(hypotheses, &score.hypothesis_id).to_string(),
            score: score.score,
        };
        if index == top_index {
            top_hypothesis = Some(entry);
        } else {
            other_hypotheses.push(entry);
        }
    }
    other_hypotheses.sort_by(|a, b| descending(a.score, b.score));

    DiagnosticityResult {
        evidence_id: evidence_id.clone(),
        evidence_title: evidence_title.to_string(),
        diagnosticity,
        range,
        band,
        reasoning: band.reasoning(range),
        top_hypothesis,
        other_hypotheses,
        is_diagnostic: diagnosticity > DIAGNOSTIC_CUTOFF,
    }
}

/// Diagnosticity for every evidence item, most diagnostic first.
///
/// Items are computed in parallel; equal diagnosticity keeps `evidence` order.
pub fn compute_all_diagnosticity(
    evidence: &[EvidenceRef],
    all_scores: &[Score],
    hypotheses: &[Hypothesis],
    scale: &Scale,
) -> Vec<DiagnosticityResult> {
    let mut results: Vec<DiagnosticityResult> = evidence
        .par_iter()
        .map(|item| {
            compute_diagnosticity(
                &item.evidence_id,
                &item.evidence_title,
                all_scores,
                hypotheses,
                scale,
            )
        })
        .collect();

    sort_by_diagnosticity(&mut results);
    results
}

pub(crate) fn sort_by_diagnosticity(results: &mut [DiagnosticityResult]) {
    results.sort_by(|a, b| descending(a.diagnosticity, b.diagnosticity));
}

fn normalize(range: f64, scale: &Scale) -> f64 {
    let normalized = range / scale.max_possible_range() * MAX_DIAGNOSTICITY;
    if normalized.is_nan() {
        return 0.0;
    }
    normalized.clamp(0.0, MAX_DIAGNOSTICITY)
}

/// Highest first with NaN after every number, so the order stays total.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
