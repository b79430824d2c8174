use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::diagnosticity::descending;
use super::domain::{EvidenceId, EvidenceRef, Hypothesis, HypothesisId, Score};
use super::weighting::{EvidenceWeighting, IdentityWeighting};

/// Likelihood assigned to every hypothesis when all aggregates tie.
pub const TIED_LIKELIHOOD: f64 = 50.0;

/// Aggregate standing of one hypothesis against all scored evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisLikelihood {
    pub hypothesis_id: HypothesisId,
    pub hypothesis_text: String,
    pub raw_score: f64,
    pub weighted_score: f64,
    /// 1-based; rank 1 is the least contradicted hypothesis.
    pub rank: usize,
    pub is_least_contradicted: bool,
    pub supporting_count: usize,
    pub contradicting_count: usize,
    pub neutral_count: usize,
    /// Position between the lowest and highest weighted score, 0..=100.
    pub likelihood: f64,
}

/// Rank hypotheses with identity weighting, so `weighted_score == raw_score`.
pub fn rank_hypotheses(
    hypotheses: &[Hypothesis],
    all_scores: &[Score],
    evidence: &[EvidenceRef],
) -> Vec<HypothesisLikelihood> {
    rank_hypotheses_weighted(hypotheses, all_scores, evidence, &IdentityWeighting)
}

/// Rank hypotheses by weighted aggregate score, highest (least contradicted) first.
///
/// Ties keep the order of `hypotheses`. A hypothesis without scores still
/// appears with zero totals.
pub fn rank_hypotheses_weighted<W>(
    hypotheses: &[Hypothesis],
    all_scores: &[Score],
    evidence: &[EvidenceRef],
    weighting: &W,
) -> Vec<HypothesisLikelihood>
where
    W: EvidenceWeighting + ?Sized,
{
    let evidence_by_id: HashMap<&EvidenceId, &EvidenceRef> = evidence
        .iter()
        .map(|item| (&item.evidence_id, item))
        .collect();

    let mut ranked: Vec<HypothesisLikelihood> = hypotheses
        .iter()
        .map(|hypothesis| aggregate(hypothesis, all_scores, &evidence_by_id, weighting))
        .collect();

    // `sort_by` is stable, which is what keeps tied hypotheses in input order.
    ranked.sort_by(|a, b| descending(a.weighted_score, b.weighted_score));

    for (position, entry) in ranked.iter_mut().enumerate() {
        entry.rank = position + 1;
        entry.is_least_contradicted = position == 0;
    }

    normalize_likelihoods(&mut ranked);
    ranked
}

/// Ranked likelihoods for every hypothesis, rank 1 first.
pub fn calculate_hypothesis_likelihoods<W>(
    hypotheses: &[Hypothesis],
    all_scores: &[Score],
    evidence: &[EvidenceRef],
    weighting: &W,
) -> Vec<HypothesisLikelihood>
where
    W: EvidenceWeighting + ?Sized,
{
    rank_hypotheses_weighted(hypotheses, all_scores, evidence, weighting)
}

fn aggregate<W>(
    hypothesis: &Hypothesis,
    all_scores: &[Score],
    evidence_by_id: &HashMap<&EvidenceId, &EvidenceRef>,
    weighting: &W,
) -> HypothesisLikelihood
where
    W: EvidenceWeighting + ?Sized,
{
    let mut raw_score = 0.0;
    let mut weighted_score = 0.0;
    let mut supporting_count = 0;
    let mut contradicting_count = 0;
    let mut neutral_count = 0;

    for score in all_scores
        .iter()
        .filter(|score| score.hypothesis_id == hypothesis.id)
    {
        raw_score += score.score;
        weighted_score += weighting.weigh(score, evidence_by_id.get(&score.evidence_id).copied());

        if score.score > 0.0 {
            supporting_count += 1;
        } else if score.score < 0.0 {
            contradicting_count += 1;
        } else if score.score == 0.0 {
            neutral_count += 1;
        }
    }

    HypothesisLikelihood {
        hypothesis_id: hypothesis.id.clone(),
        hypothesis_text: hypothesis.text.clone(),
        raw_score,
        weighted_score,
        rank: 0,
        is_least_contradicted: false,
        supporting_count,
        contradicting_count,
        neutral_count,
        likelihood: 0.0,
    }
}

fn normalize_likelihoods(ranked: &mut [HypothesisLikelihood]) {
    let max_score = ranked
        .iter()
        .map(|entry| entry.weighted_score)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_score = ranked
        .iter()
        .map(|entry| entry.weighted_score)
        .fold(f64::INFINITY, f64::min);
    let spread = max_score - min_score;

    for entry in ranked.iter_mut() {
        entry.likelihood = if spread > 0.0 && spread.is_finite() {
            (entry.weighted_score - min_score) / spread * 100.0
        } else {
            TIED_LIKELIHOOD
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypothesis_without_scores_is_neutral_zero() {
        let hypotheses = vec![Hypothesis::new("h1", "Insider threat")];

        let ranked = rank_hypotheses(&hypotheses, &[], &[]);

        assert_eq!(ranked.len(), 1);
        let only = &ranked[0];
        assert_eq!(only.raw_score, 0.0);
        assert_eq!(only.weighted_score, 0.0);
        assert_eq!(
            (only.supporting_count, only.contradicting_count, only.neutral_count),
            (0, 0, 0)
        );
        assert_eq!(only.rank, 1);
        assert!(only.is_least_contradicted);
        assert_eq!(only.likelihood, TIED_LIKELIHOOD);
    }

    #[test]
    fn empty_hypothesis_list_yields_empty_ranking() {
        let scores = vec![Score::new("e1", "h1", 3.0)];
        assert!(rank_hypotheses(&[], &scores, &[]).is_empty());
    }

    #[test]
    fn nan_total_ranks_last() {
        let hypotheses = vec![
            Hypothesis::new("h1", "Corrupted"),
            Hypothesis::new("h2", "Mild"),
            Hypothesis::new("h3", "Strong"),
        ];
        let scores = vec![
            Score::new("e1", "h1", f64::NAN),
            Score::new("e1", "h2", 1.0),
            Score::new("e1", "h3", 2.0),
        ];

        let ranked = rank_hypotheses(&hypotheses, &scores, &[]);

        let order: Vec<(&str, usize)> = ranked
            .iter()
            .map(|entry| (entry.hypothesis_id.0.as_str(), entry.rank))
            .collect();
        assert_eq!(order, vec![("h3", 1), ("h2", 2), ("h1", 3)]);
        assert!(ranked[0].is_least_contradicted);
    }
}
