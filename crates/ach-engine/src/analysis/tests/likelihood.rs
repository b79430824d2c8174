use super::common::*;
use crate::analysis::{
    calculate_hypothesis_likelihoods, rank_hypotheses, rank_hypotheses_weighted, EvidenceRef,
    Hypothesis, HypothesisId, IdentityWeighting, SatsWeighting, Score,
};

fn ids(ranked: &[crate::analysis::HypothesisLikelihood]) -> Vec<&str> {
    ranked
        .iter()
        .map(|entry| entry.hypothesis_id.0.as_str())
        .collect()
}

#[test]
fn all_tied_hypotheses_share_midpoint_likelihood() {
    let hypotheses = vec![
        Hypothesis::new("h1", "First"),
        Hypothesis::new("h2", "Second"),
        Hypothesis::new("h3", "Third"),
    ];
    let scores = vec![
        Score::new("e1", "h1", -2.0),
        Score::new("e1", "h2", -2.0),
        Score::new("e1", "h3", -2.0),
    ];

    let ranked = rank_hypotheses(&hypotheses, &scores, &[]);

    assert_eq!(ids(&ranked), vec!["h1", "h2", "h3"]);
    let ranks: Vec<usize> = ranked.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(ranked.iter().all(|entry| entry.likelihood == 50.0));
    assert!(ranked[0].is_least_contradicted);
    assert!(!ranked[1].is_least_contradicted);
    assert!(!ranked[2].is_least_contradicted);
}

#[test]
fn least_contradicted_hypothesis_ranks_first() {
    let hypotheses = vec![
        Hypothesis::new("h3", "Heavily contradicted"),
        Hypothesis::new("h1", "Supported"),
        Hypothesis::new("h2", "Mildly contradicted"),
    ];
    let scores = vec![
        Score::new("e1", "h1", 5.0),
        Score::new("e1", "h2", -3.0),
        Score::new("e1", "h3", -5.0),
        Score::new("e2", "h3", -5.0),
    ];

    let ranked = rank_hypotheses(&hypotheses, &scores, &[]);

    assert_eq!(ids(&ranked), vec!["h1", "h2", "h3"]);
    let first = &ranked[0];
    assert_eq!(first.rank, 1);
    assert!(first.is_least_contradicted);
    assert_close(first.likelihood, 100.0);
    assert_close(ranked[1].likelihood, 7.0 / 15.0 * 100.0);
    assert_close(ranked[2].likelihood, 0.0);
    assert_eq!(ranked[2].raw_score, -10.0);
    assert_eq!(ranked[2].contradicting_count, 2);
}

#[test]
fn counts_split_support_contradiction_and_neutral() {
    let ranked = rank_hypotheses(&hypotheses(), &scores(), &evidence());

    let h1 = ranked
        .iter()
        .find(|entry| entry.hypothesis_id == HypothesisId::new("h1"))
        .expect("h1 ranked");
    assert_eq!(h1.raw_score, 1.0);
    assert_eq!(h1.supporting_count, 1);
    assert_eq!(h1.contradicting_count, 1);
    assert_eq!(h1.neutral_count, 1);
    assert_eq!(h1.weighted_score, h1.raw_score);
}

#[test]
fn every_hypothesis_appears_even_without_scores() {
    let mut hypotheses = hypotheses();
    hypotheses.push(Hypothesis::new("h4", "Hacktivist group"));

    let ranked = rank_hypotheses(&hypotheses, &scores(), &evidence());

    assert_eq!(ranked.len(), 4);
    let h4 = ranked
        .iter()
        .find(|entry| entry.hypothesis_id == HypothesisId::new("h4"))
        .expect("h4 ranked");
    assert_eq!(h4.raw_score, 0.0);
    assert_eq!(h4.supporting_count + h4.contradicting_count + h4.neutral_count, 0);
}

#[test]
fn sats_weighting_changes_weighted_but_not_raw_scores() {
    let hypotheses = vec![Hypothesis::new("h1", "Supported"), Hypothesis::new("h2", "Contradicted")];
    let evidence = vec![
        graded(EvidenceRef::new("strong", "Verified intercept"), 5),
        graded(EvidenceRef::new("weak", "Rumour"), 1),
    ];
    let scores = vec![
        Score::new("weak", "h1", 5.0),
        Score::new("strong", "h2", 2.0),
    ];

    let identity = rank_hypotheses_weighted(&hypotheses, &scores, &evidence, &IdentityWeighting);
    assert_eq!(ids(&identity), vec!["h1", "h2"]);

    let weighted = calculate_hypothesis_likelihoods(&hypotheses, &scores, &evidence, &SatsWeighting);
    assert_eq!(ids(&weighted), vec!["h2", "h1"]);
    assert_close(weighted[0].weighted_score, 2.0);
    assert_close(weighted[1].weighted_score, 1.0);
    assert_eq!(weighted[1].raw_score, 5.0);
}

#[test]
fn ranking_is_idempotent() {
    let session = session();

    let first = rank_hypotheses(&session.hypotheses, &session.scores, &session.evidence);
    let second = rank_hypotheses(&session.hypotheses, &session.scores, &session.evidence);

    assert_eq!(first, second);
}
