use super::common::*;
use crate::analysis::{
    AchEngine, AnalysisError, EvidenceRef, IdentityWeighting, Scale, ScaleDescriptor, ScaleError,
    ScaleKind, WeightingMode,
};

#[test]
fn report_combines_both_rankings_and_matrix() {
    let engine = AchEngine::new(Scale::logarithmic());

    let report = engine.analyze(&session());

    assert_eq!(report.diagnosticity.len(), 4);
    assert_eq!(report.likelihoods.len(), 3);
    assert_eq!(report.matrix.rows.len(), 4);
    assert_eq!(report.weighting, "identity");

    let leader = report.least_contradicted().expect("leader present");
    assert_eq!(leader.hypothesis_id.0, "h2");
    assert_eq!(leader.rank, 1);

    let diagnostic: Vec<&str> = report
        .diagnostic_evidence()
        .map(|result| result.evidence_id.0.as_str())
        .collect();
    assert_eq!(diagnostic, vec!["e1", "e2"]);
}

#[test]
fn customized_engine_applies_request_overrides() {
    let engine = AchEngine::default();

    let linear = engine
        .customized(
            Some(ScaleDescriptor {
                min: -3.0,
                max: 3.0,
                kind: ScaleKind::Linear,
            }),
            Some(WeightingMode::Sats),
        )
        .expect("valid overrides");

    assert_eq!(linear.scale(), &Scale::linear());
    assert_eq!(linear.weighting_label(), "sats");

    let unchanged = engine.customized(None, None).expect("no overrides");
    assert_eq!(unchanged.scale(), engine.scale());
    assert_eq!(unchanged.weighting_label(), "identity");
}

#[test]
fn customized_engine_rejects_inverted_scale() {
    let error = AchEngine::default()
        .customized(
            Some(ScaleDescriptor {
                min: 5.0,
                max: -5.0,
                kind: ScaleKind::Logarithmic,
            }),
            None,
        )
        .expect_err("inverted scale rejected");

    assert_eq!(
        error,
        AnalysisError::InvalidScale(ScaleError::EmptyRange { min: 5.0, max: -5.0 })
    );
}

#[test]
fn sats_engine_discounts_low_quality_evidence() {
    let mut session = session();
    session.evidence[1] = graded(EvidenceRef::new("e2", "Ransom demand received"), 1);

    let identity = AchEngine::with_mode(Scale::logarithmic(), WeightingMode::Identity).analyze(&session);
    let sats = AchEngine::with_mode(Scale::logarithmic(), WeightingMode::Sats).analyze(&session);

    assert_eq!(identity.least_contradicted().expect("leader").hypothesis_id.0, "h2");
    // h1: 4 - 3*0.2 + 0 = 3.4, h3: 1, h2: -4 + 5*0.2 + 1 = -2
    assert_eq!(sats.least_contradicted().expect("leader").hypothesis_id.0, "h1");
    assert_eq!(sats.diagnosticity, identity.diagnosticity);
}

#[test]
fn custom_weighting_is_reported_by_label() {
    let engine = AchEngine::with_weighting(Scale::linear(), "analyst-override", IdentityWeighting);

    let report = engine.analyze(&session());

    assert_eq!(report.weighting, "analyst-override");
    assert_eq!(report.scale.kind(), ScaleKind::Linear);
}
