//! Analysis of Competing Hypotheses scoring.
//!
//! Everything here is a pure function of the caller-supplied session: the
//! diagnosticity calculator and the likelihood ranker share no state and can
//! run in either order.

pub mod bands;
pub mod diagnosticity;
pub mod domain;
mod engine;
pub mod likelihood;
pub mod matrix;
pub mod router;
pub mod scale;
pub mod weighting;

#[cfg(test)]
mod tests;

pub use bands::{format_signed, DiagnosticityBand, ScoreBand};
pub use diagnosticity::{
    compute_all_diagnosticity, compute_diagnosticity, DiagnosticityResult, HypothesisScore,
};
pub use domain::{
    AnalysisSession, EvidenceId, EvidenceRef, Hypothesis, HypothesisId, SatsEvaluation, Score,
};
pub use engine::{AchEngine, AchReport, AnalysisError};
pub use likelihood::{
    calculate_hypothesis_likelihoods, rank_hypotheses, rank_hypotheses_weighted,
    HypothesisLikelihood,
};
pub use matrix::{ConsistencyMatrix, MatrixExportError};
pub use router::{analysis_router, AnalysisRequest};
pub use scale::{Scale, ScaleDescriptor, ScaleError, ScaleKind};
pub use weighting::{
    EvidenceWeighting, ExplicitWeighting, IdentityWeighting, SatsWeighting, WeightingMode,
};
