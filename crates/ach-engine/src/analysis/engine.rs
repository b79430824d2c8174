use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::diagnosticity::{compute_all_diagnosticity, DiagnosticityResult};
use super::domain::AnalysisSession;
use super::likelihood::{calculate_hypothesis_likelihoods, HypothesisLikelihood};
use super::matrix::ConsistencyMatrix;
use super::scale::{Scale, ScaleDescriptor, ScaleError};
use super::weighting::{EvidenceWeighting, WeightingMode};

/// Stateless scorer pairing a session scale with a weighting strategy.
///
/// Cloning is cheap; the weighting strategy is shared.
#[derive(Clone)]
pub struct AchEngine {
    scale: Scale,
    weighting: Arc<dyn EvidenceWeighting>,
    weighting_label: String,
}

impl AchEngine {
    pub fn new(scale: Scale) -> Self {
        Self::with_mode(scale, WeightingMode::Identity)
    }

    pub fn with_mode(scale: Scale, mode: WeightingMode) -> Self {
        Self {
            scale,
            weighting: Arc::from(mode.strategy()),
            weighting_label: mode.label().to_string(),
        }
    }

    /// Use a caller-supplied weighting, e.g. an analyst-specific quality model.
    pub fn with_weighting<W>(scale: Scale, label: impl Into<String>, weighting: W) -> Self
    where
        W: EvidenceWeighting + 'static,
    {
        Self {
            scale,
            weighting: Arc::new(weighting),
            weighting_label: label.into(),
        }
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn weighting_label(&self) -> &str {
        &self.weighting_label
    }

    /// Copy of this engine with per-request scale and weighting overrides applied.
    pub fn customized(
        &self,
        scale: Option<ScaleDescriptor>,
        mode: Option<WeightingMode>,
    ) -> Result<Self, AnalysisError> {
        let scale = match scale {
            Some(descriptor) => Scale::try_from(descriptor)?,
            None => self.scale,
        };

        Ok(match mode {
            Some(mode) => Self::with_mode(scale, mode),
            None => Self {
                scale,
                weighting: Arc::clone(&self.weighting),
                weighting_label: self.weighting_label.clone(),
            },
        })
    }

    pub fn diagnosticity(&self, session: &AnalysisSession) -> Vec<DiagnosticityResult> {
        compute_all_diagnosticity(
            &session.evidence,
            &session.scores,
            &session.hypotheses,
            &self.scale,
        )
    }

    pub fn likelihoods(&self, session: &AnalysisSession) -> Vec<HypothesisLikelihood> {
        calculate_hypothesis_likelihoods(
            &session.hypotheses,
            &session.scores,
            &session.evidence,
            self.weighting.as_ref(),
        )
    }

    pub fn matrix(&self, session: &AnalysisSession) -> ConsistencyMatrix {
        ConsistencyMatrix::build(&session.hypotheses, &session.evidence, &session.scores)
    }

    /// Full report: diagnosticity, ranked likelihoods, and the consistency matrix.
    pub fn analyze(&self, session: &AnalysisSession) -> AchReport {
        debug!(
            hypotheses = session.hypotheses.len(),
            evidence = session.evidence.len(),
            scores = session.scores.len(),
            scale = %self.scale.kind(),
            weighting = %self.weighting_label,
            "scoring ACH session"
        );

        let out_of_range = session
            .scores
            .iter()
            .filter(|score| !self.scale.contains(score.score))
            .count();
        if out_of_range > 0 {
            warn!(
                out_of_range,
                min = self.scale.min(),
                max = self.scale.max(),
                "scores fall outside the configured scale; diagnosticity will be clamped"
            );
        }

        AchReport {
            scale: self.scale,
            weighting: self.weighting_label.clone(),
            diagnosticity: self.diagnosticity(session),
            likelihoods: self.likelihoods(session),
            matrix: self.matrix(session),
        }
    }
}

impl Default for AchEngine {
    fn default() -> Self {
        Self::new(Scale::default())
    }
}

impl std::fmt::Debug for AchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchEngine")
            .field("scale", &self.scale)
            .field("weighting", &self.weighting_label)
            .finish()
    }
}

/// Everything derived from one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchReport {
    pub scale: Scale,
    pub weighting: String,
    /// Most diagnostic evidence first.
    pub diagnosticity: Vec<DiagnosticityResult>,
    /// Rank 1 first.
    pub likelihoods: Vec<HypothesisLikelihood>,
    pub matrix: ConsistencyMatrix,
}

impl AchReport {
    pub fn least_contradicted(&self) -> Option<&HypothesisLikelihood> {
        self.likelihoods
            .iter()
            .find(|entry| entry.is_least_contradicted)
    }

    pub fn diagnostic_evidence(&self) -> impl Iterator<Item = &DiagnosticityResult> {
        self.diagnosticity.iter().filter(|result| result.is_diagnostic)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid scale: {0}")]
    InvalidScale(#[from] ScaleError),
}
