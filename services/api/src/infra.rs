use ach_engine::analysis::{
    AnalysisSession, EvidenceRef, Hypothesis, SatsEvaluation, ScaleKind, Score, WeightingMode,
};
use ach_engine::error::AppError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read an analysis session exported by the persistence layer as JSON.
pub(crate) fn load_session(path: &Path) -> Result<AnalysisSession, AppError> {
    let raw = fs::read_to_string(path)?;
    let session = serde_json::from_str(&raw)?;
    Ok(session)
}

/// Cyber-incident attribution session used by the demo command.
pub(crate) fn sample_session() -> AnalysisSession {
    let evaluated_on = NaiveDate::from_ymd_opt(2025, 8, 16).unwrap_or_default();

    let mut techniques_grade = SatsEvaluation::uniform(4, evaluated_on);
    techniques_grade.reliability = 5;
    techniques_grade.timeliness = 3;

    let mut ransom_grade = SatsEvaluation::uniform(3, evaluated_on);
    ransom_grade.reliability = 2;
    ransom_grade.credibility = 2;
    ransom_grade.evaluator = Some("duty analyst".to_string());

    AnalysisSession {
        hypotheses: vec![
            Hypothesis::new("h1", "State-sponsored cyber attack"),
            Hypothesis::new("h2", "Criminal ransomware operation"),
            Hypothesis::new("h3", "Insider threat"),
        ],
        evidence: vec![
            EvidenceRef::new("e1", "Advanced persistent techniques observed")
                .with_sats(techniques_grade),
            EvidenceRef::new("e2", "Ransom demand sent to finance team").with_sats(ransom_grade),
            EvidenceRef::new("e3", "Intrusion timed with contractor offboarding").with_weight(2.0),
            EvidenceRef::new("e4", "Exfiltration volume below 1 GB"),
        ],
        scores: vec![
            Score::new("e1", "h1", 5.0),
            Score::new("e1", "h2", 0.0),
            Score::new("e1", "h3", -5.0),
            Score::new("e2", "h1", -5.0),
            Score::new("e2", "h2", 5.0),
            Score::new("e2", "h3", 0.0),
            Score::new("e3", "h1", 0.0),
            Score::new("e3", "h2", 0.0),
            Score::new("e3", "h3", 1.0),
        ],
    }
}

pub(crate) fn parse_scale_kind(raw: &str) -> Result<ScaleKind, String> {
    ScaleKind::parse(raw).ok_or_else(|| format!("unknown scale '{raw}' (expected linear or logarithmic)"))
}

pub(crate) fn parse_weighting(raw: &str) -> Result<WeightingMode, String> {
    WeightingMode::parse(raw).ok_or_else(|| format!("unknown weighting '{raw}' (expected identity, sats or explicit)"))
}
