use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::analysis::{AnalysisSession, EvidenceRef, Hypothesis, SatsEvaluation, Score};

pub(super) fn hypotheses() -> Vec<Hypothesis> {
    vec![
        Hypothesis::new("h1", "State-sponsored cyber attack"),
        Hypothesis::new("h2", "Criminal ransomware operation"),
        Hypothesis::new("h3", "Insider threat"),
    ]
}

pub(super) fn evidence() -> Vec<EvidenceRef> {
    vec![
        EvidenceRef::new("e1", "Advanced persistent techniques"),
        EvidenceRef::new("e2", "Ransom demand received"),
        EvidenceRef::new("e3", "Attack timed with layoffs"),
        EvidenceRef::new("e4", "Unreviewed firewall logs"),
    ]
}

/// Logarithmic-scale scores; e4 is deliberately left unscored.
pub(super) fn scores() -> Vec<Score> {
    vec![
        Score::new("e1", "h1", 4.0),
        Score::new("e1", "h2", -4.0),
        Score::new("e1", "h3", 0.0),
        Score::new("e2", "h1", -3.0),
        Score::new("e2", "h2", 5.0),
        Score::new("e2", "h3", 0.0),
        Score::new("e3", "h1", 0.0),
        Score::new("e3", "h2", 1.0),
        Score::new("e3", "h3", 1.0),
    ]
}

pub(super) fn session() -> AnalysisSession {
    AnalysisSession {
        hypotheses: hypotheses(),
        evidence: evidence(),
        scores: scores(),
    }
}

pub(super) fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 16).expect("valid date")
}

pub(super) fn graded(evidence: EvidenceRef, grade: u8) -> EvidenceRef {
    evidence.with_sats(SatsEvaluation::uniform(grade, evaluation_date()))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
