//! Classification bands and display helpers shared by the calculator, the
//! ranker and the consistency matrix.

use serde::{Deserialize, Serialize};

/// Magnitude at which a raw score counts as strong support or contradiction.
pub const STRONG_SCORE_THRESHOLD: f64 = 3.0;

pub const HIGHLY_DIAGNOSTIC_THRESHOLD: f64 = 80.0;
pub const MODERATELY_DIAGNOSTIC_THRESHOLD: f64 = 50.0;
pub const LOW_DIAGNOSTIC_THRESHOLD: f64 = 25.0;

/// Consistency bucket for a single raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    StrongSupport,
    WeakSupport,
    Neutral,
    WeakContradiction,
    StrongContradiction,
}

impl ScoreBand {
    pub fn classify(score: f64) -> Self {
        if score >= STRONG_SCORE_THRESHOLD {
            Self::StrongSupport
        } else if score > 0.0 {
            Self::WeakSupport
        } else if score == 0.0 {
            Self::Neutral
        } else if score > -STRONG_SCORE_THRESHOLD {
            Self::WeakContradiction
        } else {
            Self::StrongContradiction
        }
    }

    pub fn ordered() -> [Self; 5] {
        [
            Self::StrongSupport,
            Self::WeakSupport,
            Self::Neutral,
            Self::WeakContradiction,
            Self::StrongContradiction,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::StrongSupport => "strong support",
            ScoreBand::WeakSupport => "weak support",
            ScoreBand::Neutral => "neutral",
            ScoreBand::WeakContradiction => "weak contradiction",
            ScoreBand::StrongContradiction => "strong contradiction",
        }
    }

    /// Matrix marker used in consistency grids.
    pub fn marker(&self) -> &'static str {
        match self {
            ScoreBand::StrongSupport => "++",
            ScoreBand::WeakSupport => "+",
            ScoreBand::Neutral => "0",
            ScoreBand::WeakContradiction => "-",
            ScoreBand::StrongContradiction => "--",
        }
    }
}

/// How strongly a piece of evidence discriminates between hypotheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticityBand {
    High,
    Moderate,
    Low,
    VeryLow,
}

impl DiagnosticityBand {
    pub fn classify(diagnosticity: f64) -> Self {
        if diagnosticity >= HIGHLY_DIAGNOSTIC_THRESHOLD {
            Self::High
        } else if diagnosticity >= MODERATELY_DIAGNOSTIC_THRESHOLD {
            Self::Moderate
        } else if diagnosticity >= LOW_DIAGNOSTIC_THRESHOLD {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticityBand::High => "highly diagnostic",
            DiagnosticityBand::Moderate => "moderately diagnostic",
            DiagnosticityBand::Low => "low diagnosticity",
            DiagnosticityBand::VeryLow => "very low diagnosticity",
        }
    }

    /// Analyst-facing explanation carrying the raw range, digit for digit.
    pub fn reasoning(&self, range: f64) -> String {
        match self {
            DiagnosticityBand::High => format!(
                "Highly diagnostic: scores span a range of {range} across hypotheses, strongly favoring some explanations over others"
            ),
            DiagnosticityBand::Moderate => format!(
                "Moderately diagnostic: scores span a range of {range}, helping to separate some hypotheses"
            ),
            DiagnosticityBand::Low => format!(
                "Low diagnosticity: scores span a range of only {range}, weakly separating hypotheses"
            ),
            DiagnosticityBand::VeryLow => format!(
                "Very low diagnosticity: scores span a range of {range}, evidence is near-neutral across all hypotheses"
            ),
        }
    }
}

pub(crate) const NO_SCORES_REASONING: &str =
    "No scores exist for this evidence yet; it cannot discriminate between hypotheses";

/// Render a value with an explicit sign for positives, e.g. `+4`, `0`, `-2.5`.
pub fn format_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_number(value))
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format_number(value)
    }
}

/// Integral values render without decimals, fractional ones with one.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
