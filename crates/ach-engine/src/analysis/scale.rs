use serde::{Deserialize, Serialize};
use std::fmt;

/// Convention analysts use when entering consistency scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Linear,
    Logarithmic,
}

impl ScaleKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Logarithmic => "logarithmic",
        }
    }

    /// Parse a scale kind name, accepting the common abbreviations.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => Some(Self::Linear),
            "logarithmic" | "log" => Some(Self::Logarithmic),
            _ => None,
        }
    }

    /// Default bounds for this convention.
    pub fn preset(&self) -> Scale {
        match self {
            ScaleKind::Linear => Scale::linear(),
            ScaleKind::Logarithmic => Scale::logarithmic(),
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Valid score range for a session.
///
/// Bounds are validated on construction so `max_possible_range` is always
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaleDescriptor", into = "ScaleDescriptor")]
pub struct Scale {
    min: f64,
    max: f64,
    kind: ScaleKind,
}

impl Scale {
    pub const LINEAR_BOUND: f64 = 3.0;
    pub const LOGARITHMIC_BOUND: f64 = 5.0;

    pub fn new(min: f64, max: f64, kind: ScaleKind) -> Result<Self, ScaleError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ScaleError::NonFinite { min, max });
        }
        if min >= max {
            return Err(ScaleError::EmptyRange { min, max });
        }
        Ok(Self { min, max, kind })
    }

    /// Symmetric linear scale, [-3, +3].
    pub fn linear() -> Self {
        Self {
            min: -Self::LINEAR_BOUND,
            max: Self::LINEAR_BOUND,
            kind: ScaleKind::Linear,
        }
    }

    /// Symmetric logarithmic scale, [-5, +5].
    pub fn logarithmic() -> Self {
        Self {
            min: -Self::LOGARITHMIC_BOUND,
            max: Self::LOGARITHMIC_BOUND,
            kind: ScaleKind::Logarithmic,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Full span of the scale, used as the diagnosticity denominator.
    pub fn max_possible_range(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::logarithmic()
    }
}

/// Wire shape of a scale, validated into [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleDescriptor {
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

impl TryFrom<ScaleDescriptor> for Scale {
    type Error = ScaleError;

    fn try_from(value: ScaleDescriptor) -> Result<Self, Self::Error> {
        Scale::new(value.min, value.max, value.kind)
    }
}

impl From<Scale> for ScaleDescriptor {
    fn from(value: Scale) -> Self {
        Self {
            min: value.min,
            max: value.max,
            kind: value.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("scale bounds must be finite (min {min}, max {max})")]
    NonFinite { min: f64, max: f64 },
    #[error("scale minimum {min} must be below maximum {max}")]
    EmptyRange { min: f64, max: f64 },
}
