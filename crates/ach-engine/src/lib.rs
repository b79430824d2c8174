//! Analysis of Competing Hypotheses (ACH) scoring engine.
//!
//! [`analysis`] holds the pure scoring core; [`config`], [`telemetry`] and
//! [`error`] are the service plumbing shared with the API binary.

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;
