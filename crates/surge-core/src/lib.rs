//! # Surge Core — Hospital Surge Estimation Engines
//!
//! Deterministic, rule-based estimators for near-term hospital patient
//! inflow and staffing needs:
//!
//! 1. [`festival`] — patient surge during festival periods
//! 2. [`pollution`] — respiratory surge driven by air quality (AQI)
//! 3. [`staffing`] — required headcount for a predicted inflow
//! 4. [`calendar`] — fixed festival calendar and nearest-window lookup
//!
//! Every estimator is a pure function of its input plus fixed constant
//! tables, so concurrent calls need no coordination. Callers are expected
//! to validate raw request fields (date strings, AQI range, enum
//! membership) before constructing the typed inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod festival;
pub mod pollution;
pub mod staffing;

// ─────────────────────────────────────────────
// Shared types
// ─────────────────────────────────────────────

/// Qualitative severity label attached to an estimate.
///
/// The festival estimator emits `low`/`medium`/`high`; the pollution
/// estimator additionally emits `critical` for the worst AQI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Estimation failure.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// The festival window ends before it starts. A reversed window would
    /// produce a zero or negative duration and a nonsensical inflow, so it
    /// is rejected instead of propagated.
    #[error("festival window ends before it starts ({end} < {start})")]
    InvalidDateWindow { start: NaiveDate, end: NaiveDate },
}
