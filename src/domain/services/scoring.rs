//! Risk scoring service
//!
//! Pure functions shared by risk assessments and threat models. The
//! score is the product of the likelihood and impact weights (1..=25);
//! the level buckets are fixed and must stay in sync with the UI legend:
//!
//! ```text
//! score <= 4   very-low
//! score <= 6   low
//! score <= 12  medium
//! score <= 16  high
//! otherwise    very-high
//! ```

use crate::domain::value_objects::RiskLevel;

/// Default overall level for an assessment with no risks
pub const EMPTY_OVERALL_LEVEL: RiskLevel = RiskLevel::Low;

/// Product of the likelihood and impact weights, range 1..=25
pub fn risk_score(likelihood: RiskLevel, impact: RiskLevel) -> u8 {
    likelihood.weight() * impact.weight()
}

/// Bucket a score back into a discrete level
pub fn level_from_score(score: u8) -> RiskLevel {
    match score {
        0..=4 => RiskLevel::VeryLow,
        5..=6 => RiskLevel::Low,
        7..=12 => RiskLevel::Medium,
        13..=16 => RiskLevel::High,
        _ => RiskLevel::VeryHigh,
    }
}

/// Overall level for a set of risk scores: the level of the *maximum*
/// score, never an average. The worst single risk determines the
/// assessment's overall level. Empty input defaults to `low`.
pub fn overall_level<I>(scores: I) -> RiskLevel
where
    I: IntoIterator<Item = u8>,
{
    scores
        .into_iter()
        .max()
        .map(level_from_score)
        .unwrap_or(EMPTY_OVERALL_LEVEL)
}
