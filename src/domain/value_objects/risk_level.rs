//! RiskLevel value object - the 5-point qualitative scale
//!
//! Used for both likelihood and impact on risks and threats, and for
//! asset criticality. The ordering of the variants is the ordering of
//! the scale: `very-low < low < medium < high < very-high`.

use serde::{Deserialize, Serialize};

/// Qualitative 5-point scale with integer weights 1..=5
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    VeryLow,
    #[default]
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// All levels in ascending order
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryLow,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    /// Integer weight used by the scoring model (1..=5)
    pub fn weight(&self) -> u8 {
        match self {
            RiskLevel::VeryLow => 1,
            RiskLevel::Low => 2,
            RiskLevel::Medium => 3,
            RiskLevel::High => 4,
            RiskLevel::VeryHigh => 5,
        }
    }

    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "very-low",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very-high",
        }
    }

    /// Parse a wire name; `None` for anything outside the scale
    pub fn parse(value: &str) -> Option<RiskLevel> {
        match value {
            "very-low" => Some(RiskLevel::VeryLow),
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            "very-high" => Some(RiskLevel::VeryHigh),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
