//! Confidence levels attached to filter verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal confidence of a filtering decision
///
/// This is a triage signal, not a calibrated probability:
/// - High: safe to act on automatically
/// - Medium: substantive but ambiguous evidence
/// - Low: missing evidence, route to manual review
///
/// Variants are declared in ascending order so `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Missing evidence
    Low,

    /// Ambiguous evidence
    Medium,

    /// Strong signal in either direction
    High,
}

impl Confidence {
    /// All levels, highest first (report ordering)
    pub const ALL: [Confidence; 3] = [Confidence::High, Confidence::Medium, Confidence::Low];

    /// Get the level name as it appears in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    /// Parse a level from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence level: {}", s))
    }
}
