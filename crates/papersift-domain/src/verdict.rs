//! Filter verdicts

use crate::Confidence;
use serde::{Deserialize, Serialize};

/// Verdict of a single filter stage
///
/// A plain struct with an explicit `is_relevant` field. There is deliberately
/// no conversion to `bool`; callers read the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Whether the paper passes this stage
    pub is_relevant: bool,

    /// Specific, human-readable justification (never empty)
    pub reason: String,

    /// Triage confidence of the decision
    pub confidence: Confidence,
}

impl FilterResult {
    /// Create a verdict
    pub fn new(is_relevant: bool, reason: impl Into<String>, confidence: Confidence) -> Self {
        let reason = reason.into();
        debug_assert!(!reason.is_empty(), "filter verdicts must carry a reason");
        Self {
            is_relevant,
            reason,
            confidence,
        }
    }

    /// A passing verdict
    pub fn relevant(reason: impl Into<String>, confidence: Confidence) -> Self {
        Self::new(true, reason, confidence)
    }

    /// A rejecting verdict
    pub fn rejected(reason: impl Into<String>, confidence: Confidence) -> Self {
        Self::new(false, reason, confidence)
    }
}
