//! Terminal pipeline verdict for one paper

use papersift_domain::{Confidence, FilterResult, Paper};
use serde::Serialize;

/// Stage attribution for papers that passed every stage
pub const STAGE_COMPLETE: &str = "complete";

/// Final decision for one paper
///
/// Serializes as the paper's own fields plus `filter_reason`,
/// `filter_confidence` and `filter_stage`. `is_relevant` is not written;
/// it is implied by `filter_stage == "complete"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    /// The paper the verdict is about
    #[serde(flatten)]
    pub paper: Paper,

    /// Whether the paper is kept
    #[serde(skip)]
    pub is_relevant: bool,

    /// Reason from the deciding stage
    #[serde(rename = "filter_reason")]
    pub reason: String,

    /// Confidence from the deciding stage
    #[serde(rename = "filter_confidence")]
    pub confidence: Confidence,

    /// Name of the rejecting stage, or [`STAGE_COMPLETE`]
    #[serde(rename = "filter_stage")]
    pub stage: String,
}

impl PipelineResult {
    /// Attribute a stage verdict to a paper
    pub(crate) fn from_verdict(paper: &Paper, verdict: FilterResult, stage: &str) -> Self {
        Self {
            paper: paper.clone(),
            is_relevant: verdict.is_relevant,
            reason: verdict.reason,
            confidence: verdict.confidence,
            stage: stage.to_string(),
        }
    }

    /// Whether the paper passed every stage
    pub fn is_complete(&self) -> bool {
        self.stage == STAGE_COMPLETE
    }

    /// Kept, but only on weak evidence; route to a human
    pub fn needs_review(&self) -> bool {
        self.is_relevant && self.confidence == Confidence::Low
    }
}
