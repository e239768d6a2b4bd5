//! Aggregate statistics over a batch of pipeline results

use crate::PipelineResult;
use papersift_domain::Confidence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts per confidence level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceCounts {
    /// High confidence
    pub high: usize,
    /// Medium confidence
    pub medium: usize,
    /// Low confidence
    pub low: usize,
}

impl ConfidenceCounts {
    fn record(&mut self, confidence: Confidence) {
        match confidence {
            Confidence::High => self.high += 1,
            Confidence::Medium => self.medium += 1,
            Confidence::Low => self.low += 1,
        }
    }

    /// Count for one level
    pub fn get(&self, confidence: Confidence) -> usize {
        match confidence {
            Confidence::High => self.high,
            Confidence::Medium => self.medium,
            Confidence::Low => self.low,
        }
    }
}

/// Summary counts for a filtered batch
///
/// A pure reduction over [`PipelineResult`]s; serializes to the shape the
/// reporting tools read (`relevant_by_confidence`, `by_stage`,
/// `exclusion_reasons`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Papers processed
    pub total: usize,

    /// Papers kept
    pub relevant: usize,

    /// Papers rejected
    pub excluded: usize,

    /// Kept papers by confidence
    pub relevant_by_confidence: ConfidenceCounts,

    /// Rejected papers by confidence
    pub excluded_by_confidence: ConfidenceCounts,

    /// Papers per deciding stage (including `complete`)
    pub by_stage: BTreeMap<String, usize>,

    /// Rejection reason frequencies
    pub exclusion_reasons: BTreeMap<String, usize>,
}

impl FilterStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce a batch of results
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a PipelineResult>,
    {
        let mut stats = Self::new();
        for result in results {
            stats.record(result);
        }
        stats
    }

    /// Fold one more result into the counts
    pub fn record(&mut self, result: &PipelineResult) {
        self.total += 1;
        *self.by_stage.entry(result.stage.clone()).or_insert(0) += 1;

        if result.is_relevant {
            self.relevant += 1;
            self.relevant_by_confidence.record(result.confidence);
        } else {
            self.excluded += 1;
            self.excluded_by_confidence.record(result.confidence);
            *self
                .exclusion_reasons
                .entry(result.reason.clone())
                .or_insert(0) += 1;
        }
    }

    /// Most frequent rejection reasons, ties broken alphabetically
    pub fn top_reasons(&self, n: usize) -> Vec<(&str, usize)> {
        let mut reasons: Vec<(&str, usize)> = self
            .exclusion_reasons
            .iter()
            .map(|(reason, count)| (reason.as_str(), *count))
            .collect();
        reasons.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        reasons.truncate(n);
        reasons
    }

    /// Share of `count` in the batch, in percent
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Generate a printable report
    pub fn summary(&self) -> String {
        let rule = "=".repeat(60);
        let mut lines = vec![
            rule.clone(),
            "FILTERING STATISTICS".to_string(),
            rule.clone(),
            format!("Total papers: {}", self.total),
            String::new(),
            format!(
                "Relevant (keep): {} ({:.1}%)",
                self.relevant,
                self.percent(self.relevant)
            ),
        ];
        for confidence in Confidence::ALL {
            lines.push(format!(
                "  - {} confidence: {}",
                confidence,
                self.relevant_by_confidence.get(confidence)
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Excluded (remove): {} ({:.1}%)",
            self.excluded,
            self.percent(self.excluded)
        ));
        for confidence in Confidence::ALL {
            lines.push(format!(
                "  - {} confidence: {}",
                confidence,
                self.excluded_by_confidence.get(confidence)
            ));
        }

        if !self.by_stage.is_empty() {
            lines.push(String::new());
            lines.push("Decided at stage:".to_string());
            for (stage, count) in &self.by_stage {
                lines.push(format!("  {}: {}", stage, count));
            }
        }

        if !self.exclusion_reasons.is_empty() {
            lines.push(String::new());
            lines.push(rule.clone());
            lines.push("TOP EXCLUSION REASONS".to_string());
            lines.push(rule);
            for (reason, count) in self.top_reasons(10) {
                lines.push(format!("{:4} - {}", count, reason));
            }
        }

        lines.join("\n")
    }
}
