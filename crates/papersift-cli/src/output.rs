//! Output formatting for the CLI.

use crate::commands::analyze::ReasonDetail;
use crate::commands::stats::CollectionStats;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use papersift_domain::Confidence;
use papersift_pipeline::{FilterStats, PipelineResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format filtering statistics.
    pub fn filter_stats(&self, stats: &FilterStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(stats.to_json()?),
            OutputFormat::Table => Ok(self.filter_stats_table(stats)),
        }
    }

    fn filter_stats_table(&self, stats: &FilterStats) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Verdict", "Total", "Share", "High", "Medium", "Low"]);
        for (label, count, by_confidence) in [
            ("Relevant", stats.relevant, &stats.relevant_by_confidence),
            ("Excluded", stats.excluded, &stats.excluded_by_confidence),
        ] {
            let mut row = vec![
                label.to_string(),
                count.to_string(),
                format!("{:.1}%", stats.percent(count)),
            ];
            row.extend(Confidence::ALL.iter().map(|c| by_confidence.get(*c).to_string()));
            builder.push_record(row);
        }

        let mut sections = vec![
            self.header(&format!("Filtered {} papers", stats.total)),
            styled(builder),
        ];

        if !stats.by_stage.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Stage", "Papers"]);
            for (stage, count) in &stats.by_stage {
                builder.push_record([stage.clone(), count.to_string()]);
            }
            sections.push(styled(builder));
        }

        let reasons = stats.top_reasons(10);
        if !reasons.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Count", "Exclusion reason"]);
            for (reason, count) in reasons {
                builder.push_record([count.to_string(), reason.to_string()]);
            }
            sections.push(self.header("Top exclusion reasons"));
            sections.push(styled(builder));
        }

        sections.join("\n")
    }

    /// Format collection statistics.
    pub fn collection_stats(&self, stats: &CollectionStats) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(stats)?);
        }

        let mut lines = vec![
            self.header("Collection statistics"),
            format!("Total papers: {}", stats.total),
            format!("Last updated: {}", stats.updated.as_deref().unwrap_or("Unknown")),
            format!(
                "With abstract: {} ({:.1}%)",
                stats.with_abstract,
                share(stats.with_abstract, stats.total)
            ),
            format!(
                "Without abstract: {} ({:.1}%)",
                stats.without_abstract(),
                share(stats.without_abstract(), stats.total)
            ),
        ];

        if !stats.by_year.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Year", "Papers"]);
            for (year, count) in &stats.by_year {
                builder.push_record([year.to_string(), count.to_string()]);
            }
            lines.push(styled(builder));
        }

        if !stats.top_venues.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Papers", "Venue"]);
            for (venue, count) in &stats.top_venues {
                builder.push_record([count.to_string(), venue.clone()]);
            }
            lines.push(styled(builder));
        }

        Ok(lines.join("\n"))
    }

    /// Format the detailed exclusion analysis.
    pub fn exclusion_details(&self, details: &[ReasonDetail]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(details)?);
        }
        if details.is_empty() {
            return Ok(self.colorize("No papers were excluded.", "yellow"));
        }

        let mut lines = vec![self.header("Detailed exclusion analysis")];
        for detail in details {
            lines.push(String::new());
            lines.push(self.colorize(
                &format!("{} ({} papers):", detail.reason, detail.count),
                "cyan",
            ));
            for (i, example) in detail.examples.iter().enumerate() {
                lines.push(format!("  {}. {} ({})", i + 1, example.title, example.year));
            }
        }
        Ok(lines.join("\n"))
    }

    /// Format a sample of results for manual inspection.
    pub fn samples(&self, title: &str, results: &[&PipelineResult], max: usize) -> String {
        let mut lines = vec![String::new(), self.header(title)];

        for (i, result) in results.iter().take(max).enumerate() {
            let paper = &result.paper;
            lines.push(String::new());
            lines.push(format!("{}. {} ({})", i + 1, paper.title, paper.year));
            lines.push(format!("   Venue: {}", paper.venue));
            let keywords: Vec<&str> = paper
                .keywords_matched
                .iter()
                .take(5)
                .map(String::as_str)
                .collect();
            lines.push(format!("   Keywords matched: {}", keywords.join(", ")));
            lines.push(format!(
                "   Reason: {} [{}, {}]",
                result.reason, result.stage, result.confidence
            ));
            if let Some(sentence) = first_sentence(paper.abstract_text.as_deref()) {
                lines.push(format!("   Abstract: {}...", sentence));
            }
        }

        if results.len() > max {
            lines.push(format!("\n   ... and {} more", results.len() - max));
        }
        lines.join("\n")
    }

    /// Warnings for records left out of a run, if any
    ///
    /// `malformed` are records the corpus file could not decode; `failed`
    /// are papers whose processing panicked.
    pub fn skipped(&self, malformed: &[String], failed: &[String]) -> Option<String> {
        let mut lines = Vec::new();
        if !malformed.is_empty() {
            lines.push(self.warning(&format!(
                "Skipped {} malformed paper records: {}",
                malformed.len(),
                malformed.join(", ")
            )));
        }
        if !failed.is_empty() {
            lines.push(self.warning(&format!(
                "Skipped {} papers that could not be processed: {}",
                failed.len(),
                failed.join(", ")
            )));
        }
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn header(&self, title: &str) -> String {
        self.colorize(&title.to_uppercase(), "magenta")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// First sentence of an abstract, at most 150 characters
fn first_sentence(abstract_text: Option<&str>) -> Option<String> {
    let text = abstract_text?.trim();
    if text.is_empty() {
        return None;
    }
    let sentence = text.split('.').next().unwrap_or(text);
    Some(sentence.chars().take(150).collect())
}
