//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::output::Formatter;
use papersift_pipeline::{FilterPipeline, FilterStats, PipelineResult};
use serde::Serialize;
use std::collections::HashMap;

/// One exclusion reason with example papers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonDetail {
    /// Rejection reason
    pub reason: String,

    /// Papers rejected for it
    pub count: usize,

    /// First few rejected papers, in input order
    pub examples: Vec<Example>,
}

/// A paper cited as an example of a rejection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    /// Paper title
    pub title: String,

    /// Publication year
    pub year: i32,
}

/// Group rejected results by reason, most frequent first
pub fn exclusion_details(results: &[PipelineResult], top: usize, examples: usize) -> Vec<ReasonDetail> {
    let mut by_reason: HashMap<&str, Vec<&PipelineResult>> = HashMap::new();
    for result in results.iter().filter(|r| !r.is_relevant) {
        by_reason.entry(result.reason.as_str()).or_default().push(result);
    }

    let mut details: Vec<ReasonDetail> = by_reason
        .into_iter()
        .map(|(reason, rejected)| ReasonDetail {
            reason: reason.to_string(),
            count: rejected.len(),
            examples: rejected
                .iter()
                .take(examples)
                .map(|r| Example {
                    title: r.paper.title.clone(),
                    year: r.paper.year,
                })
                .collect(),
        })
        .collect();
    details.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.reason.cmp(&b.reason)));
    details.truncate(top);
    details
}

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let domain = config.domain(args.config.as_deref())?;
    let corpus = Corpus::load(&args.input)?;
    eprintln!("{}", formatter.info(&format!("Analyzing {} papers...", corpus.papers.len())));

    let pipeline = FilterPipeline::new(domain)?;
    let outcome = pipeline.process_guarded(&corpus.papers, None);
    if let Some(report) = formatter.skipped(&corpus.malformed, &outcome.skipped) {
        eprintln!("{}", report);
    }

    let stats = FilterStats::from_results(&outcome.results);
    println!("{}", formatter.filter_stats(&stats)?);

    let details = exclusion_details(&outcome.results, args.top, args.examples);
    println!("{}", formatter.exclusion_details(&details)?);
    Ok(())
}
