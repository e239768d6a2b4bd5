//! Filter command implementation.

use crate::cli::FilterArgs;
use crate::config::Config;
use crate::corpus::{Corpus, OutputPaths, ResultsFile};
use crate::error::Result;
use crate::output::Formatter;
use papersift_domain::{Paper, RunId};
use papersift_pipeline::{BatchOutcome, BatchWorker, FilterPipeline, FilterStats, PipelineResult};
use std::sync::Arc;
use tracing::Instrument;

const PROGRESS_EVERY: usize = 100;
const SAMPLE_LIMIT: usize = 10;

/// Execute the filter command.
pub async fn execute_filter(args: FilterArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let domain = config.domain(args.config.as_deref())?;
    let note = format!(
        "Filtered to include only papers primarily about {}",
        domain.domain_display()
    );

    let corpus = Corpus::load(&args.input)?;
    eprintln!(
        "{}",
        formatter.info(&format!(
            "Loaded {} papers from {}",
            corpus.papers.len(),
            args.input.display()
        ))
    );

    let pipeline = Arc::new(FilterPipeline::new(domain)?);
    let jobs = args.jobs.unwrap_or(config.settings.jobs).max(1);
    let run_id = RunId::new();
    let span = tracing::info_span!("filter_run", run_id = %run_id, jobs);

    let outcome = run_batch(pipeline, corpus.papers.clone(), jobs)
        .instrument(span)
        .await?;

    let stats = FilterStats::from_results(&outcome.results);
    println!("{}", formatter.filter_stats(&stats)?);
    if let Some(report) = formatter.skipped(&corpus.malformed, &outcome.skipped) {
        eprintln!("{}", report);
    }

    let run_id = run_id.to_string();
    let paths = OutputPaths::from_output(&args.output);
    if let Some(parent) = paths.filtered.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let kept: Vec<Paper> = outcome
        .results
        .iter()
        .filter(|r| r.is_relevant)
        .map(|r| r.paper.clone())
        .collect();
    let kept_count = kept.len();
    let mut filtered = Corpus::derived(&corpus, kept);
    filtered.note = Some(note);
    filtered.run_id = Some(run_id.clone());
    filtered.save(&paths.filtered)?;
    eprintln!(
        "{}",
        formatter.success(&format!(
            "Saved {} relevant papers to {}",
            kept_count,
            paths.filtered.display()
        ))
    );

    let excluded: Vec<&PipelineResult> = outcome.results.iter().filter(|r| !r.is_relevant).collect();
    ResultsFile::new(&run_id, excluded.clone()).save(&paths.excluded)?;
    eprintln!(
        "{}",
        formatter.success(&format!(
            "Saved {} excluded papers to {}",
            excluded.len(),
            paths.excluded.display()
        ))
    );

    let review: Vec<&PipelineResult> = outcome.results.iter().filter(|r| r.needs_review()).collect();
    if !review.is_empty() {
        let count = review.len();
        ResultsFile::new(&run_id, review).save(&paths.needs_review)?;
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} papers need manual review: {}",
                count,
                paths.needs_review.display()
            ))
        );
    }

    if args.show_samples && !excluded.is_empty() {
        println!("{}", formatter.samples("Sample excluded papers", &excluded, SAMPLE_LIMIT));
    }

    Ok(())
}

async fn run_batch(pipeline: Arc<FilterPipeline>, papers: Vec<Paper>, jobs: usize) -> Result<BatchOutcome> {
    if jobs == 1 {
        let mut report = |done: usize, total: usize| {
            if done % PROGRESS_EVERY == 0 || done == total {
                eprint!("\r  Processed {}/{} papers", done, total);
                if done == total {
                    eprintln!();
                }
            }
        };
        return Ok(pipeline.process_guarded(&papers, Some(&mut report)));
    }

    let worker = BatchWorker::new(pipeline, jobs);
    let outcome = worker
        .run(papers, |done, total| {
            eprint!("\r  Processed {}/{} papers", done, total);
            if done == total {
                eprintln!();
            }
        })
        .await?;
    Ok(outcome)
}
