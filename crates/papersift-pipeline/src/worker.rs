//! Parallel batch worker

use crate::{BatchOutcome, FilterPipeline, PipelineError};
use papersift_domain::Paper;
use std::sync::Arc;

/// Runs a batch across blocking tokio tasks
///
/// Papers are split into contiguous chunks, each filtered on its own
/// `spawn_blocking` task with the guarded batch loop. Results come back in
/// input order regardless of which chunk finishes first.
///
/// # Examples
///
/// ```no_run
/// use papersift_filters::DomainConfig;
/// use papersift_pipeline::{BatchWorker, FilterPipeline};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = FilterPipeline::new(Arc::new(DomainConfig::default()))?;
///     let worker = BatchWorker::new(Arc::new(pipeline), 4);
///
///     let outcome = worker.run(Vec::new(), |done, total| {
///         println!("{}/{}", done, total);
///     }).await?;
///     println!("{} results", outcome.results.len());
///     Ok(())
/// }
/// ```
pub struct BatchWorker {
    pipeline: Arc<FilterPipeline>,
    jobs: usize,
}

impl BatchWorker {
    /// Create a worker using up to `jobs` blocking tasks (at least one)
    pub fn new(pipeline: Arc<FilterPipeline>, jobs: usize) -> Self {
        Self {
            pipeline,
            jobs: jobs.max(1),
        }
    }

    /// Number of blocking tasks a batch is split across
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Filter a batch, calling `progress(done, total)` as each chunk lands
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Worker`] if a task could not be joined.
    pub async fn run<P>(&self, papers: Vec<Paper>, mut progress: P) -> Result<BatchOutcome, PipelineError>
    where
        P: FnMut(usize, usize),
    {
        let total = papers.len();
        let chunk_size = total.div_ceil(self.jobs).max(1);

        tracing::info!(total, jobs = self.jobs, chunk_size, "Batch worker started");

        let mut handles = Vec::new();
        let mut remaining = papers;
        while !remaining.is_empty() {
            let rest = remaining.split_off(chunk_size.min(remaining.len()));
            let chunk = std::mem::replace(&mut remaining, rest);
            let pipeline = Arc::clone(&self.pipeline);
            handles.push(tokio::task::spawn_blocking(move || {
                pipeline.process_guarded(&chunk, None)
            }));
        }

        let mut outcome = BatchOutcome::default();
        let mut done = 0;
        for handle in handles {
            let chunk = handle
                .await
                .map_err(|e| PipelineError::Worker(e.to_string()))?;
            done += chunk.results.len() + chunk.skipped.len();
            outcome.extend(chunk);
            progress(done, total);
        }

        tracing::info!(
            total,
            processed = outcome.results.len(),
            skipped = outcome.skipped.len(),
            "Batch worker finished"
        );
        Ok(outcome)
    }
}
