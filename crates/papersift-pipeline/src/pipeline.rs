//! Sequential filter pipeline with early exit and stage attribution

use crate::{PipelineError, PipelineResult, STAGE_COMPLETE};
use papersift_domain::{Confidence, FilterResult, Paper, PaperFilter};
use papersift_filters::{DomainConfig, ExclusionFilter, RelevanceFilter, TopicFilter};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the exclusion stage
pub const STAGE_EXCLUSION: &str = "exclusion";
/// Name of the relevance stage
pub const STAGE_RELEVANCE: &str = "relevance";
/// Name of the topic stage
pub const STAGE_TOPIC: &str = "topic";

struct Stage {
    name: String,
    filter: Box<dyn PaperFilter>,
}

/// Papers a guarded batch managed to process, plus the ones it skipped
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Results in input order, skipped papers omitted
    pub results: Vec<PipelineResult>,

    /// Identifiers of papers whose processing panicked
    pub skipped: Vec<String>,
}

impl BatchOutcome {
    pub(crate) fn extend(&mut self, other: BatchOutcome) {
        self.results.extend(other.results);
        self.skipped.extend(other.skipped);
    }
}

/// Runs papers through an ordered list of named filters
///
/// The first negative verdict ends processing and names the stage that made
/// it. A paper that passes every stage is attributed to [`STAGE_COMPLETE`]
/// and carries the verdict the last stage already returned.
///
/// # Examples
///
/// ```
/// use papersift_domain::{Confidence, FilterResult, Paper};
/// use papersift_filters::DomainConfig;
/// use papersift_pipeline::FilterPipeline;
/// use std::sync::Arc;
///
/// let mut pipeline = FilterPipeline::new(Arc::new(DomainConfig::default())).unwrap();
/// pipeline
///     .add_filter("recent", |paper: &Paper| {
///         if paper.year >= 2016 {
///             FilterResult::relevant("Recent enough", Confidence::High)
///         } else {
///             FilterResult::rejected("Too old", Confidence::High)
///         }
///     })
///     .unwrap();
///
/// let paper = Paper::new("W1", "Untitled", None);
/// let result = pipeline.process(&paper);
/// assert_eq!(result.stage, "relevance");
/// ```
pub struct FilterPipeline {
    stages: Vec<Stage>,
}

impl FilterPipeline {
    /// Create a pipeline with the exclusion, relevance and topic stages
    pub fn new(config: Arc<DomainConfig>) -> Result<Self, PipelineError> {
        let relevance = RelevanceFilter::new(Arc::clone(&config))?;
        let mut pipeline = Self::empty();
        pipeline.add_filter(STAGE_EXCLUSION, ExclusionFilter::new(Arc::clone(&config)))?;
        pipeline.add_filter(STAGE_RELEVANCE, relevance)?;
        pipeline.add_filter(STAGE_TOPIC, TopicFilter::new(config))?;
        Ok(pipeline)
    }

    /// Create a pipeline with no stages
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a named stage after the existing ones
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidStage`] for an empty name or the reserved
    /// name `"complete"`; [`PipelineError::DuplicateStage`] if the name is
    /// already taken.
    pub fn add_filter<F>(&mut self, name: impl Into<String>, filter: F) -> Result<(), PipelineError>
    where
        F: PaperFilter + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() || name == STAGE_COMPLETE {
            return Err(PipelineError::InvalidStage(name));
        }
        if self.stages.iter().any(|stage| stage.name == name) {
            return Err(PipelineError::DuplicateStage(name));
        }
        self.stages.push(Stage {
            name,
            filter: Box::new(filter),
        });
        Ok(())
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name.as_str()).collect()
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run one paper through the stages
    pub fn process(&self, paper: &Paper) -> PipelineResult {
        let mut last = None;
        for stage in &self.stages {
            let verdict = stage.filter.filter(paper);
            if !verdict.is_relevant {
                debug!(paper_id = %paper.paper_id, stage = %stage.name, "paper rejected");
                return PipelineResult::from_verdict(paper, verdict, &stage.name);
            }
            last = Some(verdict);
        }

        let verdict = last.unwrap_or_else(|| {
            FilterResult::relevant("No filters configured", Confidence::Low)
        });
        PipelineResult::from_verdict(paper, verdict, STAGE_COMPLETE)
    }

    /// Run papers in order, reporting `(done, total)` after each one
    pub fn process_batch(
        &self,
        papers: &[Paper],
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Vec<PipelineResult> {
        let total = papers.len();
        info!(total, stages = self.stages.len(), "Processing batch");

        let mut results = Vec::with_capacity(total);
        for (i, paper) in papers.iter().enumerate() {
            results.push(self.process(paper));
            if let Some(callback) = progress.as_deref_mut() {
                callback(i + 1, total);
            }
        }

        let relevant = results.iter().filter(|r| r.is_relevant).count();
        info!(total, relevant, "Batch complete");
        results
    }

    /// Like [`FilterPipeline::process_batch`], but a paper whose processing
    /// panics is logged and skipped instead of aborting the batch
    pub fn process_guarded(
        &self,
        papers: &[Paper],
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> BatchOutcome {
        let total = papers.len();
        let mut outcome = BatchOutcome {
            results: Vec::with_capacity(total),
            skipped: Vec::new(),
        };

        for (i, paper) in papers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| self.process(paper))) {
                Ok(result) => outcome.results.push(result),
                Err(payload) => {
                    warn!(
                        paper_id = %paper.paper_id,
                        error = %panic_message(payload.as_ref()),
                        "Skipping paper: processing panicked"
                    );
                    outcome.skipped.push(paper.paper_id.clone());
                }
            }
            if let Some(callback) = progress.as_deref_mut() {
                callback(i + 1, total);
            }
        }

        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
