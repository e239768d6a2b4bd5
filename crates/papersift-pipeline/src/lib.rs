//! Papersift Pipeline
//!
//! Composes the relevance filters into a single verdict per paper.
//!
//! # Overview
//!
//! The pipeline is responsible for:
//! - **Stage sequencing**: exclusion, relevance, topic, then any custom stages
//! - **Early exit**: the first rejecting stage decides, later stages never run
//! - **Attribution**: every result names the stage that decided it
//! - **Batch boundary**: a paper that panics is logged and skipped
//! - **Statistics**: [`FilterStats`] reduces a batch for reporting
//!
//! # Usage
//!
//! ## Sequential
//!
//! ```
//! use papersift_domain::Paper;
//! use papersift_filters::DomainConfig;
//! use papersift_pipeline::{FilterPipeline, FilterStats};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = FilterPipeline::new(Arc::new(DomainConfig::default()))?;
//!
//! let papers = vec![
//!     Paper::new("W1", "Knockoff Nets", Some("We steal the model with few queries.")),
//!     Paper::new("W2", "Untitled", None),
//! ];
//! let results = pipeline.process_batch(&papers, None);
//!
//! assert_eq!(results[0].stage, "complete");
//! assert_eq!(results[1].stage, "relevance");
//!
//! let stats = FilterStats::from_results(&results);
//! println!("{}", stats.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Parallel
//!
//! ```no_run
//! use papersift_filters::DomainConfig;
//! use papersift_pipeline::{BatchWorker, FilterPipeline};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Arc::new(FilterPipeline::new(Arc::new(DomainConfig::default()))?);
//!     let worker = BatchWorker::new(pipeline, 8);
//!     let outcome = worker.run(Vec::new(), |_, _| {}).await?;
//!     println!("skipped: {:?}", outcome.skipped);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod pipeline;
mod result;
mod stats;
mod worker;

pub use error::PipelineError;
pub use pipeline::{BatchOutcome, FilterPipeline, STAGE_EXCLUSION, STAGE_RELEVANCE, STAGE_TOPIC};
pub use result::{PipelineResult, STAGE_COMPLETE};
pub use stats::{ConfidenceCounts, FilterStats};
pub use worker::BatchWorker;
