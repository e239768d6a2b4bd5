//! papersift Domain Layer
//!
//! This crate contains the core value types shared by every other crate in the
//! workspace. It knows nothing about configuration, I/O or concurrency.
//!
//! ## Key Concepts
//!
//! - **Paper**: Immutable snapshot of one paper's bibliographic metadata
//! - **Confidence**: Ordinal triage signal (`Low < Medium < High`), not a probability
//! - **FilterResult**: The verdict of one filter stage, always with a reason
//! - **PaperFilter**: The single-method capability every filter stage implements
//! - **RunId**: Identifier stamped on a batch run and its outputs
//!
//! ## Architecture
//!
//! - Pure value types and trait definitions only
//! - Filter implementations live in `papersift-filters`
//! - Orchestration lives in `papersift-pipeline`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod paper;
pub mod run;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use confidence::Confidence;
pub use paper::Paper;
pub use run::RunId;
pub use traits::PaperFilter;
pub use verdict::FilterResult;
