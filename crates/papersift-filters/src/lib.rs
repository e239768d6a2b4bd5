//! Papersift Filters
//!
//! Rule-based relevance filters for research papers.
//!
//! The filters provide:
//! - Exclusion of lexical false positives (wrong domain, citation-only hits)
//! - Relevance checks for domain terminology and its context
//! - Primary-topic checks against competing topics
//!
//! Every term list and threshold comes from an injected [`DomainConfig`].
//!
//! # Examples
//!
//! ```
//! use papersift_domain::{Paper, PaperFilter};
//! use papersift_filters::{DomainConfig, ExclusionFilter};
//! use std::sync::Arc;
//!
//! let config = Arc::new(DomainConfig::default());
//! let exclusion = ExclusionFilter::new(config);
//!
//! let paper = Paper::new("W1", "Some Paper", None).with_keywords(["(via citation)"]);
//! let verdict = exclusion.filter(&paper);
//! assert!(!verdict.is_relevant);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod exclusion;
mod relevance;
mod text;
mod topic;

pub use config::{DomainConfig, TermGroup, Thresholds};
pub use error::ConfigError;
pub use exclusion::{ExclusionFilter, CITATION_ONLY_REASON};
pub use relevance::RelevanceFilter;
pub use topic::TopicFilter;
