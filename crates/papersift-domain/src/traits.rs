//! Trait definitions for filter stages
//!
//! Filters are composed by the pipeline (an ordered list of named stages);
//! there is no filter hierarchy.

use crate::{FilterResult, Paper};

/// A single relevance-filtering stage
///
/// Implementations must be total over well-formed papers: every call returns a
/// verdict, missing evidence is expressed as a `Low` confidence verdict rather
/// than an error. Filters read only the paper and their own immutable
/// configuration, which is what makes batches safe to split across threads.
///
/// Implemented by `papersift-filters` and by any custom stage appended to a
/// pipeline.
pub trait PaperFilter: Send + Sync {
    /// Decide whether the paper passes this stage
    fn filter(&self, paper: &Paper) -> FilterResult;
}

impl<F> PaperFilter for F
where
    F: Fn(&Paper) -> FilterResult + Send + Sync,
{
    fn filter(&self, paper: &Paper) -> FilterResult {
        self(paper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Confidence;

    #[test]
    fn test_closure_is_a_filter() {
        let min_year = |paper: &Paper| {
            if paper.year >= 2016 {
                FilterResult::relevant("Recent enough", Confidence::High)
            } else {
                FilterResult::rejected("Published before 2016", Confidence::High)
            }
        };

        let mut paper = Paper::new("1", "Old", None);
        paper.year = 2010;
        assert!(!min_year.filter(&paper).is_relevant);

        paper.year = 2020;
        assert!(min_year.filter(&paper).is_relevant);
    }
}
