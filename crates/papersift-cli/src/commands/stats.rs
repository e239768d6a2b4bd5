//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::output::Formatter;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Summary of a paper collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    /// Papers in the file
    pub total: usize,

    /// `updated` field of the file
    pub updated: Option<String>,

    /// Papers with a usable abstract
    pub with_abstract: usize,

    /// Most recent years first, at most ten
    pub by_year: Vec<(i32, usize)>,

    /// Most common venues first, at most ten
    pub top_venues: Vec<(String, usize)>,
}

impl CollectionStats {
    /// Compute statistics for a corpus
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
        let mut by_venue: HashMap<&str, usize> = HashMap::new();
        for paper in &corpus.papers {
            if paper.year != 0 {
                *by_year.entry(paper.year).or_insert(0) += 1;
            }
            if !paper.venue.is_empty() {
                *by_venue.entry(paper.venue.as_str()).or_insert(0) += 1;
            }
        }

        let mut top_venues: Vec<(String, usize)> = by_venue
            .into_iter()
            .map(|(venue, count)| (venue.to_string(), count))
            .collect();
        top_venues.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_venues.truncate(10);

        Self {
            total: corpus.papers.len(),
            updated: corpus.updated.clone(),
            with_abstract: corpus.papers.iter().filter(|p| p.has_abstract()).count(),
            by_year: by_year.into_iter().rev().take(10).collect(),
            top_venues,
        }
    }

    /// Papers without a usable abstract
    pub fn without_abstract(&self) -> usize {
        self.total - self.with_abstract
    }
}

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, formatter: &Formatter) -> Result<()> {
    let corpus = Corpus::load(&args.input)?;
    if let Some(report) = formatter.skipped(&corpus.malformed, &[]) {
        eprintln!("{}", report);
    }
    let stats = CollectionStats::from_corpus(&corpus);
    println!("{}", formatter.collection_stats(&stats)?);
    Ok(())
}
