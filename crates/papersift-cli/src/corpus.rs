//! Corpus files: the JSON documents papers are read from and written to.

use crate::error::{CliError, Result};
use papersift_domain::Paper;
use papersift_pipeline::PipelineResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A paper collection with its provenance metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// Date the file was written (`%Y-%m-%d`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Paper count as recorded in the file
    #[serde(default)]
    pub total: usize,

    /// Search keywords the corpus was built from
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Seed paper identifiers
    #[serde(default)]
    pub seed_papers: Vec<String>,

    /// Free-form note about the contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Filter run that produced this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    /// The papers
    #[serde(default)]
    pub papers: Vec<Paper>,

    /// Records that could not be read as papers, by `paper_id` or `#index`
    #[serde(skip)]
    pub malformed: Vec<String>,
}

impl Corpus {
    /// Read a corpus file
    ///
    /// Paper records are decoded one at a time. A record with an unexpected
    /// shape is logged, listed in [`Corpus::malformed`] and left out; only a
    /// file that is not a corpus document at all is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut document: Map<String, Value> = serde_json::from_str(&contents)?;
        let records = match document.remove("papers") {
            Some(Value::Array(records)) => records,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(CliError::InvalidInput(format!(
                    "{}: `papers` must be an array",
                    path.display()
                )))
            }
        };

        let mut corpus: Corpus = serde_json::from_value(Value::Object(document))?;
        corpus.papers.reserve(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let label = record_label(&record, index);
            match serde_json::from_value::<Paper>(record) {
                Ok(paper) => corpus.papers.push(paper),
                Err(e) => {
                    warn!(paper = %label, error = %e, "Skipping malformed paper record");
                    corpus.malformed.push(label);
                }
            }
        }
        Ok(corpus)
    }

    /// A new corpus carrying over `source`'s keywords and seed papers
    pub fn derived(source: &Corpus, papers: Vec<Paper>) -> Self {
        Self {
            updated: Some(today()),
            total: papers.len(),
            keywords: source.keywords.clone(),
            seed_papers: source.seed_papers.clone(),
            note: None,
            run_id: None,
            papers,
            malformed: Vec::new(),
        }
    }

    /// Write the corpus as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Filter verdicts written alongside a filtered corpus
#[derive(Debug, Serialize)]
pub struct ResultsFile<'a> {
    /// Date the file was written
    pub updated: String,

    /// Number of results
    pub total: usize,

    /// Filter run that produced the results
    pub run_id: &'a str,

    /// Papers with their `filter_*` fields
    pub papers: Vec<&'a PipelineResult>,
}

impl<'a> ResultsFile<'a> {
    /// Collect results for writing
    pub fn new(run_id: &'a str, papers: Vec<&'a PipelineResult>) -> Self {
        Self {
            updated: today(),
            total: papers.len(),
            run_id,
            papers,
        }
    }

    /// Write the results as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Output locations derived from the `--output` path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Relevant papers
    pub filtered: PathBuf,
    /// Rejected papers with reasons
    pub excluded: PathBuf,
    /// Relevant papers kept on weak evidence
    pub needs_review: PathBuf,
}

impl OutputPaths {
    /// `dir/stem.json` becomes `stem.json`, `stem_excluded.json` and
    /// `stem_needs_review.json` in the same directory
    pub fn from_output(output: &Path) -> Self {
        let dir = output.parent().unwrap_or_else(|| Path::new(""));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("papers_filtered");
        Self {
            filtered: dir.join(format!("{}.json", stem)),
            excluded: dir.join(format!("{}_excluded.json", stem)),
            needs_review: dir.join(format!("{}_needs_review.json", stem)),
        }
    }
}

/// `paper_id` of a raw record, or its position when it has none
fn record_label(record: &Value, index: usize) -> String {
    match record.get("paper_id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => format!("#{}", index),
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
