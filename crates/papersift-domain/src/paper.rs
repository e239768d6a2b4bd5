//! Paper module - the unit the filtering pipeline decides on

use serde::{Deserialize, Deserializer, Serialize};

/// A research paper's bibliographic metadata at filtering time
///
/// Papers are built once from ingested metadata and never mutated by the
/// filters, which only read them. Matching is case-insensitive throughout, so
/// filters work on [`Paper::title_lower`] and [`Paper::abstract_lower`].
///
/// Collaborators emit ragged JSON (missing keys, explicit `null`s), so every
/// field except the abstract falls back to its default in both cases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paper {
    /// Stable identifier, unique within a corpus
    #[serde(default, deserialize_with = "null_as_default")]
    pub paper_id: String,

    /// Title (never empty for well-formed input)
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Abstract text, frequently missing
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,

    /// Publication year (0 when unknown)
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,

    /// Venue name
    #[serde(default, deserialize_with = "null_as_default")]
    pub venue: String,

    /// Author names in listed order
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,

    /// Citation count reported by the source
    #[serde(default, deserialize_with = "null_as_default")]
    pub citation_count: u64,

    /// Landing page URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// PDF URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf_url: String,

    /// Publication date as reported (free-form)
    #[serde(default)]
    pub publication_date: Option<String>,

    /// Keywords that brought this paper into the corpus, in match order
    ///
    /// May contain the citation sentinel (see `DomainConfig::citation_sentinel`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords_matched: Vec<String>,

    /// Date the paper first entered the corpus
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_seen: String,
}

impl Paper {
    /// Create a paper with just an identifier, title and abstract
    ///
    /// # Examples
    ///
    /// ```
    /// use papersift_domain::Paper;
    ///
    /// let paper = Paper::new("W1", "Stealing Models", Some("We steal the model."));
    /// assert!(paper.has_abstract());
    /// assert_eq!(paper.title_lower(), "stealing models");
    /// ```
    pub fn new(
        paper_id: impl Into<String>,
        title: impl Into<String>,
        abstract_text: Option<&str>,
    ) -> Self {
        Self {
            paper_id: paper_id.into(),
            title: title.into(),
            abstract_text: abstract_text.map(str::to_string),
            ..Self::default()
        }
    }

    /// Set the matched keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords_matched = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a usable abstract exists (present and not whitespace-only)
    pub fn has_abstract(&self) -> bool {
        self.abstract_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Lowercased title
    pub fn title_lower(&self) -> String {
        self.title.to_lowercase()
    }

    /// Lowercased abstract, empty when absent
    pub fn abstract_lower(&self) -> String {
        self.abstract_text
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }
}

/// Treat an explicit JSON `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
