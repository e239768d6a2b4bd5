//! Relevance filter: is the domain discussed at all, and how convincingly

use crate::text::{contains_any, count_all, prefix, CompoundMatcher};
use crate::{ConfigError, DomainConfig};
use papersift_domain::{Confidence, FilterResult, Paper, PaperFilter};
use std::sync::Arc;
use tracing::debug;

/// Confirms a paper discusses the domain, separating strong evidence from
/// weak or contextual evidence
pub struct RelevanceFilter {
    config: Arc<DomainConfig>,
    compound: CompoundMatcher,
}

impl RelevanceFilter {
    /// Create a new relevance filter
    ///
    /// Fails if the configured action words cannot be compiled into a
    /// word-boundary matcher.
    pub fn new(config: Arc<DomainConfig>) -> Result<Self, ConfigError> {
        let compound = CompoundMatcher::new(
            &config.action_words,
            &config.anchor_term,
            config.thresholds.context_window,
        )?;
        Ok(Self { config, compound })
    }

    fn has_strong_indicators(&self, abstract_text: &str, title: &str) -> bool {
        let config = &self.config;

        let high_quality = config
            .high_quality_keywords
            .iter()
            .any(|kw| abstract_text.contains(kw.as_str()) || title.contains(kw.as_str()));
        if high_quality || contains_any(abstract_text, &config.strong_phrases) {
            return true;
        }

        if !contains_any(abstract_text, &config.extraction_terms) {
            return false;
        }
        let anchored = prefix(abstract_text, config.thresholds.first_paragraph_length)
            .contains(config.anchor_term.as_str());
        if !anchored {
            return false;
        }

        contains_any(abstract_text, &config.access_terms)
            || contains_any(abstract_text, &config.black_box_terms)
    }

    fn has_required_terms(&self, abstract_text: &str) -> bool {
        contains_any(abstract_text, &self.config.required_terms)
            || self.compound.is_match(abstract_text)
    }

    /// `Some(confidence)` when the mention is substantive, `None` when it is
    /// only in passing
    fn verify_context(&self, abstract_text: &str) -> Option<Confidence> {
        let config = &self.config;
        let mentions = count_all(abstract_text, &config.required_terms);

        if contains_any(abstract_text, &config.passing_phrases) && mentions <= 2 {
            return None;
        }

        let opening = prefix(abstract_text, config.thresholds.first_paragraph_length);
        if contains_any(opening, config.headline_terms()) {
            return Some(Confidence::High);
        }

        (mentions >= config.thresholds.min_term_mentions).then_some(Confidence::Medium)
    }

    fn evaluate(&self, paper: &Paper) -> FilterResult {
        if !paper.has_abstract() {
            return FilterResult::rejected(
                "No abstract available for verification",
                Confidence::Low,
            );
        }

        let domain = self.config.domain_display();
        let abstract_text = paper.abstract_lower();

        if self.has_strong_indicators(&abstract_text, &paper.title_lower()) {
            return FilterResult::relevant(
                format!("Strong {} indicators present", domain),
                Confidence::High,
            );
        }

        if !self.has_required_terms(&abstract_text) {
            return FilterResult::rejected(
                format!("No {} terminology in abstract", domain),
                Confidence::Medium,
            );
        }

        match self.verify_context(&abstract_text) {
            Some(confidence) => FilterResult::relevant(
                format!("{} terminology with proper context", domain),
                confidence,
            ),
            None => FilterResult::rejected(
                format!("{} mentioned only in passing", domain),
                Confidence::Medium,
            ),
        }
    }
}

impl PaperFilter for RelevanceFilter {
    fn filter(&self, paper: &Paper) -> FilterResult {
        let result = self.evaluate(paper);
        debug!(
            paper_id = %paper.paper_id,
            relevant = result.is_relevant,
            confidence = %result.confidence,
            reason = %result.reason,
            "relevance filter"
        );
        result
    }
}
