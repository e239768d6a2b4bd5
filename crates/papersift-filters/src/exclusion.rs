//! Exclusion filter: cheap, high-precision rejection of false positives

use crate::text::{contains_any, count_all, prefix, title_case};
use crate::DomainConfig;
use papersift_domain::{Confidence, FilterResult, Paper, PaperFilter};
use std::sync::Arc;
use tracing::debug;

/// Reason attached to papers that only reached the corpus through citations
pub const CITATION_ONLY_REASON: &str = "Only mentioned in citations";

/// Rejects papers that matched the keyword set for unrelated reasons
///
/// Runs three checks in fixed order and returns the first rejection:
/// 1. Problematic matched keywords (lexically close, different concept)
/// 2. Wrong-domain exclusion signals in the title or dominating the abstract
/// 3. Papers that only arrived through a citation link
pub struct ExclusionFilter {
    config: Arc<DomainConfig>,
}

impl ExclusionFilter {
    /// Create a new exclusion filter
    pub fn new(config: Arc<DomainConfig>) -> Self {
        Self { config }
    }

    fn check_problematic_keywords(&self, paper: &Paper) -> Option<FilterResult> {
        let matched = paper.keywords_matched.join(" ").to_lowercase();
        let keyword = self
            .config
            .problematic_keywords
            .iter()
            .find(|kw| matched.contains(kw.as_str()))?;

        if !paper.has_abstract() {
            return Some(FilterResult::rejected(
                format!("Problematic keyword: {}", keyword),
                Confidence::Medium,
            ));
        }

        if !contains_any(&paper.abstract_lower(), &self.config.canonical_phrases) {
            return Some(FilterResult::rejected(
                format!("Problematic keyword without domain context: {}", keyword),
                Confidence::High,
            ));
        }

        None
    }

    fn check_exclusion_signals(&self, paper: &Paper) -> Option<FilterResult> {
        let title = paper.title_lower();
        let has_abstract = paper.has_abstract();
        let abstract_text = paper.abstract_lower();
        let anchor = self.config.anchor_term.as_str();
        let opening = prefix(&abstract_text, self.config.thresholds.first_paragraph_length);

        for group in &self.config.exclusion_signals {
            let in_title = group.terms.iter().any(|term| title.contains(term.as_str()));
            if in_title && (!has_abstract || !opening.contains(anchor)) {
                return Some(FilterResult::rejected(
                    format!(
                        "{}, not {}",
                        title_case(&group.name),
                        self.config.domain_display()
                    ),
                    Confidence::High,
                ));
            }

            if has_abstract
                && count_all(&abstract_text, &group.terms) > 2
                && !title.contains(anchor)
            {
                return Some(FilterResult::rejected(
                    format!("Primarily about {}", title_case(&group.name).to_lowercase()),
                    Confidence::Medium,
                ));
            }
        }

        None
    }

    fn check_citation_only(&self, paper: &Paper) -> Option<FilterResult> {
        let sentinel = self.config.citation_sentinel.as_str();
        let is_sentinel = |kw: &String| kw.trim().to_lowercase() == sentinel;
        let keywords = &paper.keywords_matched;

        if keywords.len() == 1 && is_sentinel(&keywords[0]) {
            return Some(FilterResult::rejected(CITATION_ONLY_REASON, Confidence::High));
        }

        if keywords.len() <= 2 && keywords.iter().any(is_sentinel) {
            let other = keywords.iter().find(|kw| !is_sentinel(kw))?;
            let other = other.trim().to_lowercase();
            if self.config.canonical_phrases.contains(&other)
                && paper.has_abstract()
                && !contains_any(&paper.abstract_lower(), &self.config.canonical_phrases)
            {
                return Some(FilterResult::rejected(CITATION_ONLY_REASON, Confidence::High));
            }
        }

        None
    }
}

impl PaperFilter for ExclusionFilter {
    fn filter(&self, paper: &Paper) -> FilterResult {
        let result = self
            .check_problematic_keywords(paper)
            .or_else(|| self.check_exclusion_signals(paper))
            .or_else(|| self.check_citation_only(paper))
            .unwrap_or_else(|| {
                FilterResult::relevant("No exclusion criteria matched", Confidence::High)
            });

        debug!(
            paper_id = %paper.paper_id,
            relevant = result.is_relevant,
            reason = %result.reason,
            "exclusion filter"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ExclusionFilter {
        ExclusionFilter::new(Arc::new(DomainConfig::default()))
    }

    fn paper(title: &str, abstract_text: Option<&str>, keywords: &[&str]) -> Paper {
        Paper::new("W1", title, abstract_text).with_keywords(keywords.iter().copied())
    }

    #[test]
    fn test_clean_paper_passes() {
        let p = paper(
            "Knockoff Nets",
            Some("We study model stealing of image classifiers."),
            &["model stealing"],
        );
        let result = filter().filter(&p);
        assert!(result.is_relevant);
        assert_eq!(result.reason, "No exclusion criteria matched");
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_problematic_keyword_without_abstract() {
        let p = paper("EM Attacks on Chips", None, &["Electromagnetic model extraction"]);
        let result = filter().filter(&p);
        assert!(!result.is_relevant);
        assert_eq!(result.reason, "Problematic keyword: electromagnetic");
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_problematic_keyword_without_domain_context() {
        let p = paper(
            "Recovering AES Keys",
            Some("We recover secret keys from a smart card."),
            &["key extraction"],
        );
        let result = filter().filter(&p);
        assert!(!result.is_relevant);
        assert_eq!(result.reason, "Problematic keyword without domain context: key extraction");
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_problematic_keyword_with_domain_context_falls_through() {
        let p = paper(
            "Neural Network Weights via EM Leakage",
            Some("We show model extraction of DNN weights from emanations."),
            &["electromagnetic"],
        );
        assert!(filter().filter(&p).is_relevant);
    }

    #[test]
    fn test_exclusion_signal_in_title() {
        let p = paper(
            "Prompt Stealing Attacks Against LLM Apps",
            Some("We recover hidden instructions from deployed assistants."),
            &["stealing attack"],
        );
        let result = filter().filter(&p);
        assert!(!result.is_relevant);
        assert_eq!(result.reason, "Prompt Stealing, not model stealing");
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_exclusion_signal_in_title_without_abstract() {
        let p = paper("Link Stealing Attacks on GNNs", None, &["stealing attack"]);
        let result = filter().filter(&p);
        assert_eq!(result.reason, "Data Stealing, not model stealing");
    }

    #[test]
    fn test_title_signal_spared_when_abstract_opens_with_anchor() {
        let p = paper(
            "Side-Channel Model Extraction",
            Some("We extract the model architecture from cache timing traces."),
            &["model extraction"],
        );
        assert!(filter().filter(&p).is_relevant);
    }

    #[test]
    fn test_exclusion_signals_dominating_abstract() {
        let p = paper(
            "Leaky Assistants",
            Some(
                "System prompt leakage is common. We measure prompt leakage and \
                 prompt extraction across vendors, and discuss model stealing briefly.",
            ),
            &["model stealing"],
        );
        let result = filter().filter(&p);
        assert!(!result.is_relevant);
        assert_eq!(result.reason, "Primarily about prompt stealing");
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_two_signal_terms_do_not_dominate() {
        let p = paper(
            "Leaky Assistants",
            Some("We measure prompt leakage and prompt extraction across vendors, and discuss model stealing briefly."),
            &["model stealing"],
        );
        let result = filter().filter(&p);
        assert!(result.is_relevant);
        assert_eq!(result.reason, "No exclusion criteria matched");
    }

    #[test]
    fn test_three_signal_terms_dominate() {
        let p = paper(
            "Leaky Assistants",
            Some(
                "We measure prompt leakage, prompt extraction and prompt stealing across vendors, \
                 and discuss model stealing briefly.",
            ),
            &["model stealing"],
        );
        let result = filter().filter(&p);
        assert!(!result.is_relevant);
        assert_eq!(result.reason, "Primarily about prompt stealing");
    }

    #[test]
    fn test_dominating_signals_spared_when_title_mentions_anchor() {
        let p = paper(
            "Model Extraction Beyond Prompt Leakage",
            Some("Prompt leakage, prompt leakage, prompt extraction; but mainly model stealing."),
            &["model stealing"],
        );
        assert!(filter().filter(&p).is_relevant);
    }

    #[test]
    fn test_citation_sentinel_only() {
        let p = paper("Some Paper", Some("Unrelated abstract text."), &["(via citation)"]);
        let result = filter().filter(&p);
        assert!(!result.is_relevant);
        assert_eq!(result.reason, CITATION_ONLY_REASON);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_citation_with_generic_keyword_not_in_abstract() {
        let p = paper(
            "Federated Learning at Scale",
            Some("We train across many devices."),
            &["(via citation)", "model extraction"],
        );
        assert_eq!(filter().filter(&p).reason, CITATION_ONLY_REASON);
    }

    #[test]
    fn test_citation_with_generic_keyword_in_abstract_passes() {
        let p = paper(
            "Defending APIs",
            Some("We defend against model extraction."),
            &["(via citation)", "model extraction"],
        );
        assert!(filter().filter(&p).is_relevant);
    }

    #[test]
    fn test_citation_with_specific_keyword_passes() {
        let p = paper(
            "Knockoff Nets",
            Some("We train a knockoff."),
            &["(via citation)", "knockoff nets"],
        );
        assert!(filter().filter(&p).is_relevant);
    }

    #[test]
    fn test_citation_with_generic_keyword_without_abstract_passes() {
        let p = paper("Untitled", None, &["(via citation)", "model stealing"]);
        assert!(filter().filter(&p).is_relevant);
    }

    #[test]
    fn test_problematic_check_runs_first() {
        let p = paper("Side-Channel Analysis", None, &["(via citation)", "side-channel"]);
        let result = filter().filter(&p);
        assert_eq!(result.reason, "Problematic keyword: side-channel");
    }
}
