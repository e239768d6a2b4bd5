//! Topic filter: is the domain the primary subject of the paper

use crate::text::{contains_any, count_all};
use crate::DomainConfig;
use papersift_domain::{Confidence, FilterResult, Paper, PaperFilter};
use std::sync::Arc;
use tracing::debug;

/// Rejects papers where a competing topic outweighs the domain
pub struct TopicFilter {
    config: Arc<DomainConfig>,
}

impl TopicFilter {
    /// Create a new topic filter
    pub fn new(config: Arc<DomainConfig>) -> Self {
        Self { config }
    }

    fn is_dominant(&self, topic: &str, topic_count: usize, domain_count: usize, text: &str) -> bool {
        let config = &self.config;
        let t = &config.thresholds;

        if topic == config.watermark_topic
            && topic_count >= t.watermark_dominance_threshold
            && domain_count <= 2
            && !contains_any(text, &config.defense_phrases)
        {
            return true;
        }

        if topic_count as f64 > domain_count as f64 * t.topic_dominance_ratio {
            return true;
        }

        topic == config.privacy_topic
            && text.contains(config.membership_inference_phrase.as_str())
            && topic_count > domain_count
    }

    fn evaluate(&self, paper: &Paper) -> FilterResult {
        if !paper.has_abstract() {
            return FilterResult::relevant(
                "Cannot determine primary topic without abstract",
                Confidence::Low,
            );
        }

        let domain = self.config.domain_display();
        let text = paper.abstract_lower();
        let domain_count = count_all(&text, &self.config.required_terms);

        if domain_count == 0 {
            return FilterResult::rejected(
                format!("No {} terminology in abstract", domain),
                Confidence::High,
            );
        }

        for group in &self.config.other_topics {
            let topic_count = count_all(&text, &group.terms);
            if topic_count > 0 && self.is_dominant(&group.name, topic_count, domain_count, &text) {
                debug!(
                    paper_id = %paper.paper_id,
                    topic = %group.name,
                    topic_count,
                    domain_count,
                    "competing topic dominates"
                );
                return FilterResult::rejected(
                    format!("Primarily about {}, not {}", group.name, domain),
                    Confidence::Medium,
                );
            }
        }

        FilterResult::relevant(format!("{} is primary topic", domain), Confidence::High)
    }
}

impl PaperFilter for TopicFilter {
    fn filter(&self, paper: &Paper) -> FilterResult {
        let result = self.evaluate(paper);
        debug!(
            paper_id = %paper.paper_id,
            relevant = result.is_relevant,
            reason = %result.reason,
            "topic filter"
        );
        result
    }
}
