//! Domain configuration
//!
//! Every term list and threshold the filters consult lives here, so the same
//! filters can be retargeted to another research domain by swapping the file.
//! The configuration is loaded once at startup and shared read-only.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named list of terms (exclusion category or competing topic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermGroup {
    /// Group name, e.g. `side_channel` or `watermarking`
    pub name: String,

    /// Terms counted or matched for this group
    pub terms: Vec<String>,
}

impl TermGroup {
    /// Create a group from string slices
    pub fn new(name: &str, terms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            terms: strings(terms),
        }
    }
}

/// Numeric thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Characters inspected on each side of an action word for the anchor term
    pub context_window: usize,

    /// Length (characters) of the abstract prefix treated as its first paragraph
    pub first_paragraph_length: usize,

    /// Minimum required-term mentions for a paper without an early mention
    pub min_term_mentions: usize,

    /// A competing topic dominates when its count exceeds domain count times this
    pub topic_dominance_ratio: f64,

    /// Watermark mentions at or above which watermarking may dominate
    pub watermark_dominance_threshold: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            context_window: 50,
            first_paragraph_length: 300,
            min_term_mentions: 2,
            topic_dominance_ratio: 3.0,
            watermark_dominance_threshold: 5,
        }
    }
}

/// Configuration for the relevance filters
///
/// Omitted keys fall back to the model-stealing defaults, so a file only
/// needs the values it changes.
///
/// # Examples
///
/// ```
/// use papersift_filters::DomainConfig;
///
/// let config = DomainConfig::from_toml(r#"
/// domain_name = "model_stealing"
///
/// [thresholds]
/// watermark_dominance_threshold = 1
/// "#).unwrap();
///
/// assert_eq!(config.thresholds.watermark_dominance_threshold, 1);
/// assert_eq!(config.domain_display(), "model stealing");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Domain identifier; underscores become spaces in reasons
    pub domain_name: String,

    /// Keyword recorded for papers found only through a citation link
    pub citation_sentinel: String,

    /// Word that must accompany action words, e.g. "model"
    pub anchor_term: String,

    /// Core terminology; the first three are the headline terms
    pub required_terms: Vec<String>,

    /// Keywords that on their own prove relevance
    pub high_quality_keywords: Vec<String>,

    /// The unambiguous domain phrases used to confirm context
    pub canonical_phrases: Vec<String>,

    /// Matched keywords that usually denote a different concept
    pub problematic_keywords: Vec<String>,

    /// Action phrases that prove relevance when found in the abstract
    pub strong_phrases: Vec<String>,

    /// Words describing query access (`query`, `api`)
    pub access_terms: Vec<String>,

    /// Word stems describing the attack (`extract`, `steal`)
    pub extraction_terms: Vec<String>,

    /// Words describing a black-box setting
    pub black_box_terms: Vec<String>,

    /// Action words combined with the anchor into compound terms
    pub action_words: Vec<String>,

    /// Phrases marking a mention in passing
    pub passing_phrases: Vec<String>,

    /// Phrases framing watermarking as a defense for the domain
    pub defense_phrases: Vec<String>,

    /// Name of the watermarking topic in `other_topics`
    pub watermark_topic: String,

    /// Name of the privacy topic in `other_topics`
    pub privacy_topic: String,

    /// Phrase that marks the privacy topic as a different attack type
    pub membership_inference_phrase: String,

    /// Wrong-domain categories, checked in order
    pub exclusion_signals: Vec<TermGroup>,

    /// Competing topics, checked in order
    pub other_topics: Vec<TermGroup>,

    /// Numeric thresholds
    pub thresholds: Thresholds,
}

impl Default for DomainConfig {
    /// Model-stealing / model-extraction literature
    fn default() -> Self {
        Self {
            domain_name: "model_stealing".to_string(),
            citation_sentinel: "(via citation)".to_string(),
            anchor_term: "model".to_string(),
            required_terms: strings(&[
                "model stealing",
                "model extraction",
                "model theft",
                "stealing attack",
                "extraction attack",
                "steal the model",
                "extract the model",
                "stolen model",
                "model cloning",
                "functionality stealing",
                "knockoff",
            ]),
            high_quality_keywords: strings(&[
                "model stealing attack",
                "model extraction attack",
                "knockoff nets",
                "stealing machine learning models",
                "data-free model extraction",
                "cryptanalytic extraction",
            ]),
            canonical_phrases: strings(&["model extraction", "model stealing"]),
            problematic_keywords: strings(&[
                "electromagnetic",
                "side-channel",
                "side channel",
                "power analysis",
                "key extraction",
            ]),
            strong_phrases: strings(&[
                "steal the model",
                "extract the model",
                "clone the model",
                "replicate the model",
                "query the victim model",
                "surrogate model",
            ]),
            access_terms: strings(&["query", "api"]),
            extraction_terms: strings(&["extract", "steal"]),
            black_box_terms: strings(&["black-box"]),
            action_words: strings(&["steal", "extract", "clone", "replicate", "copy"]),
            passing_phrases: strings(&[
                "such as model stealing",
                "such as model extraction",
                "including model stealing",
                "including model extraction",
                "e.g., model stealing",
                "e.g., model extraction",
                "like model stealing",
                "or model stealing",
                "model stealing, and other",
                "model stealing among",
                "beyond model stealing",
                "unlike model stealing",
            ]),
            defense_phrases: strings(&["against model stealing", "prevent model extraction"]),
            watermark_topic: "watermarking".to_string(),
            privacy_topic: "privacy".to_string(),
            membership_inference_phrase: "membership inference".to_string(),
            exclusion_signals: vec![
                TermGroup::new(
                    "side_channel",
                    &["side-channel", "side channel", "electromagnetic", "power analysis", "cache timing"],
                ),
                TermGroup::new(
                    "prompt_stealing",
                    &["prompt stealing", "prompt extraction", "prompt leakage", "system prompt"],
                ),
                TermGroup::new(
                    "data_stealing",
                    &["data stealing", "data exfiltration", "link stealing", "training data extraction"],
                ),
            ],
            other_topics: vec![
                TermGroup::new("watermarking", &["watermark", "fingerprint"]),
                TermGroup::new(
                    "privacy",
                    &["membership inference", "differential privacy", "attribute inference", "model inversion"],
                ),
                TermGroup::new("adversarial examples", &["adversarial example", "adversarial perturbation", "evasion attack"]),
                TermGroup::new("backdoors", &["backdoor", "trojan", "data poisoning"]),
            ],
            thresholds: Thresholds::default(),
        }
    }
}

impl DomainConfig {
    /// Load, normalize and validate a configuration file
    ///
    /// This is the only supported way to build a config from user input;
    /// a failure here is fatal for the caller.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::from_file(path)?.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without validating it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string without validating it
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Domain name as shown in verdict reasons
    pub fn domain_display(&self) -> String {
        self.domain_name.replace('_', " ")
    }

    /// The headline terms checked against the first paragraph
    pub fn headline_terms(&self) -> &[String] {
        let n = self.required_terms.len().min(3);
        &self.required_terms[..n]
    }

    /// Lowercase and trim every term
    ///
    /// Matching is done against lowercased paper text, so terms must be
    /// lowercase too. Group names are only trimmed.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.required_terms,
            &mut self.high_quality_keywords,
            &mut self.canonical_phrases,
            &mut self.problematic_keywords,
            &mut self.strong_phrases,
            &mut self.access_terms,
            &mut self.extraction_terms,
            &mut self.black_box_terms,
            &mut self.action_words,
            &mut self.passing_phrases,
            &mut self.defense_phrases,
        ] {
            normalize_list(list);
        }
        for group in self
            .exclusion_signals
            .iter_mut()
            .chain(self.other_topics.iter_mut())
        {
            group.name = group.name.trim().to_string();
            normalize_list(&mut group.terms);
        }
        self.citation_sentinel = self.citation_sentinel.trim().to_lowercase();
        self.anchor_term = self.anchor_term.trim().to_lowercase();
        self.membership_inference_phrase = self.membership_inference_phrase.trim().to_lowercase();
        self.watermark_topic = self.watermark_topic.trim().to_string();
        self.privacy_topic = self.privacy_topic.trim().to_string();
        self.domain_name = self.domain_name.trim().to_string();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain_name.trim().is_empty() {
            return Err(invalid("domain_name must not be empty"));
        }
        if self.required_terms.is_empty() {
            return Err(invalid("required_terms must contain at least one term"));
        }
        if self.canonical_phrases.is_empty() {
            return Err(invalid("canonical_phrases must contain at least one phrase"));
        }
        for (field, value) in [
            ("citation_sentinel", &self.citation_sentinel),
            ("anchor_term", &self.anchor_term),
            ("watermark_topic", &self.watermark_topic),
            ("privacy_topic", &self.privacy_topic),
            ("membership_inference_phrase", &self.membership_inference_phrase),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(&format!("{} must not be empty", field)));
            }
        }
        for (field, list) in [
            ("required_terms", &self.required_terms),
            ("high_quality_keywords", &self.high_quality_keywords),
            ("canonical_phrases", &self.canonical_phrases),
            ("problematic_keywords", &self.problematic_keywords),
            ("strong_phrases", &self.strong_phrases),
            ("access_terms", &self.access_terms),
            ("extraction_terms", &self.extraction_terms),
            ("black_box_terms", &self.black_box_terms),
            ("action_words", &self.action_words),
            ("passing_phrases", &self.passing_phrases),
            ("defense_phrases", &self.defense_phrases),
        ] {
            check_terms(field, list)?;
        }
        for (field, groups) in [
            ("exclusion_signals", &self.exclusion_signals),
            ("other_topics", &self.other_topics),
        ] {
            for group in groups {
                if group.name.trim().is_empty() {
                    return Err(invalid(&format!("{} contains a group without a name", field)));
                }
                check_terms(&format!("{}.{}", field, group.name), &group.terms)?;
            }
        }
        for (field, topic) in [
            ("watermark_topic", &self.watermark_topic),
            ("privacy_topic", &self.privacy_topic),
        ] {
            if !self.other_topics.iter().any(|group| &group.name == topic) {
                return Err(invalid(&format!(
                    "{} {:?} does not name a group in other_topics",
                    field, topic
                )));
            }
        }

        let t = &self.thresholds;
        if t.first_paragraph_length == 0 {
            return Err(invalid("first_paragraph_length must be greater than 0"));
        }
        if !t.topic_dominance_ratio.is_finite() || t.topic_dominance_ratio <= 0.0 {
            return Err(invalid("topic_dominance_ratio must be a positive number"));
        }
        if t.watermark_dominance_threshold == 0 {
            return Err(invalid("watermark_dominance_threshold must be at least 1"));
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn normalize_list(list: &mut [String]) {
    for term in list.iter_mut() {
        *term = term.trim().to_lowercase();
    }
}

fn check_terms(field: &str, terms: &[String]) -> Result<(), ConfigError> {
    if terms.iter().any(|t| t.trim().is_empty()) {
        return Err(invalid(&format!("{} contains an empty term", field)));
    }
    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DomainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.watermark_dominance_threshold, 5);
        assert_eq!(config.thresholds.first_paragraph_length, 300);
    }

    #[test]
    fn test_default_is_already_normalized() {
        let config = DomainConfig::default();
        assert_eq!(config.clone().normalized(), config);
    }

    #[test]
    fn test_headline_terms() {
        let mut config = DomainConfig::default();
        assert_eq!(
            config.headline_terms(),
            &["model stealing", "model extraction", "model theft"]
        );

        config.required_terms = vec!["only one".to_string()];
        assert_eq!(config.headline_terms().len(), 1);
    }

    #[test]
    fn test_normalization_lowercases_terms() {
        let mut config = DomainConfig::default();
        config.required_terms = vec!["  Model Stealing ".to_string()];
        config.other_topics = vec![TermGroup::new(" watermarking ", &["WaterMark"])];

        let config = config.normalized();
        assert_eq!(config.required_terms, vec!["model stealing"]);
        assert_eq!(config.other_topics[0].name, "watermarking");
        assert_eq!(config.other_topics[0].terms, vec!["watermark"]);
    }

    #[test]
    fn test_topic_names_trimmed() {
        let mut config = DomainConfig::default();
        config.watermark_topic = " watermarking\n".to_string();
        config.privacy_topic = "  privacy".to_string();

        let config = config.normalized();
        assert_eq!(config.watermark_topic, "watermarking");
        assert_eq!(config.privacy_topic, "privacy");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_topic_names_rejected() {
        let mut config = DomainConfig::default();
        config.watermark_topic = "watermarks".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("watermark_topic"));

        let mut config = DomainConfig::default();
        config.other_topics.retain(|group| group.name != "privacy");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("privacy_topic"));
    }

    #[test]
    fn test_topic_typo_in_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.toml");
        std::fs::write(&path, "privacy_topic = \"privacyy\"\n").unwrap();

        assert!(matches!(DomainConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_required_terms_rejected() {
        let mut config = DomainConfig::default();
        config.required_terms.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_term_rejected() {
        let mut config = DomainConfig::default();
        config.exclusion_signals[0].terms.push("   ".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exclusion_signals.side_channel"));
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let mut config = DomainConfig::default();
        config.thresholds.topic_dominance_ratio = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = DomainConfig::default();
        config.thresholds.first_paragraph_length = 0;
        assert!(config.validate().is_err());

        let mut config = DomainConfig::default();
        config.thresholds.watermark_dominance_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DomainConfig::from_toml(
            r#"
            domain_name = "prompt_injection"
            required_terms = ["prompt injection", "jailbreak"]

            [thresholds]
            min_term_mentions = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.domain_display(), "prompt injection");
        assert_eq!(config.required_terms.len(), 2);
        assert_eq!(config.thresholds.min_term_mentions, 4);
        assert_eq!(config.thresholds.context_window, 50);
        assert_eq!(config.anchor_term, "model");
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = DomainConfig::from_toml("domain_name = [1, 2");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));

        let result = DomainConfig::from_toml("thresholds = { context_window = \"wide\" }");
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DomainConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = DomainConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.toml");
        std::fs::write(&path, "anchor_term = \"  MODEL \"\n").unwrap();

        let config = DomainConfig::load(&path).unwrap();
        assert_eq!(config.anchor_term, "model");

        let missing = DomainConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::FileRead(_))));
    }
}
