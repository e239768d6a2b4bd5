//! Integration tests for papersift-pipeline
//!
//! These tests run the default three-stage pipeline end to end.

use papersift_domain::{Confidence, FilterResult, Paper, PaperFilter};
use papersift_filters::{DomainConfig, ExclusionFilter, RelevanceFilter, TopicFilter};
use papersift_pipeline::{FilterPipeline, FilterStats, PipelineResult, STAGE_COMPLETE};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn default_pipeline() -> FilterPipeline {
    FilterPipeline::new(Arc::new(DomainConfig::default())).unwrap()
}

fn pipeline_with_watermark_threshold(threshold: usize) -> FilterPipeline {
    let mut config = DomainConfig::default();
    config.thresholds.watermark_dominance_threshold = threshold;
    FilterPipeline::new(Arc::new(config)).unwrap()
}

#[test]
fn test_scenario_missing_abstract() {
    let paper = Paper::new("A", "Defending Deployed Classifiers", None)
        .with_keywords(["model extraction"]);

    let result = default_pipeline().process(&paper);
    assert!(!result.is_relevant);
    assert_eq!(result.stage, "relevance");
    assert_eq!(result.confidence, Confidence::Low);
    assert!(result.reason.contains("abstract"));
}

#[test]
fn test_scenario_strong_black_box_attack() {
    let paper = Paper::new(
        "B",
        "Stealing ML Models via Query Access",
        Some("We propose a black-box attack to steal the model by querying its API thousands of times..."),
    )
    .with_keywords(["model stealing"]);

    let result = default_pipeline().process(&paper);
    assert!(result.is_relevant);
    assert_eq!(result.stage, STAGE_COMPLETE);
    assert_eq!(result.confidence, Confidence::High);
}

#[test]
fn test_scenario_watermarking_dominates() {
    let abstract_text = "Related work includes watermarking, model extraction, and membership inference. \
        We propose a watermark scheme for neural networks. The watermark survives fine-tuning \
        and pruning. Each watermark is verifiable, and the watermark detector is fast. \
        Watermarking at scale needs a robust watermark.";
    let paper = Paper::new("C", "Robust Watermarks for Neural Networks", Some(abstract_text))
        .with_keywords(["model extraction"]);

    let result = default_pipeline().process(&paper);
    assert!(!result.is_relevant);
    assert_eq!(result.stage, "topic");
    assert!(result.reason.contains("watermarking"));
}

#[test]
fn test_scenario_citation_only() {
    let pipeline = default_pipeline();
    for abstract_text in [
        None,
        Some("We study graph neural networks for molecules."),
        Some("We steal the model by querying its API."),
    ] {
        let paper = Paper::new("D", "Some Paper", abstract_text).with_keywords(["(via citation)"]);
        let result = pipeline.process(&paper);
        assert!(!result.is_relevant);
        assert_eq!(result.stage, "exclusion");
        assert_eq!(result.reason, "Only mentioned in citations");
    }
}

#[test]
fn test_watermark_threshold_changes_verdict() {
    let paper = Paper::new(
        "W",
        "Ownership for Classifiers",
        Some(
            "Model extraction threatens deployed classifiers. We embed a watermark in the weights; \
             the watermark is robust, and a third watermark check verifies ownership.",
        ),
    );

    let lenient = pipeline_with_watermark_threshold(5).process(&paper);
    assert!(lenient.is_relevant);
    assert_eq!(lenient.stage, STAGE_COMPLETE);

    let strict = pipeline_with_watermark_threshold(1).process(&paper);
    assert!(!strict.is_relevant);
    assert_eq!(strict.stage, "topic");
    assert_eq!(strict.reason, "Primarily about watermarking, not model stealing");
}

fn counted<F>(filter: F, calls: Arc<AtomicUsize>) -> impl Fn(&Paper) -> FilterResult + Send + Sync
where
    F: PaperFilter,
{
    move |paper: &Paper| {
        calls.fetch_add(1, Ordering::SeqCst);
        filter.filter(paper)
    }
}

#[test]
fn test_rejection_short_circuits_later_stages() {
    let config = Arc::new(DomainConfig::default());
    let relevance_calls = Arc::new(AtomicUsize::new(0));
    let topic_calls = Arc::new(AtomicUsize::new(0));

    let mut pipeline = FilterPipeline::empty();
    pipeline
        .add_filter("exclusion", ExclusionFilter::new(Arc::clone(&config)))
        .unwrap();
    pipeline
        .add_filter(
            "relevance",
            counted(
                RelevanceFilter::new(Arc::clone(&config)).unwrap(),
                Arc::clone(&relevance_calls),
            ),
        )
        .unwrap();
    pipeline
        .add_filter(
            "topic",
            counted(TopicFilter::new(Arc::clone(&config)), Arc::clone(&topic_calls)),
        )
        .unwrap();

    let excluded = vec![
        Paper::new("1", "Any", Some("Model stealing everywhere.")).with_keywords(["(via citation)"]),
        Paper::new("2", "Prompt Stealing in the Wild", None),
        Paper::new("3", "Chips", None).with_keywords(["power analysis"]),
    ];
    for result in pipeline.process_batch(&excluded, None) {
        assert_eq!(result.stage, "exclusion");
    }
    assert_eq!(relevance_calls.load(Ordering::SeqCst), 0);
    assert_eq!(topic_calls.load(Ordering::SeqCst), 0);

    let no_abstract = Paper::new("4", "Untitled", None);
    assert_eq!(pipeline.process(&no_abstract).stage, "relevance");
    assert_eq!(relevance_calls.load(Ordering::SeqCst), 1);
    assert_eq!(topic_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_results_round_trip_through_json() {
    let mut rich = Paper::new(
        "W2963",
        "Knockoff Nets: Stealing Functionality of Black-Box Models",
        Some("We steal the model with a knockoff."),
    )
    .with_keywords(["knockoff nets", "model stealing"]);
    rich.year = 2019;
    rich.venue = "CVPR".to_string();
    rich.authors = vec!["Tribhuvanesh Orekondy".to_string(), "Bernt Schiele".to_string()];
    rich.citation_count = 812;
    rich.url = "https://openalex.org/W2963".to_string();
    rich.publication_date = Some("2019-06-15".to_string());
    rich.first_seen = "2024-11-02".to_string();

    let papers = vec![
        rich,
        Paper::new("W1", "Untitled", None),
        Paper::new("W2", "Some Paper", Some("Graph learning.")).with_keywords(["(via citation)"]),
    ];
    let results = default_pipeline().process_batch(&papers, None);

    let json = serde_json::to_string(&results).unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(values.len(), papers.len());

    for ((value, paper), result) in values.iter().zip(&papers).zip(&results) {
        assert_eq!(value["filter_reason"], result.reason.as_str());
        assert_eq!(value["filter_confidence"], result.confidence.as_str());
        assert_eq!(value["filter_stage"], result.stage.as_str());

        let parsed: Paper = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(&parsed, paper);
    }
}

#[test]
fn test_stats_over_scenarios() {
    let papers = vec![
        Paper::new("1", "Untitled", None),
        Paper::new("2", "Some Paper", Some("Graph learning.")).with_keywords(["(via citation)"]),
        Paper::new("3", "Knockoff Nets", Some("We steal the model with a knockoff.")),
    ];
    let results = default_pipeline().process_batch(&papers, None);
    let stats = FilterStats::from_results(&results);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.relevant, 1);
    assert_eq!(stats.by_stage.get("exclusion"), Some(&1));
    assert_eq!(stats.by_stage.get("relevance"), Some(&1));
    assert_eq!(stats.by_stage.get(STAGE_COMPLETE), Some(&1));
    assert_eq!(stats.exclusion_reasons.get("Only mentioned in citations"), Some(&1));
}

const VOCAB: &[&str] = &[
    "model", "stealing", "extraction", "watermark", "privacy", "membership inference",
    "side-channel", "prompt leakage", "query", "black-box", "steal the model",
    "surrogate model", "such as model stealing", "knockoff", "graph", "defense",
];

const KEYWORDS: &[&str] = &[
    "(via citation)", "model stealing", "model extraction", "electromagnetic",
    "key extraction", "knockoff nets",
];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(VOCAB).prop_map(str::to_string),
            "[a-zA-Z ,.;é-]{0,12}",
        ],
        0..40,
    )
    .prop_map(|words| words.join(" "))
}

fn paper_strategy() -> impl Strategy<Value = Paper> {
    (
        text_strategy(),
        prop::option::of(text_strategy()),
        prop::collection::vec(prop::sample::select(KEYWORDS), 0..3),
    )
        .prop_map(|(title, abstract_text, keywords)| {
            Paper::new("P", title, abstract_text.as_deref()).with_keywords(keywords)
        })
}

proptest! {
    #[test]
    fn prop_processing_is_idempotent(paper in paper_strategy()) {
        let pipeline = default_pipeline();
        let first: PipelineResult = pipeline.process(&paper);
        let second = pipeline.process(&paper);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_missing_abstract_stops_at_relevance(
        title in text_strategy(),
        keywords in prop::collection::vec(prop::sample::select(KEYWORDS), 0..3),
    ) {
        let paper = Paper::new("P", title, None).with_keywords(keywords);
        let result = default_pipeline().process(&paper);

        if result.stage != "exclusion" {
            prop_assert_eq!(result.stage.as_str(), "relevance");
            prop_assert!(!result.is_relevant);
            prop_assert_eq!(result.confidence, Confidence::Low);
        }
    }

    #[test]
    fn prop_relevant_iff_complete(paper in paper_strategy()) {
        let result = default_pipeline().process(&paper);
        prop_assert_eq!(result.is_relevant, result.is_complete());
    }
}
