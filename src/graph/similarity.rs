//! Pairwise topical similarity between papers.
//!
//! Concept tags are curated upstream, so they are checked first and weighted
//! higher than title keywords. Keyword overlap only links papers that share no
//! concept at all, which keeps the graph from going sparse when tag data is
//! missing.

use std::collections::HashSet;

use crate::papers::PaperRecord;

const STOPWORDS: [&str; 35] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "been", "be", "have", "has", "had", "do", "does", "did",
    "will", "would", "should", "could", "may", "might", "must", "can",
];

const MIN_KEYWORD_CHARS: usize = 4;

const STRONG_CONCEPT_MIN: usize = 2;
const STRONG_CONCEPT_SATURATION: f32 = 3.0;
const CONCEPT_WITH_KEYWORDS_MIN: usize = 2;
const KEYWORD_ONLY_MIN: usize = 3;

pub const CONCEPT_WITH_KEYWORDS_STRENGTH: f32 = 0.7;
pub const SINGLE_CONCEPT_STRENGTH: f32 = 0.55;
pub const KEYWORD_ONLY_STRENGTH: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkReason {
    SharedConcepts,
    ConceptAndKeywords,
    SharedConcept,
    SharedKeywords,
}

impl LinkReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::SharedConcepts => "shared concepts",
            Self::ConceptAndKeywords => "concept + keywords",
            Self::SharedConcept => "shared concept",
            Self::SharedKeywords => "shared keywords",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkDecision {
    pub should_link: bool,
    pub strength: f32,
    pub reason: Option<LinkReason>,
}

impl LinkDecision {
    const NONE: Self = Self {
        should_link: false,
        strength: 0.0,
        reason: None,
    };

    fn link(strength: f32, reason: LinkReason) -> Self {
        Self {
            should_link: true,
            strength,
            reason: Some(reason),
        }
    }
}

/// Per-paper inputs to the heuristic, computed once per build.
#[derive(Clone, Debug, Default)]
pub struct PaperFeatures {
    pub concepts: HashSet<String>,
    pub keywords: HashSet<String>,
}

impl PaperFeatures {
    pub fn from_record(paper: &PaperRecord) -> Self {
        Self {
            concepts: paper
                .concept_tags()
                .into_iter()
                .map(str::to_lowercase)
                .collect(),
            keywords: title_keywords(&paper.title),
        }
    }
}

pub fn title_keywords(title: &str) -> HashSet<String> {
    let cleaned = title
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect::<String>();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_owned)
        .collect()
}

/// Rules are tried in order and the first match wins.
pub fn link_decision(a: &PaperFeatures, b: &PaperFeatures) -> LinkDecision {
    let shared_concepts = a.concepts.intersection(&b.concepts).count();
    let shared_keywords = a.keywords.intersection(&b.keywords).count();
    decide(shared_concepts, shared_keywords)
}

pub fn decide(shared_concepts: usize, shared_keywords: usize) -> LinkDecision {
    if shared_concepts >= STRONG_CONCEPT_MIN {
        let strength = (shared_concepts as f32 / STRONG_CONCEPT_SATURATION).min(1.0);
        return LinkDecision::link(strength, LinkReason::SharedConcepts);
    }

    if shared_concepts >= 1 && shared_keywords >= CONCEPT_WITH_KEYWORDS_MIN {
        return LinkDecision::link(
            CONCEPT_WITH_KEYWORDS_STRENGTH,
            LinkReason::ConceptAndKeywords,
        );
    }

    if shared_concepts >= 1 {
        return LinkDecision::link(SINGLE_CONCEPT_STRENGTH, LinkReason::SharedConcept);
    }

    if shared_keywords >= KEYWORD_ONLY_MIN {
        return LinkDecision::link(KEYWORD_ONLY_STRENGTH, LinkReason::SharedKeywords);
    }

    LinkDecision::NONE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(concepts: &str, title: &str) -> PaperFeatures {
        PaperFeatures::from_record(&PaperRecord {
            id: "W".to_owned(),
            title: title.to_owned(),
            concepts: Some(concepts.to_owned()),
            ..Default::default()
        })
    }

    #[test]
    fn keywords_drop_short_tokens_stopwords_and_punctuation() {
        let keywords = title_keywords("Learning-Based Control: with the Robots (2021)");
        let mut sorted = keywords.into_iter().collect::<Vec<_>>();
        sorted.sort();
        assert_eq!(sorted, vec!["2021", "based", "control", "learning", "robots"]);
    }

    #[test]
    fn empty_title_has_no_keywords() {
        assert!(title_keywords("").is_empty());
    }

    #[test]
    fn strong_concept_overlap_scales_and_saturates() {
        for shared in 2..8 {
            let decision = decide(shared, 10);
            assert!(decision.should_link);
            assert_eq!(decision.reason, Some(LinkReason::SharedConcepts));
            assert_eq!(decision.strength, (shared as f32 / 3.0).min(1.0));
        }
    }

    #[test]
    fn rule_one_never_reports_fallback_strengths() {
        let decision = decide(2, 5);
        assert!((decision.strength - 2.0 / 3.0).abs() < 1e-6);
        assert_ne!(decision.strength, CONCEPT_WITH_KEYWORDS_STRENGTH);
        assert_ne!(decision.strength, SINGLE_CONCEPT_STRENGTH);
        assert_ne!(decision.strength, KEYWORD_ONLY_STRENGTH);
    }

    #[test]
    fn single_concept_rules() {
        assert_eq!(decide(1, 2).strength, CONCEPT_WITH_KEYWORDS_STRENGTH);
        assert_eq!(decide(1, 1).strength, SINGLE_CONCEPT_STRENGTH);
        assert_eq!(decide(1, 0).reason, Some(LinkReason::SharedConcept));
    }

    #[test]
    fn keywords_only_need_three() {
        assert_eq!(decide(0, 3).strength, KEYWORD_ONLY_STRENGTH);
        for keywords in 0..3 {
            assert!(!decide(0, keywords).should_link);
        }
    }

    #[test]
    fn concepts_compare_case_insensitively() {
        let a = features("Robotics, Control", "Alpha");
        let b = features("robotics ,control", "Beta");
        let decision = link_decision(&a, &b);
        assert_eq!(decision.reason, Some(LinkReason::SharedConcepts));
    }

    #[test]
    fn keyword_overlap_links_untagged_papers() {
        let a = features("", "Neural network pruning strategies");
        let b = features("", "Pruning strategies for neural networks");
        // shared: neural, pruning, strategies
        assert_eq!(link_decision(&a, &b).reason, Some(LinkReason::SharedKeywords));
    }
}
