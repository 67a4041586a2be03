use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::GraphNode;

/// Titles that agree on this many leading characters count as the same paper.
pub const TITLE_PREFIX_CHARS: usize = 30;

/// Resolves a free-form title to a node index.
///
/// Passes run in priority order over every node: exact match, containment in
/// either direction, then a shared leading prefix. Comparison ignores case and
/// surrounding whitespace.
pub fn find_by_title(nodes: &[GraphNode], query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let titles = nodes
        .iter()
        .map(|node| node.title.trim().to_lowercase())
        .collect::<Vec<_>>();

    if let Some(index) = titles.iter().position(|title| *title == query) {
        return Some(index);
    }

    if let Some(index) = titles.iter().position(|title| {
        !title.is_empty() && (title.contains(query.as_str()) || query.contains(title.as_str()))
    }) {
        return Some(index);
    }

    let query_prefix = prefix(&query);
    titles
        .iter()
        .position(|title| !title.is_empty() && prefix(title) == query_prefix)
}

fn prefix(text: &str) -> &str {
    match text.char_indices().nth(TITLE_PREFIX_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Node indices whose title fuzzily matches `query`. Empty for a blank query.
pub fn fuzzy_matches(nodes: &[GraphNode], query: &str) -> HashSet<usize> {
    let query = query.trim();
    if query.is_empty() {
        return HashSet::new();
    }

    let matcher = SkimMatcherV2::default();
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            fuzzy_match_score(&matcher, &node.title, query).map(|_| index)
        })
        .collect()
}
