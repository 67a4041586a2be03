//! Graph construction from paper records: link rules and topology.

use paper_atlas::graph::{GraphData, LinkKind, build_graph_with_rng};
use paper_atlas::papers::{PaperRecord, parse_papers};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn papers(raw: &str) -> Vec<PaperRecord> {
    parse_papers(raw).expect("fixture should parse")
}

fn build(papers: &[PaperRecord], seed: u64) -> GraphData {
    build_graph_with_rng(papers, &mut StdRng::seed_from_u64(seed))
}

fn similar_pairs(graph: &GraphData) -> Vec<(String, String, f32)> {
    graph
        .links
        .iter()
        .filter_map(|link| match link.kind {
            LinkKind::Similar { strength } => {
                Some((link.source.clone(), link.target.clone(), strength))
            }
            LinkKind::Reference => None,
        })
        .collect()
}

#[test]
fn one_shared_concept_links_only_that_pair() {
    let corpus = papers(
        r#"[
            {"id": "A", "title": "Adaptive control of legged robots", "concepts": "robotics, control"},
            {"id": "B", "title": "Motion planning for manipulators", "concepts": "Robotics, planning"},
            {"id": "C", "title": "Protein folding dynamics", "concepts": "biology"}
        ]"#,
    );

    let graph = build(&corpus, 7);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(
        similar_pairs(&graph),
        vec![("A".to_owned(), "B".to_owned(), 0.55)]
    );
    assert!(graph.neighbors("C").next().is_none());
}

#[test]
fn reference_links_only_point_inside_the_corpus() {
    let corpus = papers(
        r#"{"papers": [
            {"id": "X", "title": "Survey", "references": "Y; MISSING"},
            {"id": "Y", "title": "Original result"}
        ]}"#,
    );

    let graph = build(&corpus, 1);
    let references = graph
        .links
        .iter()
        .filter(|link| link.kind == LinkKind::Reference)
        .collect::<Vec<_>>();
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].source, "X");
    assert_eq!(references[0].target, "Y");

    // the dangling id still counts towards the paper's own reference tally
    let survey = graph.node("X").expect("X is in the graph");
    assert_eq!(survey.reference_count, 2);
}

#[test]
fn topology_does_not_depend_on_spawn_positions() {
    let corpus = papers(
        r#"[
            {"id": "P1", "title": "Graph neural networks for molecules", "concepts": "chemistry, machine learning", "references": "P2"},
            {"id": "P2", "title": "Message passing neural networks", "concepts": "machine learning, chemistry"},
            {"id": "P3", "title": "Neural networks for molecules graph", "concepts": "statistics"},
            {"id": "P4", "title": "Medieval trade routes"}
        ]"#,
    );

    let first = build(&corpus, 11);
    let second = build(&corpus, 99);
    assert_eq!(first.links, second.links);
    assert_ne!(
        first.nodes[0].position, second.nodes[0].position,
        "different seeds should scatter nodes differently"
    );
}

#[test]
fn self_citation_is_kept_as_a_reference_link() {
    let corpus = papers(r#"[{"id": "X", "title": "Self cite", "references": "X"}]"#);

    let graph = build(&corpus, 2);
    let references = graph
        .links
        .iter()
        .filter(|link| link.kind == LinkKind::Reference)
        .collect::<Vec<_>>();
    assert_eq!(references.len(), 1);
    assert_eq!((references[0].source.as_str(), references[0].target.as_str()), ("X", "X"));
    assert_eq!(graph.endpoints(references[0]), Some((0, 0)));
}

#[test]
fn every_link_resolves_to_known_nodes() {
    let corpus = papers(
        r#"[
            {"id": "A", "title": "Sparse attention transformers", "concepts": "nlp, deep learning", "references": "B; C; UNKNOWN"},
            {"id": "B", "title": "Efficient sparse attention", "concepts": "nlp, deep learning", "references": "A"},
            {"id": "C", "title": "Attention transformers explained", "concepts": "deep learning"},
            {"id": "A", "title": "Duplicate record"}
        ]"#,
    );

    let graph = build(&corpus, 3);
    assert!(!graph.links.is_empty());
    for link in &graph.links {
        let (source, target) = graph.endpoints(link).expect("endpoints exist");
        assert!(source < graph.node_count() && target < graph.node_count());
        // the duplicate "A" record is never paired with the first one
        assert_ne!(link.source, link.target, "{link:?}");
    }
    assert_eq!(graph.index_of("A"), Some(0));
    for node in &graph.nodes {
        assert!(node.position.is_some());
    }
}
