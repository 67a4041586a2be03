//! Loading paper corpora from disk.

use std::io::Write;

use paper_atlas::graph::build_graph;
use paper_atlas::papers::load_papers;
use tempfile::NamedTempFile;

fn corpus_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_bare_array_files() {
    let file = corpus_file(
        r#"[
            {"id": "W1", "title": "First", "publication_year": 2019, "cited_by_count": 12,
             "concepts": "physics, optics", "doi": " 10.1000/xyz ", "primary_url": ""},
            {"id": "W2", "title": null, "open_access_url": "https://example.org/w2.pdf"}
        ]"#,
    );

    let papers = load_papers(file.path()).unwrap();
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].publication_year, Some(2019));
    assert_eq!(papers[0].concept_tags(), vec!["physics", "optics"]);
    assert_eq!(papers[0].url(), None);
    assert_eq!(papers[1].title, "");
    assert_eq!(papers[1].url(), Some("https://example.org/w2.pdf"));

    let graph = build_graph(&papers);
    assert_eq!(graph.nodes[0].doi.as_deref(), Some("10.1000/xyz"));
    assert_eq!(graph.nodes[0].influence, 12);
}

#[test]
fn loads_api_response_files() {
    let file = corpus_file(
        r#"{"papers": [{"id": "W9", "title": "Only"}, {"title": "no id"}, {"id": "  "}], "count": 3}"#,
    );

    let papers = load_papers(file.path()).unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].id, "W9");
}

#[test]
fn missing_and_malformed_files_are_errors() {
    let missing = load_papers(std::path::Path::new("/no/such/papers.json"));
    let message = format!("{:#}", missing.unwrap_err());
    assert!(message.contains("failed to read paper file"), "{message}");

    let broken = corpus_file("{\"papers\": [");
    assert!(load_papers(broken.path()).is_err());

    let wrong_shape = corpus_file("{\"papers\": 4}");
    assert!(load_papers(wrong_shape.path()).is_err());
}
