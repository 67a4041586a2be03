use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::papers::PaperRecord;

use super::similarity::{PaperFeatures, link_decision};
use super::{GraphData, GraphLink, GraphNode, LinkKind};

/// Above this many papers the all-pairs similarity scan gets slow enough to
/// notice. Callers are expected to cap or pre-filter the corpus.
pub const SIMILARITY_SCAN_WARN_THRESHOLD: usize = 5_000;

const SPAWN_RADIUS_MIN: f32 = 300.0;
const SPAWN_RADIUS_MAX: f32 = 1_800.0;
const SPAWN_NOISE: f32 = 200.0;
const LOGGED_SIMILARITY_SAMPLES: usize = 5;

pub fn build_graph(papers: &[PaperRecord]) -> GraphData {
    build_graph_with_rng(papers, &mut rand::thread_rng())
}

pub fn build_graph_with_rng<R: Rng + ?Sized>(papers: &[PaperRecord], rng: &mut R) -> GraphData {
    if papers.len() > SIMILARITY_SCAN_WARN_THRESHOLD {
        warn!(
            papers = papers.len(),
            threshold = SIMILARITY_SCAN_WARN_THRESHOLD,
            "corpus exceeds the all-pairs similarity budget; graph build will be slow"
        );
    }

    let nodes = papers
        .iter()
        .map(|paper| make_node(paper, spawn_position(rng)))
        .collect::<Vec<_>>();

    let mut index_by_id = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        index_by_id.entry(node.id.clone()).or_insert(index);
    }

    let mut links = collect_reference_links(papers, &index_by_id);
    let reference_count = links.len();
    collect_similarity_links(papers, &mut links);

    info!(
        nodes = nodes.len(),
        reference_links = reference_count,
        similarity_links = links.len() - reference_count,
        "built paper graph"
    );

    GraphData::from_parts(nodes, links, index_by_id)
}

fn spawn_position<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
    let noise = vec2(
        rng.gen_range(-SPAWN_NOISE..=SPAWN_NOISE),
        rng.gen_range(-SPAWN_NOISE..=SPAWN_NOISE),
    );
    vec2(angle.cos(), angle.sin()) * radius + noise
}

fn make_node(paper: &PaperRecord, position: Vec2) -> GraphNode {
    let reference_count = paper.reference_ids().len() as u64;

    GraphNode {
        id: paper.id.clone(),
        title: paper.title.trim().to_owned(),
        influence: paper.cited_by_count + reference_count,
        citation_count: paper.cited_by_count,
        reference_count,
        year: paper.publication_year,
        authors: paper
            .authors
            .as_deref()
            .map(str::trim)
            .filter(|authors| !authors.is_empty())
            .map(str::to_owned),
        concepts: paper
            .concept_tags()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        doi: paper
            .doi
            .as_deref()
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
            .map(str::to_owned),
        url: paper.url().map(str::to_owned),
        position: Some(position),
    }
}

fn collect_reference_links(
    papers: &[PaperRecord],
    index_by_id: &HashMap<String, usize>,
) -> Vec<GraphLink> {
    let mut links = Vec::new();
    for paper in papers {
        for target in paper.reference_ids() {
            if !index_by_id.contains_key(target) {
                continue;
            }

            links.push(GraphLink {
                source: paper.id.clone(),
                target: target.to_owned(),
                kind: LinkKind::Reference,
            });
        }
    }
    links
}

fn collect_similarity_links(papers: &[PaperRecord], links: &mut Vec<GraphLink>) {
    let features = papers
        .iter()
        .map(PaperFeatures::from_record)
        .collect::<Vec<_>>();

    let mut emitted = 0usize;
    for (i, first) in features.iter().enumerate() {
        for (j, second) in features.iter().enumerate().skip(i + 1) {
            if papers[i].id == papers[j].id {
                continue;
            }
            let decision = link_decision(first, second);
            if !decision.should_link {
                continue;
            }

            links.push(GraphLink {
                source: papers[i].id.clone(),
                target: papers[j].id.clone(),
                kind: LinkKind::Similar {
                    strength: decision.strength,
                },
            });

            emitted += 1;
            if emitted <= LOGGED_SIMILARITY_SAMPLES {
                debug!(
                    source = %papers[i].id,
                    target = %papers[j].id,
                    reason = decision.reason.map(|reason| reason.label()).unwrap_or("none"),
                    strength = decision.strength,
                    "similarity link"
                );
            }
        }
    }
}
