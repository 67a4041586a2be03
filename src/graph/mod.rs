mod build;
mod search;
pub mod similarity;

use std::collections::HashMap;

use eframe::egui::Vec2;

pub use build::{SIMILARITY_SCAN_WARN_THRESHOLD, build_graph, build_graph_with_rng};
pub use search::{TITLE_PREFIX_CHARS, find_by_title, fuzzy_matches};

#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    pub influence: u64,
    pub citation_count: u64,
    pub reference_count: u64,
    pub year: Option<i32>,
    pub authors: Option<String>,
    pub concepts: Vec<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    /// World position. Owned by the simulation once it starts stepping;
    /// `None` until something places the node.
    pub position: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkKind {
    Reference,
    Similar { strength: f32 },
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Similar { .. } => "similar",
        }
    }

    pub fn strength(self) -> Option<f32> {
        match self {
            Self::Reference => None,
            Self::Similar { strength } => Some(strength),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub kind: LinkKind,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    index_by_id: HashMap<String, usize>,
}

impl GraphData {
    pub(crate) fn from_parts(
        nodes: Vec<GraphNode>,
        links: Vec<GraphLink>,
        index_by_id: HashMap<String, usize>,
    ) -> Self {
        Self {
            nodes,
            links,
            index_by_id,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).and_then(|index| self.nodes.get(index))
    }

    /// Resolves a link to node indices. Both endpoints exist by construction.
    pub fn endpoints(&self, link: &GraphLink) -> Option<(usize, usize)> {
        Some((self.index_of(&link.source)?, self.index_of(&link.target)?))
    }

    /// Links touching `id`, paired with the id on the other end.
    pub fn neighbors<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a GraphLink)> + 'a {
        self.links.iter().filter_map(move |link| {
            if link.source == id {
                Some((link.target.as_str(), link))
            } else if link.target == id {
                Some((link.source.as_str(), link))
            } else {
                None
            }
        })
    }
}
