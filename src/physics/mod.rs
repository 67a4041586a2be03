//! Layout engines that move graph nodes between frames.
//!
//! The viewport only talks to [`Simulation`]; [`ForceSimulation`] is the
//! default Barnes-Hut spring layout.

mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use serde::Deserialize;
use tracing::debug;

use crate::graph::{GraphData, LinkKind};
use crate::util::stable_pair;
use crate::viewport::NodeSizing;

use forces::{Collision, Repulsion, collision_on, repulsion_on, spring_between};
use quadtree::QuadTree;

const BARNES_HUT_THETA: f32 = 0.72;
const REPULSION_BASE: f32 = 900_000.0;
const REPULSION_SOFTENING: f32 = 2_500.0;
const SPRING_BASE: f32 = 0.05;
const SPRING_DAMPING: f32 = 0.22;
const COLLISION_BASE: f32 = 1.6;
const COLLISION_SPACING: f32 = 2.5;
const CENTER_PULL: f32 = 0.0011;
const FORCE_TO_VELOCITY: f32 = 0.055;

const SIMILAR_REST_LENGTH: f32 = 250.0;
const REFERENCE_REST_LENGTH: f32 = 450.0;
const REST_LENGTH_VARIANCE: f32 = 200.0;
const SIMILAR_STIFFNESS: f32 = 0.4;
const REFERENCE_STIFFNESS: f32 = 0.15;
const STIFFNESS_VARIANCE: f32 = 0.2;

/// Half-width of the square unplaced nodes are dropped into.
const PLACEMENT_EXTENT: f32 = 1_200.0;

/// Moves node positions forward in time. The sole writer of
/// `GraphNode::position` once a graph is loaded.
pub trait Simulation {
    /// Called whenever the viewport receives a new graph.
    fn load(&mut self, graph: &GraphData);

    /// Advances by `dt` seconds. Returns whether anything is still moving.
    fn advance(&mut self, graph: &mut GraphData, dt: f32) -> bool;

    fn configure(&mut self, _config: &PhysicsConfig) {}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub enabled: bool,
    pub intensity: f32,
    pub repulsion: f32,
    pub spring: f32,
    pub collision: f32,
    pub velocity_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 1.0,
            repulsion: 1.0,
            spring: 1.0,
            collision: 1.0,
            velocity_damping: 0.9,
        }
    }
}

impl PhysicsConfig {
    pub const INTENSITY_RANGE: std::ops::RangeInclusive<f32> = 0.2..=2.5;
    pub const REPULSION_RANGE: std::ops::RangeInclusive<f32> = 0.25..=2.6;
    pub const SPRING_RANGE: std::ops::RangeInclusive<f32> = 0.2..=2.2;
    pub const COLLISION_RANGE: std::ops::RangeInclusive<f32> = 0.2..=2.0;
    pub const DAMPING_RANGE: std::ops::RangeInclusive<f32> = 0.78..=0.97;
}

fn clamp_to(value: f32, range: &std::ops::RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

#[derive(Clone, Copy, Debug)]
struct Spring {
    from: usize,
    to: usize,
    rest_length: f32,
    stiffness: f32,
}

impl Spring {
    /// Rest length and stiffness depend on the link kind, with a stable
    /// per-link jitter so the layout does not settle into rings.
    fn new(from: usize, to: usize, kind: LinkKind, key: &str) -> Self {
        let (rest_length, stiffness) = match kind {
            LinkKind::Similar { .. } => (SIMILAR_REST_LENGTH, SIMILAR_STIFFNESS),
            LinkKind::Reference => (REFERENCE_REST_LENGTH, REFERENCE_STIFFNESS),
        };
        let (jitter_length, jitter_stiffness) = stable_pair(key);

        Self {
            from,
            to,
            rest_length: rest_length + (jitter_length + 1.0) * 0.5 * REST_LENGTH_VARIANCE,
            stiffness: stiffness + (jitter_stiffness + 1.0) * 0.5 * STIFFNESS_VARIANCE,
        }
    }
}

#[derive(Default)]
struct Scratch {
    positions: Vec<Vec2>,
    forces: Vec<Vec2>,
}

pub struct ForceSimulation {
    config: PhysicsConfig,
    sizing: NodeSizing,
    velocities: Vec<Vec2>,
    radii: Vec<f32>,
    springs: Vec<Spring>,
    scratch: Scratch,
}

impl ForceSimulation {
    pub fn new(config: PhysicsConfig, sizing: NodeSizing) -> Self {
        Self {
            config,
            sizing,
            velocities: Vec::new(),
            radii: Vec::new(),
            springs: Vec::new(),
            scratch: Scratch::default(),
        }
    }

    fn sync_len(&mut self, graph: &GraphData) {
        let node_count = graph.node_count();
        if self.velocities.len() != node_count {
            self.velocities.resize(node_count, Vec2::ZERO);
        }
        if self.radii.len() != node_count {
            self.radii = graph
                .nodes
                .iter()
                .map(|node| self.sizing.base_radius(node.citation_count))
                .collect();
        }
    }
}

/// Drops nodes without a position at a point derived from their id.
fn place_unpositioned(graph: &mut GraphData) -> bool {
    let mut placed = false;
    for node in &mut graph.nodes {
        if node.position.is_none() {
            let (x, y) = stable_pair(&node.id);
            node.position = Some(vec2(x, y) * PLACEMENT_EXTENT);
            placed = true;
        }
    }
    placed
}

impl Simulation for ForceSimulation {
    fn load(&mut self, graph: &GraphData) {
        self.velocities = vec![Vec2::ZERO; graph.node_count()];
        self.radii.clear();
        self.sync_len(graph);

        self.springs = graph
            .links
            .iter()
            .filter_map(|link| {
                let (from, to) = graph.endpoints(link)?;
                (from != to).then(|| {
                    let key = format!("{}>{}", link.source, link.target);
                    Spring::new(from, to, link.kind, &key)
                })
            })
            .collect();

        debug!(
            nodes = graph.node_count(),
            springs = self.springs.len(),
            "physics loaded graph"
        );
    }

    fn configure(&mut self, config: &PhysicsConfig) {
        self.config = config.clone();
    }

    fn advance(&mut self, graph: &mut GraphData, dt: f32) -> bool {
        let placed = place_unpositioned(graph);
        let node_count = graph.node_count();
        if !self.config.enabled || node_count < 2 {
            return placed;
        }
        self.sync_len(graph);

        let config = &self.config;
        let intensity = clamp_to(config.intensity, &PhysicsConfig::INTENSITY_RANGE);
        let repulsion = Repulsion {
            strength: REPULSION_BASE
                * intensity
                * clamp_to(config.repulsion, &PhysicsConfig::REPULSION_RANGE),
            softening: REPULSION_SOFTENING,
            theta: BARNES_HUT_THETA,
        };
        let spring_scale = SPRING_BASE
            * intensity
            * clamp_to(config.spring, &PhysicsConfig::SPRING_RANGE);
        let max_radius = self.radii.iter().copied().fold(0.0, f32::max);
        let collision = Collision {
            strength: COLLISION_BASE
                * intensity
                * clamp_to(config.collision, &PhysicsConfig::COLLISION_RANGE),
            spacing: COLLISION_SPACING,
            max_radius,
        };
        let damping = clamp_to(
            config.velocity_damping - intensity * 0.015,
            &PhysicsConfig::DAMPING_RANGE,
        );
        let time_scale = (dt * 60.0).clamp(0.25, 3.0);
        let damping_factor = damping.powf(time_scale);

        let Scratch { positions, forces } = &mut self.scratch;
        positions.clear();
        positions.extend(
            graph
                .nodes
                .iter()
                .map(|node| node.position.unwrap_or(Vec2::ZERO)),
        );
        forces.clear();
        forces.resize(node_count, Vec2::ZERO);

        if let Some(tree) = QuadTree::build(positions) {
            for (index, force) in forces.iter_mut().enumerate() {
                *force += repulsion_on(&tree, index, positions, repulsion);
                *force += collision_on(&tree, index, positions, &self.radii, collision);
            }
        }

        for spring in &self.springs {
            if spring.from >= node_count || spring.to >= node_count {
                continue;
            }

            let pull = spring_between(
                (positions[spring.from], self.velocities[spring.from]),
                (positions[spring.to], self.velocities[spring.to]),
                spring.rest_length,
                spring.stiffness * spring_scale,
                SPRING_DAMPING,
            );
            forces[spring.from] += pull;
            forces[spring.to] -= pull;
        }

        for (force, position) in forces.iter_mut().zip(positions.iter()) {
            *force -= *position * CENTER_PULL * intensity;
        }

        let max_force = 165.0 + intensity * 90.0;
        let max_speed = 11.0 + intensity * 15.0;
        let mut moving = false;
        let mut mean_velocity = Vec2::ZERO;
        for (index, force) in forces.iter().enumerate() {
            let force_length = force.length();
            let force = if force_length > max_force {
                *force * (max_force / force_length)
            } else {
                *force
            };

            let mut velocity =
                (self.velocities[index] + force * (FORCE_TO_VELOCITY * time_scale)) * damping_factor;
            let speed = velocity.length();
            if speed > max_speed {
                velocity *= max_speed / speed;
            }
            if speed < 0.02 && force_length < 0.08 {
                velocity = Vec2::ZERO;
            }

            moving |= velocity.length_sq() > 1e-6;
            mean_velocity += velocity;
            self.velocities[index] = velocity;
            graph.nodes[index].position = Some(positions[index] + velocity * time_scale);
        }

        // Drift of the whole layout reads as camera motion; remove it.
        mean_velocity /= node_count as f32;
        if mean_velocity.length_sq() > 1e-6 {
            for velocity in &mut self.velocities {
                *velocity -= mean_velocity;
            }
        }

        moving || placed
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::graph::build_graph_with_rng;
    use crate::papers::PaperRecord;

    fn paper(id: &str, concepts: &str, references: &str) -> PaperRecord {
        PaperRecord {
            id: id.to_owned(),
            title: format!("Paper {id}"),
            concepts: Some(concepts.to_owned()),
            references: Some(references.to_owned()),
            ..Default::default()
        }
    }

    fn sample_graph() -> GraphData {
        let papers = [
            paper("A", "graphs, physics", "B"),
            paper("B", "graphs, physics", ""),
            paper("C", "", "A"),
            paper("D", "optics", ""),
        ];
        build_graph_with_rng(&papers, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn similar_links_rest_shorter_than_references() {
        let similar = Spring::new(0, 1, LinkKind::Similar { strength: 1.0 }, "A>B");
        let reference = Spring::new(0, 1, LinkKind::Reference, "A>B");
        assert!(similar.rest_length >= 250.0 && similar.rest_length <= 450.0);
        assert!(reference.rest_length >= 450.0 && reference.rest_length <= 650.0);
        assert!(similar.stiffness > reference.stiffness);
    }

    #[test]
    fn advancing_moves_nodes_and_keeps_them_finite() {
        let mut graph = sample_graph();
        let before = graph.nodes.iter().map(|node| node.position).collect::<Vec<_>>();

        let mut simulation = ForceSimulation::new(PhysicsConfig::default(), NodeSizing::default());
        simulation.load(&graph);
        assert!(simulation.advance(&mut graph, 1.0 / 60.0));
        for _ in 0..200 {
            simulation.advance(&mut graph, 1.0 / 60.0);
        }

        let after = graph.nodes.iter().map(|node| node.position).collect::<Vec<_>>();
        assert_ne!(before, after);
        assert!(after.iter().all(|position| position.is_some_and(|p| p.is_finite())));
    }

    #[test]
    fn unpositioned_nodes_get_a_stable_spot() {
        let mut first = sample_graph();
        let mut second = sample_graph();
        for graph in [&mut first, &mut second] {
            graph.nodes[2].position = None;
        }

        assert!(place_unpositioned(&mut first));
        assert!(place_unpositioned(&mut second));
        assert_eq!(first.nodes[2].position, second.nodes[2].position);
        assert!(!place_unpositioned(&mut first));
    }

    #[test]
    fn disabled_simulation_leaves_positions_alone() {
        let mut graph = sample_graph();
        let before = graph.nodes.iter().map(|node| node.position).collect::<Vec<_>>();
        let mut simulation = ForceSimulation::new(
            PhysicsConfig {
                enabled: false,
                ..PhysicsConfig::default()
            },
            NodeSizing::default(),
        );
        simulation.load(&graph);

        assert!(!simulation.advance(&mut graph, 1.0 / 60.0));
        let after = graph.nodes.iter().map(|node| node.position).collect::<Vec<_>>();
        assert_eq!(before, after);
    }
}
