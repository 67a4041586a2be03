use eframe::egui::{Pos2, Vec2};

use crate::graph::GraphNode;

use super::camera::Camera;
use super::sizing::NodeSizing;

/// Node under `point`, if any.
///
/// Nodes are drawn in insertion order, so scanning backwards returns the disc
/// that is visually on top when several overlap.
pub fn pick(
    nodes: &[GraphNode],
    camera: &Camera,
    viewport_size: Vec2,
    sizing: &NodeSizing,
    point: Pos2,
) -> Option<usize> {
    nodes.iter().enumerate().rev().find_map(|(index, node)| {
        let center = camera.world_to_screen(node.position?);
        let radius = sizing.node_radius(node.citation_count, camera.zoom(), viewport_size);
        (center.distance(point) < radius).then_some(index)
    })
}
