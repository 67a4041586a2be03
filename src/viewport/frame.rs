use eframe::egui::{Color32, Pos2, Rect, Vec2};

use crate::graph::GraphData;

use super::camera::Camera;
use super::cull::{circle_visible, edge_visible};
use super::label::{TextMeasure, wrap_label};
use super::sizing::{
    HOVERED_NODE_COLOR, LABEL_COLOR, LabelStyle, NODE_STROKE_COLOR, NODE_STROKE_WIDTH,
    NodeSizing, OVERLAY_TEXT_COLOR, SELECTED_NODE_COLOR, link_style, node_color,
};

const EDGE_CULL_PADDING: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
    pub from: Pos2,
    pub to: Pos2,
    pub color: Color32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
    pub index: usize,
    pub center: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

/// Lines are laid out top down, each centered horizontally on `anchor.x`.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
    pub index: usize,
    pub anchor: Pos2,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub color: Color32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayShape {
    pub index: usize,
    pub center: Pos2,
    pub text: String,
    pub font_size: f32,
    pub color: Color32,
}

/// Everything one frame paints, in paint order. Coordinates are
/// viewport-local.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameScene {
    pub edges: Vec<EdgeShape>,
    pub nodes: Vec<NodeShape>,
    pub labels: Vec<LabelShape>,
    pub overlays: Vec<OverlayShape>,
}

pub(super) struct FrameInputs<'a> {
    pub graph: &'a GraphData,
    pub camera: &'a Camera,
    pub viewport_size: Vec2,
    pub sizing: &'a NodeSizing,
    pub labels: &'a LabelStyle,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
}

pub(super) fn compose(inputs: &FrameInputs<'_>, measure: &impl TextMeasure) -> FrameScene {
    let FrameInputs {
        graph,
        camera,
        viewport_size,
        sizing,
        labels,
        selected,
        hovered,
    } = *inputs;

    let viewport = Rect::from_min_size(Pos2::ZERO, viewport_size);
    let zoom = camera.zoom();
    let mut scene = FrameScene::default();

    for link in &graph.links {
        let Some((source, target)) = graph.endpoints(link) else {
            continue;
        };
        let (Some(from), Some(to)) = (graph.nodes[source].position, graph.nodes[target].position)
        else {
            continue;
        };

        let from = camera.world_to_screen(from);
        let to = camera.world_to_screen(to);
        if !edge_visible(viewport, from, to, EDGE_CULL_PADDING) {
            continue;
        }

        let (color, width) = link_style(link.kind);
        scene.edges.push(EdgeShape {
            from,
            to,
            color,
            width,
        });
    }

    let show_labels = labels.visible_at(zoom);
    let font_size = labels.font_size(zoom);

    for (index, node) in graph.nodes.iter().enumerate() {
        let Some(position) = node.position else {
            continue;
        };

        let center = camera.world_to_screen(position);
        let radius = sizing.node_radius(node.citation_count, zoom, viewport_size);
        if !circle_visible(viewport, center, radius) {
            continue;
        }

        let fill = if selected == Some(index) {
            SELECTED_NODE_COLOR
        } else if hovered == Some(index) {
            HOVERED_NODE_COLOR
        } else {
            node_color(node.influence)
        };

        scene.nodes.push(NodeShape {
            index,
            center,
            radius,
            fill,
            stroke_color: NODE_STROKE_COLOR,
            stroke_width: NODE_STROKE_WIDTH,
        });

        if show_labels {
            let lines = wrap_label(
                &node.title,
                labels.wrap_width(radius),
                labels.max_lines,
                font_size,
                measure,
            );
            if !lines.is_empty() {
                scene.labels.push(LabelShape {
                    index,
                    anchor: center + Vec2::new(0.0, labels.first_line_offset(radius)),
                    lines,
                    font_size,
                    line_height: labels.line_height(font_size),
                    color: LABEL_COLOR,
                });
            }
        }

        if sizing.shows_citation_overlay(zoom, node.citation_count) {
            scene.overlays.push(OverlayShape {
                index,
                center,
                text: node.citation_count.to_string(),
                font_size: sizing.overlay_font_size(radius),
                color: OVERLAY_TEXT_COLOR,
            });
        }
    }

    scene
}
