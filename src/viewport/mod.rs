//! Camera, hit-testing and per-frame scene composition for the graph canvas.
//!
//! [`Viewport`] owns everything the canvas needs between frames: the graph,
//! the camera and its running transition, the selection and the layout
//! engine. The egui layer feeds it input and paints the [`FrameScene`] it
//! returns.

mod camera;
mod cull;
mod frame;
mod hit;
mod label;
mod sizing;
mod transition;

use eframe::egui::{Pos2, Vec2};
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::graph::{GraphData, GraphNode, find_by_title};
use crate::physics::{PhysicsConfig, Simulation};

pub use camera::{Camera, CameraConfig, CameraState};
pub use cull::{circle_visible, edge_visible, segments_intersect};
pub use frame::{EdgeShape, FrameScene, LabelShape, NodeShape, OverlayShape};
pub use hit::pick;
pub use label::{ELLIPSIS, TextMeasure, wrap_label};
pub use sizing::{
    HOVERED_NODE_COLOR, LabelStyle, NodeSizing, SELECTED_NODE_COLOR, link_style, node_color,
};
pub use transition::{CameraTransition, ease_in_out_quad};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusOutcome {
    Focused(String),
    NotFound,
}

pub struct Viewport {
    graph: GraphData,
    camera: Camera,
    transition: CameraTransition,
    size: Vec2,
    selected: Option<usize>,
    hovered: Option<usize>,
    simulation: Box<dyn Simulation>,
    camera_config: CameraConfig,
    sizing: NodeSizing,
    labels: LabelStyle,
    live: bool,
}

impl Viewport {
    pub fn new(config: &ViewerConfig, simulation: Box<dyn Simulation>) -> Self {
        Self {
            graph: GraphData::default(),
            camera: Camera::from_config(&config.camera),
            transition: CameraTransition::Idle,
            size: Vec2::ZERO,
            selected: None,
            hovered: None,
            simulation,
            camera_config: config.camera.clone(),
            sizing: config.nodes.clone(),
            labels: config.labels.clone(),
            live: false,
        }
    }

    pub fn mount(&mut self, size: Vec2) {
        self.size = size;
        self.camera.reset(size);
        self.transition.cancel();
        self.live = true;
        info!(width = size.x, height = size.y, "viewport mounted");
    }

    pub fn resize(&mut self, size: Vec2) {
        if size != self.size {
            debug!(width = size.x, height = size.y, "viewport resized");
            self.size = size;
        }
    }

    pub fn teardown(&mut self) {
        if self.live {
            info!("viewport torn down");
        }
        self.transition.cancel();
        self.live = false;
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Replaces the graph wholesale. Camera, transition, selection and hover
    /// all start over.
    pub fn set_graph(&mut self, graph: GraphData) {
        self.graph = graph;
        self.simulation.load(&self.graph);
        self.reset_camera();
        self.selected = None;
        self.hovered = None;
        info!(
            nodes = self.graph.node_count(),
            links = self.graph.link_count(),
            "viewport graph replaced"
        );
    }

    pub fn graph(&self) -> &GraphData {
        &self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn transition_running(&self) -> bool {
        self.transition.is_running()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&GraphNode> {
        self.selected.and_then(|index| self.graph.nodes.get(index))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_node(&self) -> Option<&GraphNode> {
        self.hovered.and_then(|index| self.graph.nodes.get(index))
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&index| index < self.graph.node_count());
    }

    pub fn configure_physics(&mut self, config: &PhysicsConfig) {
        self.simulation.configure(config);
    }

    /// Immediate; cancels any running transition.
    pub fn pan(&mut self, delta: Vec2) {
        self.transition.cancel();
        self.camera.pan(delta);
    }

    /// Immediate; cancels any running transition.
    pub fn zoom_by(&mut self, factor: f32, anchor: Option<Pos2>) {
        self.transition.cancel();
        self.camera.zoom_by(factor, anchor);
    }

    /// One wheel notch towards `scroll`'s sign, keeping `anchor` fixed.
    pub fn wheel_zoom(&mut self, scroll: f32, anchor: Pos2) {
        if scroll == 0.0 || !scroll.is_finite() {
            return;
        }

        let factor = if scroll > 0.0 {
            self.camera_config.wheel_zoom_in
        } else {
            self.camera_config.wheel_zoom_out
        };
        self.zoom_by(factor, Some(anchor));
    }

    pub fn set_zoom(&mut self, zoom: f32, duration_ms: u64, now: f64) {
        let target = CameraState {
            offset: self.camera.offset(),
            zoom: self.camera.clamp_zoom(zoom),
        };
        self.move_camera(target, duration_ms, now);
    }

    pub fn center_on(&mut self, world: Vec2, duration_ms: u64, now: f64) {
        let target = CameraState::looking_at(world, self.camera.zoom(), self.size);
        self.move_camera(target, duration_ms, now);
    }

    pub fn reset_camera(&mut self) {
        self.transition.cancel();
        self.camera.reset(self.size);
    }

    pub fn zoom_in(&mut self, now: f64) {
        self.animate_zoom_step(self.camera_config.zoom_in_factor, now);
    }

    pub fn zoom_out(&mut self, now: f64) {
        self.animate_zoom_step(self.camera_config.zoom_out_factor, now);
    }

    /// Animated return to the mount state. Also drops the selection.
    pub fn reset_view(&mut self, now: f64) {
        let target = CameraState::centered(self.size);
        self.move_camera(target, self.camera_config.reset_duration_ms, now);
        self.selected = None;
        debug!("reset view");
    }

    /// Selects the node and flies the camera to it. A node with no position
    /// yet is selected without moving the camera.
    pub fn focus_node(&mut self, index: usize, now: f64) -> bool {
        let Some(node) = self.graph.nodes.get(index) else {
            return false;
        };

        self.selected = Some(index);
        let Some(position) = node.position else {
            debug!(id = %node.id, "focused node has no position yet");
            return true;
        };

        let zoom = self.camera.clamp_zoom(self.camera_config.focus_zoom);
        let target = CameraState::looking_at(position, zoom, self.size);
        debug!(id = %node.id, x = position.x, y = position.y, "focusing node");
        self.move_camera(target, self.camera_config.focus_duration_ms, now);
        true
    }

    pub fn focus_title(&mut self, query: &str, now: f64) -> FocusOutcome {
        let Some(index) = find_by_title(&self.graph.nodes, query) else {
            warn!(query, "no paper matches the requested title");
            return FocusOutcome::NotFound;
        };

        self.focus_node(index, now);
        FocusOutcome::Focused(self.graph.nodes[index].id.clone())
    }

    pub fn pick_at(&self, point: Pos2) -> Option<usize> {
        pick(
            &self.graph.nodes,
            &self.camera,
            self.size,
            &self.sizing,
            point,
        )
    }

    /// Updates the hovered node from a viewport-local pointer position.
    pub fn hover(&mut self, point: Option<Pos2>) -> Option<usize> {
        self.hovered = point.and_then(|point| self.pick_at(point));
        self.hovered
    }

    /// A hit selects and focuses the node and returns its id. A miss leaves
    /// the selection alone.
    pub fn click(&mut self, point: Pos2, now: f64) -> Option<String> {
        let index = self.pick_at(point)?;
        self.focus_node(index, now);
        Some(self.graph.nodes[index].id.clone())
    }

    /// Per-frame step: simulation first, then the camera transition.
    /// Returns whether another frame is needed to finish motion.
    pub fn tick(&mut self, now: f64, dt: f32) -> bool {
        if !self.live {
            return false;
        }

        let moving = self.simulation.advance(&mut self.graph, dt);
        if let Some(state) = self.transition.tick(now) {
            self.camera.set_state(state);
        }
        moving || self.transition.is_running()
    }

    pub fn compose_frame(&self, measure: &impl TextMeasure) -> FrameScene {
        frame::compose(
            &frame::FrameInputs {
                graph: &self.graph,
                camera: &self.camera,
                viewport_size: self.size,
                sizing: &self.sizing,
                labels: &self.labels,
                selected: self.selected,
                hovered: self.hovered,
            },
            measure,
        )
    }

    fn animate_zoom_step(&mut self, factor: f32, now: f64) {
        let center = (self.size * 0.5).to_pos2();
        let target = self.camera.zoomed_by(factor, Some(center));
        self.move_camera(target, self.camera_config.zoom_step_duration_ms, now);
    }

    fn move_camera(&mut self, target: CameraState, duration_ms: u64, now: f64) {
        if duration_ms == 0 {
            self.transition.cancel();
            self.camera.set_state(target);
            return;
        }

        self.transition
            .start(self.camera.state(), target, now, duration_ms);
    }
}
