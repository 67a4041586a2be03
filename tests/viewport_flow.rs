//! Viewport behaviour driven the way the canvas drives it, with a pinned
//! layout standing in for the force simulation.

use std::collections::HashMap;

use eframe::egui::{Pos2, Vec2, pos2, vec2};
use paper_atlas::config::ViewerConfig;
use paper_atlas::graph::{GraphData, build_graph_with_rng};
use paper_atlas::papers::parse_papers;
use paper_atlas::physics::Simulation;
use paper_atlas::viewport::{
    CameraState, ELLIPSIS, FocusOutcome, TextMeasure, Viewport, wrap_label,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SIZE: Vec2 = vec2(1000.0, 800.0);
const FRAME: f32 = 1.0 / 60.0;

/// Assigns fixed positions by id and never moves again.
struct PinnedLayout {
    positions: HashMap<String, Vec2>,
}

impl Simulation for PinnedLayout {
    fn load(&mut self, _graph: &GraphData) {}

    fn advance(&mut self, graph: &mut GraphData, _dt: f32) -> bool {
        for node in &mut graph.nodes {
            node.position = self.positions.get(&node.id).copied();
        }
        false
    }
}

/// Every character is half the font size wide.
struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * 0.5
    }
}

fn corpus_graph() -> GraphData {
    let papers = parse_papers(
        r#"[
            {"id": "W1", "title": "Attention Is All You Need", "cited_by_count": 900},
            {"id": "W2", "title": "Deep Residual Learning for Image Recognition", "cited_by_count": 700},
            {"id": "W3", "title": "Unplaced draft", "cited_by_count": 0}
        ]"#,
    )
    .expect("fixture parses");
    build_graph_with_rng(&papers, &mut StdRng::seed_from_u64(5))
}

fn viewport() -> Viewport {
    let positions = HashMap::from([
        ("W1".to_owned(), vec2(0.0, 0.0)),
        ("W2".to_owned(), vec2(300.0, -200.0)),
    ]);
    let mut viewport = Viewport::new(
        &ViewerConfig::default(),
        Box::new(PinnedLayout { positions }),
    );
    viewport.mount(SIZE);
    viewport.set_graph(corpus_graph());
    viewport.tick(0.0, FRAME);
    viewport
}

fn settle(viewport: &mut Viewport, now: f64) {
    viewport.tick(now, FRAME);
    assert!(!viewport.transition_running());
}

#[test]
fn reset_returns_to_mount_state_after_any_navigation() {
    let mut viewport = viewport();
    viewport.pan(vec2(-250.0, 40.0));
    viewport.zoom_by(3.3, Some(pos2(10.0, 10.0)));
    viewport.wheel_zoom(-1.0, pos2(700.0, 100.0));

    viewport.reset_camera();
    assert_eq!(viewport.camera().state(), CameraState::centered(SIZE));
    assert_eq!(viewport.camera().zoom(), 1.0);
    assert_eq!(viewport.camera().offset(), SIZE * 0.5);
}

#[test]
fn animated_reset_lands_exactly_and_clears_selection() {
    let mut viewport = viewport();
    assert!(viewport.focus_node(1, 0.0));
    settle(&mut viewport, 1.0);
    assert_eq!(viewport.selected(), Some(1));

    viewport.reset_view(2.0);
    assert_eq!(viewport.selected(), None);
    assert!(viewport.transition_running());
    viewport.tick(2.5, FRAME);
    assert_ne!(viewport.camera().state(), CameraState::centered(SIZE));

    settle(&mut viewport, 3.0);
    assert_eq!(viewport.camera().state(), CameraState::centered(SIZE));
}

#[test]
fn screen_and_world_coordinates_round_trip() {
    let mut viewport = viewport();
    viewport.pan(vec2(37.0, -12.5));
    viewport.zoom_by(2.25, Some(pos2(120.0, 640.0)));

    let camera = viewport.camera();
    for world in [vec2(0.0, 0.0), vec2(-812.5, 33.0), vec2(1500.0, 1500.0)] {
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!((back - world).length() < 1e-3, "{world:?} -> {back:?}");
    }
}

#[test]
fn click_on_a_node_selects_and_flies_to_it() {
    let mut viewport = viewport();
    let on_w2 = pos2(500.0 + 300.0, 400.0 - 200.0);

    assert_eq!(viewport.click(on_w2, 0.0), Some("W2".to_owned()));
    assert_eq!(viewport.selected(), Some(1));
    assert!(viewport.transition_running());

    settle(&mut viewport, 0.8);
    assert_eq!(
        viewport.camera().state(),
        CameraState::looking_at(vec2(300.0, -200.0), 1.5, SIZE)
    );
    assert_eq!(
        viewport.camera().world_to_screen(vec2(300.0, -200.0)),
        Pos2::new(500.0, 400.0)
    );
}

#[test]
fn click_on_empty_space_keeps_the_selection() {
    let mut viewport = viewport();
    viewport.focus_node(0, 0.0);
    settle(&mut viewport, 1.0);

    assert_eq!(viewport.click(pos2(3.0, 3.0), 1.5), None);
    assert_eq!(viewport.selected(), Some(0));
    assert!(!viewport.transition_running());
}

#[test]
fn title_focus_reports_found_and_missing() {
    let mut viewport = viewport();

    assert_eq!(
        viewport.focus_title("  deep residual learning ", 0.0),
        FocusOutcome::Focused("W2".to_owned())
    );
    assert_eq!(viewport.selected(), Some(1));

    assert_eq!(
        viewport.focus_title("protein folding", 0.1),
        FocusOutcome::NotFound
    );
    assert_eq!(viewport.selected(), Some(1));
}

#[test]
fn unplaced_nodes_are_selectable_but_not_drawn() {
    let mut viewport = viewport();
    let before = viewport.camera().state();

    assert_eq!(
        viewport.focus_title("Unplaced draft", 0.0),
        FocusOutcome::Focused("W3".to_owned())
    );
    assert!(!viewport.transition_running());
    assert_eq!(viewport.camera().state(), before);

    let scene = viewport.compose_frame(&FixedAdvance);
    assert!(scene.nodes.iter().all(|shape| shape.index != 2));
    assert_eq!(scene.nodes.len(), 2);
}

#[test]
fn teardown_stops_the_frame_loop() {
    let mut viewport = viewport();
    viewport.zoom_in(0.0);
    assert!(viewport.transition_running());

    viewport.teardown();
    assert!(!viewport.is_live());
    assert!(!viewport.tick(0.2, FRAME));
    assert!(!viewport.transition_running());
}

#[test]
fn long_titles_wrap_within_budget_and_end_in_ellipsis() {
    let font_size = 10.0;
    let max_width = 60.0;
    let title = "A remarkably long and winding title about graph layout heuristics";

    let lines = wrap_label(title, max_width, 2, font_size, &FixedAdvance);
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(FixedAdvance.text_width(line, font_size) <= max_width, "{line}");
    }
    assert!(lines[1].ends_with(ELLIPSIS));
    assert!(!lines[0].ends_with(ELLIPSIS));
}
