use eframe::egui::{Color32, Vec2};
use serde::Deserialize;

use crate::graph::LinkKind;

pub const HOVERED_NODE_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
pub const SELECTED_NODE_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
pub const NODE_STROKE_COLOR: Color32 = Color32::WHITE;
pub const NODE_STROKE_WIDTH: f32 = 2.0;
pub const LABEL_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 217);
pub const OVERLAY_TEXT_COLOR: Color32 = Color32::WHITE;

const NODE_HUE: f32 = 210.0;
const INFLUENCE_SATURATION: f32 = 100.0;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeSizing {
    pub base_size: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_screen_radius: f32,
    /// Fraction of the shorter viewport side a node may cover.
    pub viewport_cap_fraction: f32,
    pub hard_cap: f32,
    pub citation_overlay_zoom: f32,
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self {
            base_size: 5.0,
            min_radius: 5.0,
            max_radius: 18.0,
            min_screen_radius: 2.0,
            viewport_cap_fraction: 0.03,
            hard_cap: 26.0,
            citation_overlay_zoom: 3.0,
        }
    }
}

impl NodeSizing {
    pub fn base_radius(&self, citation_count: u64) -> f32 {
        (self.base_size + (citation_count as f32).sqrt())
            .clamp(self.min_radius, self.max_radius.max(self.min_radius))
    }

    /// Radius in pixels. Grows slower than the zoom so zooming in spreads
    /// nodes apart instead of inflating them.
    pub fn screen_radius(&self, base_radius: f32, zoom: f32, viewport_size: Vec2) -> f32 {
        let zoom = zoom.max(0.1);
        let raw = base_radius * (1.0 / zoom).powf(0.5);
        let viewport_cap = self.viewport_cap_fraction * viewport_size.x.min(viewport_size.y);
        raw.min(viewport_cap).min(self.hard_cap).max(self.min_screen_radius)
    }

    pub fn node_radius(&self, citation_count: u64, zoom: f32, viewport_size: Vec2) -> f32 {
        self.screen_radius(self.base_radius(citation_count), zoom, viewport_size)
    }

    pub fn shows_citation_overlay(&self, zoom: f32, citation_count: u64) -> bool {
        zoom > self.citation_overlay_zoom && citation_count >= 1
    }

    pub fn overlay_font_size(&self, radius: f32) -> f32 {
        (radius * 0.5).min(12.0)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelStyle {
    pub min_zoom: f32,
    pub base_font_size: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub max_lines: usize,
    pub min_wrap_width: f32,
    pub wrap_radius_factor: f32,
    pub line_height_factor: f32,
    pub gap: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            min_zoom: 0.9,
            base_font_size: 11.0,
            min_font_size: 9.0,
            max_font_size: 18.0,
            max_lines: 2,
            min_wrap_width: 80.0,
            wrap_radius_factor: 2.4,
            line_height_factor: 1.25,
            gap: 6.0,
        }
    }
}

impl LabelStyle {
    pub fn visible_at(&self, zoom: f32) -> bool {
        zoom >= self.min_zoom
    }

    pub fn font_size(&self, zoom: f32) -> f32 {
        let max = self.max_font_size.max(self.min_font_size);
        (self.base_font_size * zoom).clamp(self.min_font_size, max)
    }

    pub fn wrap_width(&self, radius: f32) -> f32 {
        self.min_wrap_width.max(radius * self.wrap_radius_factor)
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }

    /// Vertical distance from the node center to the top of the first line.
    pub fn first_line_offset(&self, radius: f32) -> f32 {
        radius + self.gap
    }
}

/// Blue ramp that darkens with influence and saturates at 100.
pub fn node_color(influence: u64) -> Color32 {
    let level = (influence as f32 / 100.0).min(1.0);
    hsl(NODE_HUE, INFLUENCE_SATURATION, 75.0 - 40.0 * level)
}

pub fn link_style(kind: LinkKind) -> (Color32, f32) {
    match kind {
        LinkKind::Similar { strength } => {
            let strength = strength.clamp(0.0, 1.0);
            let grey = (200.0 - 150.0 * strength).round() as u8;
            let alpha = ((0.15 + 0.4 * strength) * 255.0).round() as u8;
            (
                Color32::from_rgba_unmultiplied(grey, grey, grey, alpha),
                1.0 + 2.0 * strength,
            )
        }
        LinkKind::Reference => (Color32::from_rgba_unmultiplied(120, 120, 120, 77), 1.0),
    }
}

/// `hue` in degrees, `saturation` and `lightness` in percent.
fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |value: f32| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn base_radius_grows_with_citations_and_clamps() {
        let sizing = NodeSizing::default();
        assert_eq!(sizing.base_radius(0), 5.0);
        assert_eq!(sizing.base_radius(16), 9.0);
        assert_eq!(sizing.base_radius(10_000), 18.0);
    }

    #[test]
    fn screen_radius_shrinks_when_zooming_in_and_respects_caps() {
        let sizing = NodeSizing::default();
        let size = vec2(1_000.0, 800.0);
        assert_eq!(sizing.screen_radius(18.0, 1.0, size), 18.0);
        assert_eq!(sizing.screen_radius(16.0, 4.0, size), 8.0);
        // 0.03 * 800 = 24, below the hard cap
        assert!((sizing.screen_radius(18.0, 0.1, size) - 24.0).abs() < 1e-3);
        assert_eq!(sizing.screen_radius(18.0, 0.1, vec2(4_000.0, 4_000.0)), 26.0);
        assert_eq!(sizing.screen_radius(5.0, 5.0, vec2(10.0, 10.0)), 2.0);
    }

    #[test]
    fn label_metrics() {
        let labels = LabelStyle::default();
        assert!(!labels.visible_at(0.89));
        assert!(labels.visible_at(0.9));
        assert_eq!(labels.font_size(0.5), 9.0);
        assert_eq!(labels.font_size(1.0), 11.0);
        assert_eq!(labels.font_size(3.0), 18.0);
        assert_eq!(labels.wrap_width(10.0), 80.0);
        assert!((labels.wrap_width(50.0) - 120.0).abs() < 1e-3);
        assert_eq!(labels.first_line_offset(10.0), 16.0);
    }

    #[test]
    fn node_color_darkens_with_influence() {
        assert_eq!(node_color(0), Color32::from_rgb(128, 191, 255));
        assert_eq!(node_color(100), node_color(5_000));
        assert!(node_color(100).b() < node_color(0).b());
    }

    #[test]
    fn stronger_similarity_draws_darker_and_wider() {
        let (weak, weak_width) = link_style(LinkKind::Similar { strength: 0.5 });
        let (strong, strong_width) = link_style(LinkKind::Similar { strength: 1.0 });
        assert!(strong_width > weak_width);
        assert_eq!(strong_width, 3.0);
        assert!(strong.a() > weak.a());
        assert_eq!(link_style(LinkKind::Reference).1, 1.0);
    }

    #[test]
    fn citation_overlay_needs_deep_zoom_and_a_citation() {
        let sizing = NodeSizing::default();
        assert!(!sizing.shows_citation_overlay(3.0, 10));
        assert!(sizing.shows_citation_overlay(3.1, 1));
        assert!(!sizing.shows_citation_overlay(4.0, 0));
        assert_eq!(sizing.overlay_font_size(30.0), 12.0);
    }
}
