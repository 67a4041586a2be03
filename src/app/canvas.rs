use eframe::egui::{self, Align2, CursorIcon, FontId, PointerButton, Sense, Stroke, Ui};

use super::ViewModel;
use super::render_utils::{PainterMeasure, SEARCH_MATCH_RING, draw_background};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = rect.min.to_vec2();
        let (now, frame_delta_seconds) = ui.input(|input| {
            (
                input.time,
                input.stable_dt.clamp(1.0 / 240.0, 1.0 / 20.0),
            )
        });

        if self.viewport.is_live() {
            self.viewport.resize(rect.size());
        } else {
            self.viewport.mount(rect.size());
            self.apply_pending_focus(now);
        }

        if response.hovered() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if let Some(pointer) = response.hover_pos()
                && scroll.abs() > f32::EPSILON
            {
                self.viewport.wheel_zoom(scroll, pointer - origin);
            }
        }
        if response.dragged_by(PointerButton::Primary)
            || response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            self.viewport.pan(response.drag_delta());
        }

        let hovered = self
            .viewport
            .hover(response.hover_pos().map(|pointer| pointer - origin));
        if response.clicked_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.viewport.click(pointer - origin, now);
        }

        let moving = self.viewport.tick(now, frame_delta_seconds);
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        let camera = self.viewport.camera();
        draw_background(&painter, rect, camera.offset(), camera.zoom());

        let scene = self
            .viewport
            .compose_frame(&PainterMeasure { painter: &painter });
        let matches = self
            .current_search_matches()
            .map(|cache| cache.matches.clone())
            .unwrap_or_default();

        for edge in &scene.edges {
            painter.line_segment(
                [edge.from + origin, edge.to + origin],
                Stroke::new(edge.width, edge.color),
            );
        }

        for node in &scene.nodes {
            let center = node.center + origin;
            painter.circle_filled(center, node.radius, node.fill);
            painter.circle_stroke(
                center,
                node.radius,
                Stroke::new(node.stroke_width, node.stroke_color),
            );
            if matches.contains(&node.index) {
                painter.circle_stroke(center, node.radius + 3.0, Stroke::new(2.0, SEARCH_MATCH_RING));
            }
        }

        for label in &scene.labels {
            let font = FontId::proportional(label.font_size);
            for (line_index, line) in label.lines.iter().enumerate() {
                let position = label.anchor + origin + egui::vec2(0.0, line_index as f32 * label.line_height);
                painter.text(position, Align2::CENTER_TOP, line, font.clone(), label.color);
            }
        }

        for overlay in &scene.overlays {
            painter.text(
                overlay.center + origin,
                Align2::CENTER_CENTER,
                overlay.text.as_str(),
                FontId::proportional(overlay.font_size),
                overlay.color,
            );
        }

        if let Some(node) = hovered.and_then(|index| self.viewport.graph().nodes.get(index)) {
            let year = node.year.map(|year| format!(" ({year})")).unwrap_or_default();
            let tooltip = format!(
                "{}{year}\ncitations: {}  references: {}",
                node.title, node.citation_count, node.reference_count
            );
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            response.on_hover_text_at_pointer(tooltip);
        }
    }
}
