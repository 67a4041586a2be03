use std::ops::RangeInclusive;

use eframe::egui::{self, Key, Response, Ui};

use paper_atlas::graph::fuzzy_matches;
use paper_atlas::physics::PhysicsConfig;
use paper_atlas::truncate_chars;
use paper_atlas::viewport::FocusOutcome;

use super::super::{SearchMatchCache, ViewModel};

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;
const MATCH_ROWS: usize = 12;
const MATCH_TITLE_CHARS: usize = 48;

#[derive(Clone, Copy, Default)]
struct SliderKeyHold {
    secs: f32,
    direction: i8,
}

/// Arrow keys nudge a focused slider, faster the longer they are held.
fn nudge_with_arrow_keys(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    range: &RangeInclusive<f32>,
) -> bool {
    let state_id = response.id.with("arrow_key_hold");
    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHold::default()));
        return false;
    }

    let (delta_time, direction) = ui.input(|input| {
        let up = input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp);
        let down = input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown);
        (input.stable_dt.min(0.1), up as i8 - down as i8)
    });

    let mut hold = ui
        .ctx()
        .data(|data| data.get_temp::<SliderKeyHold>(state_id).unwrap_or_default());
    if direction == 0 || direction != hold.direction {
        hold = SliderKeyHold {
            secs: 0.0,
            direction,
        };
    }
    hold.secs += delta_time;
    ui.ctx().data_mut(|data| data.insert_temp(state_id, hold));
    if direction == 0 {
        return false;
    }

    let ramp = hold.secs * SLIDER_KEY_ACCEL_PER_SEC;
    let speed = SLIDER_KEY_BASE_RATE * (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX);
    let step = ((range.end() - range.start()) / 200.0).max(0.0005);

    let previous = *value;
    *value = (*value + direction as f32 * step * speed * delta_time)
        .clamp(*range.start(), *range.end());
    ui.ctx().request_repaint();
    (*value - previous).abs() > f32::EPSILON
}

fn physics_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    text: &str,
    hint: &str,
) -> bool {
    let slider = ui
        .add(
            egui::Slider::new(&mut *value, range.clone())
                .text(text)
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text(hint);
    if slider.hovered() {
        slider.request_focus();
    }
    slider.changed() | nudge_with_arrow_keys(ui, &slider, value, &range)
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let now = ui.input(|input| input.time);

        ui.heading("View");
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Zoom in").clicked() {
                self.viewport.zoom_in(now);
            }
            if ui.button("Zoom out").clicked() {
                self.viewport.zoom_out(now);
            }
            if ui
                .button("Reset view")
                .on_hover_text("Return to the starting camera and clear the selection.")
                .clicked()
            {
                self.viewport.reset_view(now);
            }
        });

        ui.add_space(8.0);
        ui.label("Find paper by title")
            .on_hover_text("Typing highlights fuzzy matches; Enter flies to the best title match.");
        let search_response = ui.text_edit_singleline(&mut self.search);
        if search_response.changed() {
            self.search_status = None;
        }
        if search_response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
            self.search_status = match self.viewport.focus_title(&self.search, now) {
                FocusOutcome::Focused(_) => None,
                FocusOutcome::NotFound => Some(format!("No paper titled \"{}\"", self.search.trim())),
            };
        }
        if let Some(status) = &self.search_status {
            ui.colored_label(ui.visuals().warn_fg_color, status);
        }

        self.draw_search_matches(ui, now);

        ui.separator();
        self.draw_physics_controls(ui);
    }

    /// Fuzzy matches for the current query, recomputed only when it changes.
    pub(in crate::app) fn current_search_matches(&mut self) -> Option<&SearchMatchCache> {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_matches = None;
            return None;
        }

        let stale = self
            .search_matches
            .as_ref()
            .is_none_or(|cached| cached.query != query);
        if stale {
            self.search_matches = Some(SearchMatchCache {
                query: query.to_owned(),
                matches: fuzzy_matches(&self.viewport.graph().nodes, query),
            });
        }
        self.search_matches.as_ref()
    }

    fn draw_search_matches(&mut self, ui: &mut Ui, now: f64) {
        let Some(cache) = self.current_search_matches() else {
            return;
        };

        let mut rows = cache.matches.iter().copied().collect::<Vec<_>>();
        rows.sort_unstable();
        let total = rows.len();
        rows.truncate(MATCH_ROWS);

        ui.small(format!("{total} matching papers"));
        let mut clicked = None;
        for index in rows {
            let Some(node) = self.viewport.graph().nodes.get(index) else {
                continue;
            };
            let title = truncate_chars(&node.title, MATCH_TITLE_CHARS);
            if ui.link(title).on_hover_text(node.title.as_str()).clicked() {
                clicked = Some(index);
            }
        }

        if let Some(index) = clicked {
            self.viewport.focus_node(index, now);
        }
    }

    fn draw_physics_controls(&mut self, ui: &mut Ui) {
        let mut changed = ui
            .checkbox(&mut self.physics.enabled, "Live physics simulation")
            .on_hover_text("Keep moving the layout while viewing the graph.")
            .changed();

        ui.collapsing("Physics tuning", |ui| {
            let physics = &mut self.physics;
            changed |= physics_slider(
                ui,
                &mut physics.intensity,
                PhysicsConfig::INTENSITY_RANGE,
                "Intensity",
                "Overall strength applied to all physics forces.",
            );
            changed |= physics_slider(
                ui,
                &mut physics.repulsion,
                PhysicsConfig::REPULSION_RANGE,
                "Repulsion",
                "How strongly papers push each other apart.",
            );
            changed |= physics_slider(
                ui,
                &mut physics.spring,
                PhysicsConfig::SPRING_RANGE,
                "Link springs",
                "How strongly linked papers pull towards their rest distance.",
            );
            changed |= physics_slider(
                ui,
                &mut physics.collision,
                PhysicsConfig::COLLISION_RANGE,
                "Collision",
                "Push apart papers whose discs overlap.",
            );
            changed |= physics_slider(
                ui,
                &mut physics.velocity_damping,
                PhysicsConfig::DAMPING_RANGE,
                "Velocity damping",
                "Higher values keep momentum longer.",
            );

            if ui.button("Restore defaults").clicked() {
                *physics = PhysicsConfig {
                    enabled: physics.enabled,
                    ..PhysicsConfig::default()
                };
                changed = true;
            }
        });

        if changed {
            self.viewport.configure_physics(&self.physics);
        }
    }
}
