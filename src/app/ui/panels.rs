use std::path::PathBuf;

use eframe::egui::{self, Align, Context, Layout};
use tracing::warn;

use paper_atlas::config::ViewerConfig;
use paper_atlas::graph::build_graph;
use paper_atlas::papers::PaperRecord;
use paper_atlas::physics::ForceSimulation;
use paper_atlas::viewport::{FocusOutcome, Viewport};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(
        papers: &[PaperRecord],
        papers_path: PathBuf,
        config: &ViewerConfig,
        pending_focus: Option<String>,
    ) -> Self {
        let simulation = ForceSimulation::new(config.physics.clone(), config.nodes.clone());
        let mut viewport = Viewport::new(config, Box::new(simulation));
        viewport.set_graph(build_graph(papers));

        let pending_focus = match pending_focus {
            Some(title) if viewport.graph().is_empty() => {
                warn!(%title, "corpus is empty; ignoring requested focus");
                None
            }
            other => other,
        };

        Self {
            viewport,
            papers_path,
            search: String::new(),
            search_matches: None,
            search_status: None,
            physics: config.physics.clone(),
            pending_focus,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("paper-atlas");
                    ui.separator();
                    ui.label(format!("corpus: {}", self.papers_path.display()));
                    ui.label(format!("papers: {}", self.viewport.graph().node_count()));
                    ui.label(format!("links: {}", self.viewport.graph().link_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload corpus"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("zoom {:.2}x", self.viewport.camera().zoom()));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    /// Runs the `--focus` request once the canvas has a size to center in.
    pub(in crate::app) fn apply_pending_focus(&mut self, now: f64) {
        let Some(title) = self.pending_focus.take() else {
            return;
        };

        if self.viewport.focus_title(&title, now) == FocusOutcome::NotFound {
            self.search_status = Some(format!("No paper titled \"{title}\""));
        }
        self.search = title;
    }
}
