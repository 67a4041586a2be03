use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{error, info};

use paper_atlas::config::ViewerConfig;
use paper_atlas::papers::{PaperRecord, load_papers};
use paper_atlas::physics::PhysicsConfig;
use paper_atlas::viewport::Viewport;

mod canvas;
mod render_utils;
mod ui;

type LoadResult = Result<Vec<PaperRecord>, String>;

pub struct PaperAtlasApp {
    papers_path: PathBuf,
    config: ViewerConfig,
    /// Title to fly to once the first non-empty graph is on screen.
    initial_focus: Option<String>,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    viewport: Viewport,
    papers_path: PathBuf,
    search: String,
    search_matches: Option<SearchMatchCache>,
    search_status: Option<String>,
    physics: PhysicsConfig,
    pending_focus: Option<String>,
}

struct SearchMatchCache {
    query: String,
    matches: HashSet<usize>,
}

impl Drop for ViewModel {
    fn drop(&mut self) {
        self.viewport.teardown();
    }
}

impl PaperAtlasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        papers_path: PathBuf,
        config: ViewerConfig,
        initial_focus: Option<String>,
    ) -> Self {
        let state = Self::start_load(papers_path.clone());
        Self {
            papers_path,
            config,
            initial_focus,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(papers_path: PathBuf) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_papers(&papers_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(papers_path: PathBuf) -> AppState {
        info!(path = %papers_path.display(), "loading papers");
        AppState::Loading {
            rx: Self::spawn_load(papers_path),
        }
    }

    fn ready_state(&mut self, result: LoadResult) -> AppState {
        match result {
            Ok(papers) => AppState::Ready(Box::new(ViewModel::new(
                &papers,
                self.papers_path.clone(),
                &self.config,
                self.initial_focus.take(),
            ))),
            Err(message) => {
                error!(%message, "paper load failed");
                AppState::Error(message)
            }
        }
    }
}

impl eframe::App for PaperAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut received = None;
        let mut next_state = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => received = Some(result),
                    Err(TryRecvError::Disconnected) => {
                        received = Some(Err("Background load worker disconnected".to_owned()));
                    }
                    Err(TryRecvError::Empty) => {}
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading paper corpus...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the paper corpus");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        next_state = Some(Self::start_load(self.papers_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.papers_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => received = Some(result),
                        Err(TryRecvError::Empty) => self.reload_rx = Some(rx),
                        Err(TryRecvError::Disconnected) => {
                            received =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = received {
            next_state = Some(self.ready_state(result));
        }

        if let Some(next_state) = next_state {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
