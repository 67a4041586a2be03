mod app;

use std::path::PathBuf;

use clap::Parser;
use paper_atlas::{config, logging};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Paper corpus: a JSON array of records or an object with a `papers` array.
    #[arg(default_value = "papers.json")]
    papers: PathBuf,

    /// Optional TOML file with camera, node, label and physics settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fly to the paper with this title once the graph is ready.
    #[arg(long)]
    focus: Option<String>,

    /// Verbose logging; `RUST_LOG` overrides the level when set.
    #[arg(long)]
    debug: bool,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let viewer_config = config::load_config(args.config.as_deref());
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "paper-atlas",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::PaperAtlasApp::new(
                cc,
                args.papers.clone(),
                viewer_config.clone(),
                args.focus.clone(),
            )))
        }),
    )
}
