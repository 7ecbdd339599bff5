mod app;
mod backend;
mod engine;
mod util;

use std::sync::Arc;

use clap::Parser;

use crate::backend::{Backend, HttpBackend};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the topology/query backend.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    backend_url: String,

    /// Topology to load as soon as the topology list arrives.
    #[arg(long)]
    topology: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let backend: Arc<dyn Backend> = match HttpBackend::new(&args.backend_url) {
        Ok(backend) => Arc::new(backend),
        Err(error) => {
            eprintln!("failed to initialize backend client: {error:#}");
            std::process::exit(2);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1080.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "topolens",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::TopolensApp::new(
                cc,
                backend,
                args.topology.clone(),
            )))
        }),
    )
}
