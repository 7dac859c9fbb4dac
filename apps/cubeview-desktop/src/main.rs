mod app;
mod config;
mod state;

use anyhow::Result;
use app::GpuApp;
use clap::Parser;
use config::ViewerConfig;
use cubeview_assets::TextureSet;
use state::AppState;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "cubeview", about = "Textured cube viewer with orbit controls")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding color.jpg, roughness.jpg, normal.png and height.png
    #[arg(long)]
    texture_dir: Option<PathBuf>,

    /// Initial window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in pixels
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubeview starting");

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    config.override_with(cli.texture_dir, cli.width, cli.height);

    let textures = TextureSet::load_dir(&config.texture_dir);
    let state = AppState::new(&config, &textures);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config, state);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
