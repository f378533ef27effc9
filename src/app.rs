//! Shared entry point of the picker binaries.

use crate::config::{load_config, TunerConfig};
use crate::detector::{Mode, Pipeline};
use crate::error::Result;
use crate::image::load_source_image;
use crate::params::ParameterStore;
use crate::session::InteractionLoop;
use crate::ui::WindowSurface;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Interactive detector parameter tuning")]
pub struct Args {
    /// Image to run the detector on
    #[arg(long)]
    pub filename: PathBuf,

    /// Optional JSON file with initial slider values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse arguments, run the session, and exit with status 1 on failure.
pub fn main_for(mode: Mode) {
    let _ = env_logger::try_init();
    let args = Args::parse();
    if let Err(err) = run(mode, &args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

pub fn run(mode: Mode, args: &Args) -> Result<()> {
    let source = load_source_image(&args.filename)?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => TunerConfig::default(),
    };

    let mut store = ParameterStore::new(mode.spec());
    config.apply_initial(&mut store);
    info!("{mode}: {}", store.describe());

    let (width, height) = (source.width(), source.height());
    let pipeline = Pipeline::new(mode, source);
    let mut session = InteractionLoop::new(pipeline);
    if let Some(cadence) = config.cadence() {
        session = session.with_cadence(cadence);
    }

    let mut surface =
        WindowSurface::open(mode.title(), width, height, store, config.panel_row_height)?;
    session.run(&mut surface)?;
    Ok(())
}
