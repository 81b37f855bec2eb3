// main.rs - Conway's Game of Life on a torus, evaluated one task per cell

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod config;
mod headless;
mod ui;

use app::GameOfLife;
use config::{Cli, Settings};
use conway::Grid;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    let mut grid = Grid::with_config(settings.grid.clone(), settings.seed_cells()?)?;

    if cli.headless {
        let stdout = std::io::stdout();
        return headless::run(&mut grid, cli.generations, settings.view.interval(), &mut stdout.lock());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([820.0, 1000.0]),
        ..Default::default()
    };

    let view = settings.view;
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(grid, &view))),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))
}
