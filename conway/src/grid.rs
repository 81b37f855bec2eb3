// grid.rs - The toroidal grid and its generation loop

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Runtime};

use crate::cells::LiveCells;
use crate::coord::{Coord, Torus};
use crate::engine::{self, DEFAULT_VERDICT_BUFFER, StepStats};
use crate::error::Result;
use crate::render;
use crate::rules::Rules;

/// Construction parameters for a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub height: i32,
    pub width: i32,
    pub rules: Rules,
    /// Evaluation threads; `None` lets tokio pick one per core.
    pub worker_threads: Option<usize>,
    /// Capacity of the verdict channel between evaluators and the aggregator.
    pub verdict_buffer: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height: 50,
            width: 50,
            rules: Rules::default(),
            worker_threads: None,
            verdict_buffer: DEFAULT_VERDICT_BUFFER,
        }
    }
}

/// A wrapping Game of Life board.
///
/// `step` blocks on the grid's own runtime, so a `Grid` must not be stepped or
/// dropped from inside another tokio runtime.
pub struct Grid {
    torus: Torus,
    rules: Rules,
    field: Arc<RwLock<LiveCells>>,
    verdict_buffer: usize,
    generation: u64,
    last_step: Option<StepStats>,
    runtime: Runtime,
}

impl Grid {
    /// Creates a grid with the default rules. Coordinates are wrapped onto the torus.
    pub fn new<I>(height: i32, width: i32, cells: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Coord>,
    {
        Self::with_config(GridConfig { height, width, ..GridConfig::default() }, cells)
    }

    pub fn with_config<I>(config: GridConfig, cells: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Coord>,
    {
        let torus = Torus::new(config.height, config.width)?;

        let mut builder = Builder::new_multi_thread();
        builder.thread_name("conway-eval").enable_all();
        if let Some(threads) = config.worker_threads {
            builder.worker_threads(threads.max(1));
        }
        let runtime = builder.build()?;

        let field = torus.normalize_all(cells);
        tracing::debug!(
            height = torus.height(),
            width = torus.width(),
            population = field.len(),
            "grid created"
        );

        Ok(Self {
            torus,
            rules: config.rules,
            field: Arc::new(RwLock::new(field)),
            verdict_buffer: config.verdict_buffer,
            generation: 0,
            last_step: None,
            runtime,
        })
    }

    /// Advances one generation, returning once the next generation is in place.
    pub fn step(&mut self) {
        let started = Instant::now();
        let stats = self.runtime.block_on(engine::advance(
            self.torus,
            self.rules,
            &self.field,
            self.verdict_buffer,
        ));
        self.generation += 1;
        self.last_step = Some(stats);
        tracing::debug!(
            generation = self.generation,
            population = stats.population(),
            births = stats.births,
            evaluated = stats.evaluated_live + stats.evaluated_dead,
            elapsed_us = started.elapsed().as_micros() as u64,
            "step complete"
        );
    }

    /// A copy of the current generation.
    pub fn live_cells(&self) -> LiveCells {
        self.field.read().clone()
    }

    /// Borrows the current generation without copying it.
    pub fn with_live_cells<R>(&self, f: impl FnOnce(&LiveCells) -> R) -> R {
        f(&self.field.read())
    }

    pub fn is_alive(&self, coord: Coord) -> bool {
        self.field.read().contains(self.torus.normalize(coord))
    }

    pub fn population(&self) -> usize {
        self.field.read().len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_step(&self) -> Option<StepStats> {
        self.last_step
    }

    pub fn height(&self) -> i32 {
        self.torus.height()
    }

    pub fn width(&self) -> i32 {
        self.torus.width()
    }

    pub fn torus(&self) -> Torus {
        self.torus
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, coord: Coord) -> bool {
        let coord = self.torus.normalize(coord);
        self.field.write().toggle(coord)
    }

    pub fn clear(&mut self) {
        self.reseed(std::iter::empty::<Coord>());
    }

    /// Replaces the board and restarts the generation count.
    pub fn reseed<I>(&mut self, cells: I)
    where
        I: IntoIterator,
        I::Item: Into<Coord>,
    {
        *self.field.write() = self.torus.normalize_all(cells);
        self.generation = 0;
        self.last_step = None;
    }

    /// The board as rows of `-` and `X`.
    pub fn render(&self) -> String {
        self.with_live_cells(|cells| render::render_text(&self.torus, cells))
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("torus", &self.torus)
            .field("rules", &self.rules)
            .field("generation", &self.generation)
            .field("population", &self.population())
            .finish()
    }
}
