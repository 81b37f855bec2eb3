// app.rs - Viewer state around a conway::Grid

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use conway::{Coord, Grid, patterns};
use egui::Color32;

use crate::config::ViewConfig;

const HISTORY_LEN: usize = 10;

pub struct GameOfLife {
    pub grid: Grid,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub cycle_detected: bool,

    random_seed: u64,
    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl GameOfLife {
    pub fn new(grid: Grid, view: &ViewConfig) -> Self {
        let selected_pattern = patterns::PATTERNS
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(&view.pattern))
            .unwrap_or(0);
        Self {
            grid,
            is_running: false,
            last_update: Instant::now(),
            update_interval: view.interval(),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern,
            cycle_detected: false,
            random_seed: view.seed,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
        }
    }

    pub fn update_generation(&mut self) {
        self.grid.step();
        if self.check_for_cycle() {
            tracing::info!(generation = self.grid.generation(), "cycle detected, pausing");
            self.cycle_detected = true;
            self.is_running = false;
        }
    }

    /// Order-independent fingerprint of the board.
    pub fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.grid.with_live_cells(|cells| cells.sorted()).hash(&mut hasher);
        hasher.finish()
    }

    /// Records the current board and reports whether one of the last few boards matched it.
    pub fn check_for_cycle(&mut self) -> bool {
        let current = self.hash_grid();
        let seen = self.grid_history[..self.history_count.min(HISTORY_LEN)].contains(&current);
        self.grid_history[self.history_count % HISTORY_LEN] = current;
        self.history_count += 1;
        seen
    }

    fn reset_history(&mut self) {
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.cycle_detected = false;
    }

    pub fn clear_grid(&mut self) {
        self.grid.clear();
        self.reset_history();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            tracing::info!(pattern = pattern.name, "applying pattern");
            self.grid.reseed(pattern.coords());
            self.reset_history();
        }
    }

    pub fn apply_random_pattern(&mut self) {
        self.random_seed = self.random_seed.wrapping_add(1);
        let cells = patterns::random_cells(self.grid.height(), self.grid.width(), self.random_seed);
        self.grid.reseed(cells);
        self.reset_history();
    }

    pub fn toggle_cell(&mut self, row: i32, col: i32) {
        if (0..self.grid.height()).contains(&row) && (0..self.grid.width()).contains(&col) {
            self.grid.toggle(Coord::new(row, col));
            self.reset_history();
        }
    }
}
