// config.rs - Viewer settings from a TOML file and the command line

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};

use conway::{Coord, GridConfig, patterns};

/// Pattern name that asks for a seeded random fill instead of a fixed pattern.
pub const RANDOM_PATTERN: &str = "random";

#[derive(Debug, Parser)]
#[command(name = "conway_coro", version, about = "Conway's Game of Life on a torus, one task per cell")]
pub struct Cli {
    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub height: Option<i32>,

    #[arg(long)]
    pub width: Option<i32>,

    /// Seed pattern name, or "random"
    #[arg(long)]
    pub pattern: Option<String>,

    /// Seed for the random fill
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between generations
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Print text frames instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Generations to run in headless mode
    #[arg(long, default_value_t = 20)]
    pub generations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub interval_ms: u64,
    pub pattern: String,
    pub seed: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            interval_ms: 200,
            pattern: "Glider".to_string(),
            seed: 0,
        }
    }
}

impl ViewConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
    pub view: ViewConfig,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// File settings (or defaults) with command line flags layered on top.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(cli);
        tracing::debug!(?settings, "settings resolved");
        Ok(settings)
    }

    pub fn apply(&mut self, cli: &Cli) {
        if let Some(height) = cli.height {
            self.grid.height = height;
        }
        if let Some(width) = cli.width {
            self.grid.width = width;
        }
        if let Some(pattern) = &cli.pattern {
            self.view.pattern = pattern.clone();
        }
        if let Some(seed) = cli.seed {
            self.view.seed = seed;
        }
        if let Some(interval_ms) = cli.interval_ms {
            self.view.interval_ms = interval_ms;
        }
    }

    /// The initial live cells named by `view.pattern`.
    pub fn seed_cells(&self) -> Result<Vec<Coord>> {
        seed_cells(&self.view.pattern, self.grid.height, self.grid.width, self.view.seed)
    }
}

pub fn seed_cells(pattern: &str, height: i32, width: i32, seed: u64) -> Result<Vec<Coord>> {
    if pattern.eq_ignore_ascii_case(RANDOM_PATTERN) {
        return Ok(patterns::random_cells(height, width, seed));
    }
    match patterns::find(pattern) {
        Some(p) => Ok(p.coords().collect()),
        None => {
            let known: Vec<&str> = patterns::PATTERNS.iter().map(|p| p.name).collect();
            bail!("unknown pattern {pattern:?}, expected one of {known:?} or {RANDOM_PATTERN:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn nested_sections_parse() {
        let settings = Settings::parse(
            r#"
            [grid]
            height = 12
            width = 20
            verdict_buffer = 8

            [grid.rules]
            starvation = 0

            [view]
            interval_ms = 50
            pattern = "Blinker"
            "#,
        )
        .unwrap();
        assert_eq!(settings.grid.height, 12);
        assert_eq!(settings.grid.width, 20);
        assert_eq!(settings.grid.verdict_buffer, 8);
        assert_eq!(settings.grid.rules.starvation, 0);
        assert_eq!(settings.grid.rules.overpopulation, 4);
        assert_eq!(settings.view.interval(), Duration::from_millis(50));
        assert_eq!(settings.view.pattern, "Blinker");
    }

    #[test]
    fn flags_override_file() {
        let mut settings = Settings::parse("[view]\npattern = \"Toad\"\ninterval_ms = 10").unwrap();
        let cli = Cli::parse_from(["conway_coro", "--height", "9", "--pattern", "random", "--seed", "3"]);
        settings.apply(&cli);
        assert_eq!(settings.grid.height, 9);
        assert_eq!(settings.grid.width, 50);
        assert_eq!(settings.view.pattern, "random");
        assert_eq!(settings.view.seed, 3);
        assert_eq!(settings.view.interval_ms, 10);
        assert!(!cli.headless);
        assert_eq!(cli.generations, 20);
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        let err = seed_cells("Spaceship", 10, 10, 0).unwrap_err();
        assert!(err.to_string().contains("Spaceship"));
        assert_eq!(seed_cells("beacon", 50, 50, 0).unwrap().len(), 8);
        assert_eq!(seed_cells("RANDOM", 6, 6, 1).unwrap(), patterns::random_cells(6, 6, 1));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Settings::load(Path::new("/nonexistent/conway.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/conway.toml"));
    }
}
