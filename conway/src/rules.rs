// rules.rs - Survival and birth thresholds

use serde::{Deserialize, Serialize};

pub const RULE_OVERPOPULATION: usize = 4;
pub const RULE_STARVATION: usize = 1;
pub const RULE_REPRODUCTION: usize = 3;

/// Thresholds shared read-only by every evaluator of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub overpopulation: usize,
    pub starvation: usize,
    pub reproduction: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            overpopulation: RULE_OVERPOPULATION,
            starvation: RULE_STARVATION,
            reproduction: RULE_REPRODUCTION,
        }
    }
}

impl Rules {
    /// A live cell stays alive strictly between starvation and overpopulation.
    pub fn survives(&self, live_neighbors: usize) -> bool {
        live_neighbors > self.starvation && live_neighbors < self.overpopulation
    }

    /// A dead cell comes alive with exactly `reproduction` live neighbors.
    pub fn is_born(&self, live_neighbors: usize) -> bool {
        live_neighbors == self.reproduction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_survival_band() {
        let rules = Rules::default();
        let survivors: Vec<usize> = (0..=8).filter(|&n| rules.survives(n)).collect();
        assert_eq!(survivors, vec![2, 3]);
    }

    #[test]
    fn birth_needs_exact_reproduction() {
        let rules = Rules::default();
        assert!(!rules.is_born(2));
        assert!(rules.is_born(3));
        assert!(!rules.is_born(4));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules: Rules = toml::from_str("reproduction = 2").unwrap();
        assert_eq!(rules, Rules { reproduction: 2, ..Rules::default() });
    }
}
