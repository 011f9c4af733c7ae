//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Maximum number of select/expand/rollout/backpropagate iterations per search.
    pub max_iterations: u32,

    /// Wall-clock budget per search. Checked once per iteration, after
    /// backpropagation, so a rollout is never cut short.
    /// `None` runs the full iteration budget.
    pub time_budget: Option<Duration>,

    /// Exploration constant `c` in `w/n + c * sqrt(ln N / n)`.
    /// `sqrt(2)` gives the classic UCB1 bound.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20_000,
            time_budget: Some(Duration::from_secs(2)),
            exploration: std::f64::consts::SQRT_2,
        }
    }
}

impl MctsConfig {
    /// Create a fast, clock-independent config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_iterations: 500,
            time_budget: None,
            exploration: std::f64::consts::SQRT_2,
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    /// Builder pattern: set or clear the time budget.
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.max_iterations, 20_000);
        assert_eq!(config.time_budget, Some(Duration::from_secs(2)));
        assert!((config.exploration - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_time_budget(None)
            .with_exploration(1.0);

        assert_eq!(config.max_iterations, 100);
        assert!(config.time_budget.is_none());
        assert!((config.exploration - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_testing_config_has_no_clock() {
        let config = MctsConfig::for_testing();
        assert!(config.time_budget.is_none());
        assert!(config.max_iterations < MctsConfig::default().max_iterations);
    }
}
