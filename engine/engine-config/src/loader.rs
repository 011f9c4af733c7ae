//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by QUADRANT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("QUADRANT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from QUADRANT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "QUADRANT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, i64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: QUADRANT_<SECTION>_<KEY>.
/// `evaluator.column_profile` can only be set from a file.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "QUADRANT_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "QUADRANT_COMMON_SEED", optional_parse);

    // Evaluator
    env_override!(config, evaluator.four, "QUADRANT_EVALUATOR_FOUR", parse);
    env_override!(config, evaluator.three, "QUADRANT_EVALUATOR_THREE", parse);
    env_override!(config, evaluator.two, "QUADRANT_EVALUATOR_TWO", parse);
    env_override!(
        config,
        evaluator.opponent_three,
        "QUADRANT_EVALUATOR_OPPONENT_THREE",
        parse
    );
    env_override!(config, evaluator.center, "QUADRANT_EVALUATOR_CENTER", parse);

    // Minimax / Expectimax
    env_override!(config, minimax.depth, "QUADRANT_MINIMAX_DEPTH", parse);
    env_override!(config, expectimax.depth, "QUADRANT_EXPECTIMAX_DEPTH", parse);
    env_override!(
        config,
        expectimax.expectation,
        "QUADRANT_EXPECTIMAX_EXPECTATION"
    );

    // MCTS
    env_override!(
        config,
        mcts.max_iterations,
        "QUADRANT_MCTS_MAX_ITERATIONS",
        parse
    );
    env_override!(config, mcts.timeout_ms, "QUADRANT_MCTS_TIMEOUT_MS", parse);
    env_override!(config, mcts.exploration, "QUADRANT_MCTS_EXPLORATION", parse);

    // Annealing
    env_override!(
        config,
        annealing.initial_temp,
        "QUADRANT_ANNEALING_INITIAL_TEMP",
        parse
    );
    env_override!(
        config,
        annealing.cooling_rate,
        "QUADRANT_ANNEALING_COOLING_RATE",
        parse
    );
    env_override!(
        config,
        annealing.iterations,
        "QUADRANT_ANNEALING_ITERATIONS",
        parse
    );
    env_override!(
        config,
        annealing.min_temp,
        "QUADRANT_ANNEALING_MIN_TEMP",
        parse
    );
    env_override!(
        config,
        annealing.neighbor_bias,
        "QUADRANT_ANNEALING_NEIGHBOR_BIAS",
        parse
    );

    // Genetic
    env_override!(
        config,
        genetic.population_size,
        "QUADRANT_GENETIC_POPULATION_SIZE",
        parse
    );
    env_override!(
        config,
        genetic.elite_size,
        "QUADRANT_GENETIC_ELITE_SIZE",
        parse
    );
    env_override!(
        config,
        genetic.mutation_rate,
        "QUADRANT_GENETIC_MUTATION_RATE",
        parse
    );
    env_override!(
        config,
        genetic.generations,
        "QUADRANT_GENETIC_GENERATIONS",
        parse
    );

    // Arena
    env_override!(config, arena.red, "QUADRANT_ARENA_RED");
    env_override!(config, arena.yellow, "QUADRANT_ARENA_YELLOW");
    env_override!(config, arena.games, "QUADRANT_ARENA_GAMES", parse);

    config
}
