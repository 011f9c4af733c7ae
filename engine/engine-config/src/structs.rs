//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_four() -> i64 {
    defaults::four()
}
fn d_three() -> i64 {
    defaults::three()
}
fn d_two() -> i64 {
    defaults::two()
}
fn d_opponent_three() -> i64 {
    defaults::opponent_three()
}
fn d_center() -> i64 {
    defaults::center()
}
fn d_column_profile() -> Option<Vec<f64>> {
    defaults::column_profile().map(<[f64]>::to_vec)
}
fn d_minimax_depth() -> u32 {
    defaults::minimax_depth()
}
fn d_expectimax_depth() -> u32 {
    defaults::expectimax_depth()
}
fn d_expectation() -> String {
    defaults::expectation().into()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_timeout_ms() -> u64 {
    defaults::timeout_ms()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_initial_temp() -> f64 {
    defaults::initial_temp()
}
fn d_cooling_rate() -> f64 {
    defaults::cooling_rate()
}
fn d_annealing_iterations() -> u32 {
    defaults::annealing_iterations()
}
fn d_min_temp() -> f64 {
    defaults::min_temp()
}
fn d_neighbor_bias() -> f64 {
    defaults::neighbor_bias()
}
fn d_population_size() -> usize {
    defaults::population_size()
}
fn d_elite_size() -> usize {
    defaults::elite_size()
}
fn d_mutation_rate() -> f64 {
    defaults::mutation_rate()
}
fn d_generations() -> u32 {
    defaults::generations()
}
fn d_arena_red() -> String {
    defaults::arena_red().into()
}
fn d_arena_yellow() -> String {
    defaults::arena_yellow().into()
}
fn d_arena_games() -> u32 {
    defaults::arena_games()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub minimax: MinimaxConfig,
    #[serde(default)]
    pub expectimax: ExpectimaxConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub annealing: AnnealingConfig,
    #[serde(default)]
    pub genetic: GeneticConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by every bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Fixed RNG seed; None seeds from entropy
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Heuristic weights
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EvaluatorConfig {
    #[serde(default = "d_four")]
    pub four: i64,
    #[serde(default = "d_three")]
    pub three: i64,
    #[serde(default = "d_two")]
    pub two: i64,
    #[serde(default = "d_opponent_three")]
    pub opponent_three: i64,
    #[serde(default = "d_center")]
    pub center: i64,
    /// Per-column window multipliers, one per column
    #[serde(default = "d_column_profile")]
    pub column_profile: Option<Vec<f64>>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            four: defaults::four(),
            three: defaults::three(),
            two: defaults::two(),
            opponent_three: defaults::opponent_three(),
            center: defaults::center(),
            column_profile: d_column_profile(),
        }
    }
}

/// Minimax bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MinimaxConfig {
    #[serde(default = "d_minimax_depth")]
    pub depth: u32,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: defaults::minimax_depth(),
        }
    }
}

/// Expectimax bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExpectimaxConfig {
    #[serde(default = "d_expectimax_depth")]
    pub depth: u32,
    /// "faithful" (running minimum) or "average" (uniform mean)
    #[serde(default = "d_expectation")]
    pub expectation: String,
}

impl Default for ExpectimaxConfig {
    fn default() -> Self {
        Self {
            depth: defaults::expectimax_depth(),
            expectation: defaults::expectation().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
    /// Wall-clock budget per move in milliseconds (0 = iterations only)
    #[serde(default = "d_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
            timeout_ms: defaults::timeout_ms(),
            exploration: defaults::exploration(),
        }
    }
}

/// Simulated annealing bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnnealingConfig {
    #[serde(default = "d_initial_temp")]
    pub initial_temp: f64,
    #[serde(default = "d_cooling_rate")]
    pub cooling_rate: f64,
    #[serde(default = "d_annealing_iterations")]
    pub iterations: u32,
    #[serde(default = "d_min_temp")]
    pub min_temp: f64,
    #[serde(default = "d_neighbor_bias")]
    pub neighbor_bias: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temp: defaults::initial_temp(),
            cooling_rate: defaults::cooling_rate(),
            iterations: defaults::annealing_iterations(),
            min_temp: defaults::min_temp(),
            neighbor_bias: defaults::neighbor_bias(),
        }
    }
}

/// Genetic search bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneticConfig {
    #[serde(default = "d_population_size")]
    pub population_size: usize,
    #[serde(default = "d_elite_size")]
    pub elite_size: usize,
    #[serde(default = "d_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default = "d_generations")]
    pub generations: u32,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: defaults::population_size(),
            elite_size: defaults::elite_size(),
            mutation_rate: defaults::mutation_rate(),
            generations: defaults::generations(),
        }
    }
}

/// Bot-vs-bot arena
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_arena_red")]
    pub red: String,
    #[serde(default = "d_arena_yellow")]
    pub yellow: String,
    #[serde(default = "d_arena_games")]
    pub games: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            red: defaults::arena_red().into(),
            yellow: defaults::arena_yellow().into(),
            games: defaults::arena_games(),
        }
    }
}
