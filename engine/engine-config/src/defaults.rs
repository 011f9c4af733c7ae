//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the documented defaults and the compiled-in ones cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    evaluator: EvaluatorDefaults,
    minimax: MinimaxDefaults,
    expectimax: ExpectimaxDefaults,
    mcts: MctsDefaults,
    annealing: AnnealingDefaults,
    genetic: GeneticDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EvaluatorDefaults {
    four: i64,
    three: i64,
    two: i64,
    opponent_three: i64,
    center: i64,
    #[serde(default)]
    column_profile: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct MinimaxDefaults {
    depth: u32,
}

#[derive(Debug, Deserialize)]
struct ExpectimaxDefaults {
    depth: u32,
    expectation: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    max_iterations: u32,
    timeout_ms: u64,
    exploration: f64,
}

#[derive(Debug, Deserialize)]
struct AnnealingDefaults {
    initial_temp: f64,
    cooling_rate: f64,
    iterations: u32,
    min_temp: f64,
    neighbor_bias: f64,
}

#[derive(Debug, Deserialize)]
struct GeneticDefaults {
    population_size: usize,
    elite_size: usize,
    mutation_rate: f64,
    generations: u32,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    red: String,
    yellow: String,
    games: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> Option<u64> {
    DEFAULTS.common.seed
}

// Evaluator
pub fn four() -> i64 {
    DEFAULTS.evaluator.four
}
pub fn three() -> i64 {
    DEFAULTS.evaluator.three
}
pub fn two() -> i64 {
    DEFAULTS.evaluator.two
}
pub fn opponent_three() -> i64 {
    DEFAULTS.evaluator.opponent_three
}
pub fn center() -> i64 {
    DEFAULTS.evaluator.center
}
pub fn column_profile() -> Option<&'static [f64]> {
    DEFAULTS.evaluator.column_profile.as_deref()
}

// Minimax / Expectimax
pub fn minimax_depth() -> u32 {
    DEFAULTS.minimax.depth
}
pub fn expectimax_depth() -> u32 {
    DEFAULTS.expectimax.depth
}
pub fn expectation() -> &'static str {
    &DEFAULTS.expectimax.expectation
}

// MCTS
pub fn max_iterations() -> u32 {
    DEFAULTS.mcts.max_iterations
}
pub fn timeout_ms() -> u64 {
    DEFAULTS.mcts.timeout_ms
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}

// Annealing
pub fn initial_temp() -> f64 {
    DEFAULTS.annealing.initial_temp
}
pub fn cooling_rate() -> f64 {
    DEFAULTS.annealing.cooling_rate
}
pub fn annealing_iterations() -> u32 {
    DEFAULTS.annealing.iterations
}
pub fn min_temp() -> f64 {
    DEFAULTS.annealing.min_temp
}
pub fn neighbor_bias() -> f64 {
    DEFAULTS.annealing.neighbor_bias
}

// Genetic
pub fn population_size() -> usize {
    DEFAULTS.genetic.population_size
}
pub fn elite_size() -> usize {
    DEFAULTS.genetic.elite_size
}
pub fn mutation_rate() -> f64 {
    DEFAULTS.genetic.mutation_rate
}
pub fn generations() -> u32 {
    DEFAULTS.genetic.generations
}

// Arena
pub fn arena_red() -> &'static str {
    &DEFAULTS.arena.red
}
pub fn arena_yellow() -> &'static str {
    &DEFAULTS.arena.yellow
}
pub fn arena_games() -> u32 {
    DEFAULTS.arena.games
}
