//! Simulated annealing over the columns of a single ply.

use games_connect4::{Board, Piece};
use heuristic::Evaluator;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::OptimizerError;

/// Objective value of a move that wins on the spot. Lower is better.
pub const IMMEDIATE_WIN_OBJECTIVE: i64 = -100_000;

/// Configuration for simulated annealing.
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temp: f64,

    /// Multiplier applied to the temperature before every step.
    pub cooling_rate: f64,

    /// Maximum number of steps.
    pub iterations: u32,

    /// The walk stops once the temperature falls below this.
    pub min_temp: f64,

    /// Probability of proposing an adjacent column rather than any other.
    pub neighbor_bias: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temp: 100.0,
            cooling_rate: 0.99,
            iterations: 1000,
            min_temp: 1e-4,
            neighbor_bias: 0.7,
        }
    }
}

impl AnnealingConfig {
    /// Builder pattern: set the starting temperature.
    pub fn with_initial_temp(mut self, t: f64) -> Self {
        self.initial_temp = t;
        self
    }

    /// Builder pattern: set the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Builder pattern: set the step budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the stopping temperature.
    pub fn with_min_temp(mut self, t: f64) -> Self {
        self.min_temp = t;
        self
    }

    /// Builder pattern: set the adjacent-column bias.
    pub fn with_neighbor_bias(mut self, bias: f64) -> Self {
        self.neighbor_bias = bias;
        self
    }
}

/// Pick a column for `piece` by simulated annealing.
///
/// The objective of a column is the negated evaluator score after dropping
/// `piece` there, or [`IMMEDIATE_WIN_OBJECTIVE`] if the drop wins. The walk
/// starts on a random valid column and returns the lowest-objective column
/// it has stood on.
pub fn anneal(
    board: &Board,
    piece: Piece,
    evaluator: &Evaluator,
    config: &AnnealingConfig,
    rng: &mut ChaCha20Rng,
) -> Result<u8, OptimizerError> {
    let valid = board.valid_columns();
    match valid.len() {
        0 => return Err(OptimizerError::NoLegalMoves),
        1 => return Ok(valid[0]),
        _ => {}
    }

    let mut current = valid[rng.gen_range(0..valid.len())];
    let mut current_eval = objective(board, piece, evaluator, current)?;
    let mut best = current;
    let mut best_eval = current_eval;

    let mut temperature = config.initial_temp;
    let mut steps = 0u32;
    let mut rejected_non_finite = 0u32;

    for _ in 0..config.iterations {
        temperature *= config.cooling_rate;
        if temperature < config.min_temp {
            break;
        }
        steps += 1;

        let candidate = neighbor(current, &valid, config.neighbor_bias, rng);
        let candidate_eval = objective(board, piece, evaluator, candidate)?;
        let delta = candidate_eval - current_eval;

        let accept = if delta < 0 {
            true
        } else {
            match acceptance_probability(delta as f64, temperature) {
                Some(p) => rng.gen::<f64>() < p,
                None => {
                    rejected_non_finite += 1;
                    false
                }
            }
        };

        if accept {
            current = candidate;
            current_eval = candidate_eval;
        }

        if current_eval < best_eval {
            best = current;
            best_eval = current_eval;
            trace!(
                column = best,
                objective = best_eval,
                temperature,
                "New best column"
            );
        }
    }

    debug!(
        column = best,
        objective = best_eval,
        steps,
        rejected_non_finite,
        final_temp = temperature,
        "Annealing complete"
    );

    Ok(best)
}

/// Objective of dropping `piece` in `column`. Lower is better.
pub(crate) fn objective(
    board: &Board,
    piece: Piece,
    evaluator: &Evaluator,
    column: u8,
) -> Result<i64, OptimizerError> {
    let child = board.with_move(column, piece)?;
    if child.winning_move(piece) {
        return Ok(IMMEDIATE_WIN_OBJECTIVE);
    }
    Ok(-evaluator.score(&child, piece))
}

/// Metropolis acceptance probability `exp(-delta / temperature)` for a
/// non-improving step. Returns None when the value is not a finite number,
/// in which case the candidate is rejected.
pub(crate) fn acceptance_probability(delta: f64, temperature: f64) -> Option<f64> {
    let p = (-delta / temperature).exp();
    p.is_finite().then_some(p)
}

/// Propose a column other than `current`, preferring adjacent ones.
pub(crate) fn neighbor(current: u8, valid: &[u8], bias: f64, rng: &mut ChaCha20Rng) -> u8 {
    if rng.gen::<f64>() < bias {
        let adjacent: Vec<u8> = [current.checked_sub(1), current.checked_add(1)]
            .into_iter()
            .flatten()
            .filter(|c| valid.contains(c))
            .collect();
        if !adjacent.is_empty() {
            return adjacent[rng.gen_range(0..adjacent.len())];
        }
    }

    let others: Vec<u8> = valid.iter().copied().filter(|&c| c != current).collect();
    if others.is_empty() {
        current
    } else {
        others[rng.gen_range(0..others.len())]
    }
}
