//! Building bots from the central configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use adversarial::ExpectationMode;
use engine_config::{CentralConfig, EvaluatorConfig};
use games_connect4::{Piece, COLS};
use heuristic::{Evaluator, Weights};
use mcts::MctsConfig;
use optimizers::{AnnealingConfig, GeneticConfig};
use tracing::debug;

use crate::{
    AnnealingBot, Bot, BotError, ExpectimaxBot, GeneticBot, MinimaxBot, MonteCarloBot,
    OneStepLookAheadBot, RandomBot,
};

/// Every strategy the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotKind {
    Random,
    Lookahead,
    Minimax,
    Expectimax,
    Mcts,
    Annealing,
    Genetic,
}

impl BotKind {
    pub const ALL: [BotKind; 7] = [
        BotKind::Random,
        BotKind::Lookahead,
        BotKind::Minimax,
        BotKind::Expectimax,
        BotKind::Mcts,
        BotKind::Annealing,
        BotKind::Genetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BotKind::Random => "random",
            BotKind::Lookahead => "lookahead",
            BotKind::Minimax => "minimax",
            BotKind::Expectimax => "expectimax",
            BotKind::Mcts => "mcts",
            BotKind::Annealing => "annealing",
            BotKind::Genetic => "genetic",
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BotKind {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "random" => Ok(BotKind::Random),
            "lookahead" | "onestep" | "one-step" => Ok(BotKind::Lookahead),
            "minimax" => Ok(BotKind::Minimax),
            "expectimax" => Ok(BotKind::Expectimax),
            "mcts" | "montecarlo" => Ok(BotKind::Mcts),
            "annealing" | "sa" => Ok(BotKind::Annealing),
            "genetic" | "ga" => Ok(BotKind::Genetic),
            _ => Err(BotError::UnknownBot(s.to_string())),
        }
    }
}

/// Build a bot of `kind` playing `piece`, configured from `config`.
pub fn build_bot(
    kind: BotKind,
    piece: Piece,
    config: &CentralConfig,
) -> Result<Box<dyn Bot>, BotError> {
    let seed = config.common.seed;
    debug!(%kind, %piece, ?seed, "Building bot");

    let bot: Box<dyn Bot> = match kind {
        BotKind::Random => Box::new(RandomBot::new(piece, seed)),
        BotKind::Lookahead => Box::new(OneStepLookAheadBot::new(
            piece,
            evaluator_from_config(&config.evaluator)?,
            seed,
        )),
        BotKind::Minimax => Box::new(MinimaxBot::new(
            piece,
            evaluator_from_config(&config.evaluator)?,
            config.minimax.depth,
            seed,
        )),
        BotKind::Expectimax => {
            let mode: ExpectationMode = config
                .expectimax
                .expectation
                .parse()
                .map_err(BotError::InvalidConfig)?;
            Box::new(ExpectimaxBot::new(
                piece,
                evaluator_from_config(&config.evaluator)?,
                config.expectimax.depth,
                mode,
                seed,
            ))
        }
        BotKind::Mcts => Box::new(MonteCarloBot::new(piece, mcts_config(config), seed)),
        BotKind::Annealing => Box::new(AnnealingBot::new(
            piece,
            evaluator_from_config(&config.evaluator)?,
            annealing_config(config),
            seed,
        )),
        BotKind::Genetic => Box::new(GeneticBot::new(
            piece,
            evaluator_from_config(&config.evaluator)?,
            genetic_config(config),
            seed,
        )),
    };

    Ok(bot)
}

/// Evaluator with the configured weights and optional column profile.
pub fn evaluator_from_config(config: &EvaluatorConfig) -> Result<Evaluator, BotError> {
    let evaluator = Evaluator::standard().with_weights(Weights {
        four: config.four,
        three: config.three,
        two: config.two,
        opponent_three: config.opponent_three,
        center: config.center,
    });

    match &config.column_profile {
        None => Ok(evaluator),
        Some(profile) => {
            let profile = <[f64; COLS]>::try_from(profile.as_slice()).map_err(|_| {
                BotError::InvalidConfig(format!(
                    "column_profile needs {} values, got {}",
                    COLS,
                    profile.len()
                ))
            })?;
            Ok(evaluator.with_column_profile(profile))
        }
    }
}

/// A zero timeout runs on the iteration budget alone.
fn mcts_config(config: &CentralConfig) -> MctsConfig {
    let time_budget = match config.mcts.timeout_ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    };
    MctsConfig::default()
        .with_iterations(config.mcts.max_iterations)
        .with_time_budget(time_budget)
        .with_exploration(config.mcts.exploration)
}

fn annealing_config(config: &CentralConfig) -> AnnealingConfig {
    let c = &config.annealing;
    AnnealingConfig::default()
        .with_initial_temp(c.initial_temp)
        .with_cooling_rate(c.cooling_rate)
        .with_iterations(c.iterations)
        .with_min_temp(c.min_temp)
        .with_neighbor_bias(c.neighbor_bias)
}

fn genetic_config(config: &CentralConfig) -> GeneticConfig {
    let c = &config.genetic;
    GeneticConfig::default()
        .with_population_size(c.population_size)
        .with_elite_size(c.elite_size)
        .with_mutation_rate(c.mutation_rate)
        .with_generations(c.generations)
}
