//! Generational genetic search where each genome is a single column.

use games_connect4::{Board, Piece};
use heuristic::Evaluator;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::OptimizerError;

/// Configuration for the genetic search.
#[derive(Debug, Clone)]
pub struct GeneticConfig {
    /// Genomes per generation.
    pub population_size: usize,

    /// Fittest genomes carried over unchanged and used as parents.
    pub elite_size: usize,

    /// Probability that a child is replaced by a random valid column.
    pub mutation_rate: f64,

    /// Number of generations to evaluate.
    pub generations: u32,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            elite_size: 10,
            mutation_rate: 0.2,
            generations: 50,
        }
    }
}

impl GeneticConfig {
    /// Builder pattern: set the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Builder pattern: set the elite size.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Builder pattern: set the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Builder pattern: set the number of generations.
    pub fn with_generations(mut self, n: u32) -> Self {
        self.generations = n;
        self
    }
}

/// Pick a column for `piece` by evolving a population of candidate columns.
///
/// Fitness is the evaluator score after dropping `piece` in the column.
/// Each generation keeps its fittest `elite_size` genomes (stable order on
/// ties) and fills the rest with children of two random elite parents,
/// mutated with probability `mutation_rate`. Returns the fittest genome of
/// the last evaluated generation.
///
/// Sizes are clamped so that at least one genome is evaluated for at least
/// one generation.
pub fn evolve(
    board: &Board,
    piece: Piece,
    evaluator: &Evaluator,
    config: &GeneticConfig,
    rng: &mut ChaCha20Rng,
) -> Result<u8, OptimizerError> {
    let valid = board.valid_columns();
    if valid.is_empty() {
        return Err(OptimizerError::NoLegalMoves);
    }

    let population_size = config.population_size.max(1);
    let elite_size = config.elite_size.clamp(1, population_size);
    let generations = config.generations.max(1);

    let mut population: Vec<u8> = (0..population_size)
        .map(|_| random_column(&valid, rng))
        .collect();
    let mut best = (population[0], i64::MIN);

    for generation in 0..generations {
        let ranked = rank(board, piece, evaluator, &population)?;
        let elite: Vec<u8> = ranked.iter().take(elite_size).map(|&(c, _)| c).collect();
        best = ranked[0];

        trace!(
            generation,
            column = best.0,
            fitness = best.1,
            "Generation evaluated"
        );

        let mut next = elite.clone();
        while next.len() < population_size {
            let first = elite[rng.gen_range(0..elite.len())];
            let second = elite[rng.gen_range(0..elite.len())];
            let child = crossover(first, second, rng);
            next.push(mutate(child, &valid, config.mutation_rate, rng));
        }
        population = next;
    }

    debug!(
        column = best.0,
        fitness = best.1,
        generations,
        population_size,
        "Genetic search complete"
    );

    Ok(best.0)
}

/// Pair each genome with its fitness, fittest first. Ties keep population order.
fn rank(
    board: &Board,
    piece: Piece,
    evaluator: &Evaluator,
    population: &[u8],
) -> Result<Vec<(u8, i64)>, OptimizerError> {
    let mut ranked = population
        .iter()
        .map(|&column| Ok((column, fitness(board, piece, evaluator, column)?)))
        .collect::<Result<Vec<_>, OptimizerError>>()?;
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(ranked)
}

pub(crate) fn fitness(
    board: &Board,
    piece: Piece,
    evaluator: &Evaluator,
    column: u8,
) -> Result<i64, OptimizerError> {
    let child = board.with_move(column, piece)?;
    Ok(evaluator.score(&child, piece))
}

/// A one-gene genome has nothing to recombine: the child is either parent.
fn crossover(first: u8, second: u8, rng: &mut ChaCha20Rng) -> u8 {
    if rng.gen_bool(0.5) {
        first
    } else {
        second
    }
}

fn mutate(genome: u8, valid: &[u8], rate: f64, rng: &mut ChaCha20Rng) -> u8 {
    if rng.gen::<f64>() < rate {
        random_column(valid, rng)
    } else {
        genome
    }
}

fn random_column(valid: &[u8], rng: &mut ChaCha20Rng) -> u8 {
    valid[rng.gen_range(0..valid.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = GeneticConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.elite_size, 10);
        assert!((config.mutation_rate - 0.2).abs() < 1e-12);
        assert_eq!(config.generations, 50);
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let eval = Evaluator::standard();
        let b = Board::new();
        // Center drop scores 3, every other column 0
        let ranked = rank(&b, Piece::Red, &eval, &[0, 3, 6, 3, 1]).unwrap();
        assert_eq!(ranked, vec![(3, 3), (3, 3), (0, 0), (6, 0), (1, 0)]);
    }

    #[test]
    fn test_mutate_always_valid() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let valid = vec![1, 4, 5];
        for _ in 0..200 {
            assert!(valid.contains(&mutate(4, &valid, 1.0, &mut rng)));
            assert_eq!(mutate(4, &valid, 0.0, &mut rng), 4);
        }
    }

    #[test]
    fn test_crossover_picks_a_parent() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut seen = [false; 2];
        for _ in 0..100 {
            match crossover(2, 5, &mut rng) {
                2 => seen[0] = true,
                5 => seen[1] = true,
                other => panic!("unexpected child {}", other),
            }
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn test_evolve_prefers_center_on_empty_board() {
        let eval = Evaluator::standard();
        let config = GeneticConfig::default();
        for seed in 0..10 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let col = evolve(&Board::new(), Piece::Red, &eval, &config, &mut rng).unwrap();
            assert_eq!(col, 3, "seed={}", seed);
        }
    }

    #[test]
    fn test_evolve_completes_four() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YYY....", //
            "RRR....", //
        ]);
        let eval = Evaluator::standard();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let col = evolve(&b, Piece::Red, &eval, &GeneticConfig::default(), &mut rng).unwrap();
        assert_eq!(col, 3);
    }

    #[test]
    fn test_evolve_single_valid_column() {
        let b = board(&[
            "RYRYRY.", //
            "RYRYRYR", //
            "YRYRYRY", //
            "YRYRYRY", //
            "RYRYRYR", //
            "RYRYRYR", //
        ]);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let col = evolve(
            &b,
            Piece::Yellow,
            &Evaluator::standard(),
            &GeneticConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(col, 6);
    }

    #[test]
    fn test_evolve_full_board() {
        let b = board(&[
            "RYRYRYR", //
            "RYRYRYR", //
            "YRYRYRY", //
            "YRYRYRY", //
            "RYRYRYR", //
            "RYRYRYR", //
        ]);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = evolve(
            &b,
            Piece::Red,
            &Evaluator::standard(),
            &GeneticConfig::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, OptimizerError::NoLegalMoves));
    }

    #[test]
    fn test_evolve_clamps_degenerate_sizes() {
        let config = GeneticConfig::default()
            .with_population_size(0)
            .with_elite_size(0)
            .with_generations(0);
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let b = Board::new();
        let col = evolve(&b, Piece::Red, &Evaluator::standard(), &config, &mut rng).unwrap();
        assert!(b.valid_columns().contains(&col));
    }

    #[test]
    fn test_evolve_same_seed_same_column() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            "...Y...", //
            "..RR...", //
            "..YRY..", //
        ]);
        let eval = Evaluator::positional();
        let config = GeneticConfig::default().with_generations(10);
        let mut first = ChaCha20Rng::seed_from_u64(8);
        let mut second = ChaCha20Rng::seed_from_u64(8);
        let a = evolve(&b, Piece::Red, &eval, &config, &mut first).unwrap();
        let c = evolve(&b, Piece::Red, &eval, &config, &mut second).unwrap();
        assert_eq!(a, c);
    }
}
