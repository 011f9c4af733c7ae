//! Adversarial search configuration.

/// How the opponent's ply is scored by expectimax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectationMode {
    /// Running minimum of the replies, starting from 0, with the pruning
    /// bound `floor(value / branching)`. Not a probability-weighted average.
    #[default]
    Faithful,
    /// Uniform average over all replies. No pruning at the chance node.
    Average,
}

impl std::str::FromStr for ExpectationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "faithful" => Ok(Self::Faithful),
            "average" => Ok(Self::Average),
            other => Err(format!("unknown expectation mode: {}", other)),
        }
    }
}

/// Which strategy scores the opponent's plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Minimax,
    Expectimax(ExpectationMode),
}

/// Configuration for adversarial search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Plies to look ahead. A root search always expands at least one ply.
    pub depth: u32,

    /// Opponent model used on the opponent's plies.
    pub variant: Variant,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            variant: Variant::Minimax,
        }
    }
}

impl SearchConfig {
    /// Minimax at the default depth.
    pub fn minimax() -> Self {
        Self::default()
    }

    /// Faithful expectimax at the default depth.
    pub fn expectimax() -> Self {
        Self::default().with_variant(Variant::Expectimax(ExpectationMode::Faithful))
    }

    /// Create a shallow config for testing.
    pub fn for_testing() -> Self {
        Self {
            depth: 3,
            variant: Variant::Minimax,
        }
    }

    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: set the strategy.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}
