//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! by the bots and the arena binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`QUADRANT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! QUADRANT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     QUADRANT_COMMON_SEED=42
//!     QUADRANT_MINIMAX_DEPTH=7
//!     QUADRANT_EXPECTIMAX_EXPECTATION=average
//!     QUADRANT_MCTS_TIMEOUT_MS=0
//!     QUADRANT_ARENA_YELLOW=annealing
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
