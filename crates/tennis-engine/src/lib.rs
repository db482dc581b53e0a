//! Tennis Match Engine
//!
//! Point-by-point simulation of a best-of-three tennis match between two
//! skill profiles. Every draw comes from a caller-supplied random source, so
//! a seed fully determines the result.
//! This crate is compiled to:
//! - Native (for server-side match resolution)
//! - WASM (for frontend match replay)

mod commentary;
mod engine;
mod error;
mod game;
mod opponent;
mod point;
mod profile;
mod random;
mod set;
mod stats;

#[cfg(feature = "wasm")]
mod wasm;

pub use commentary::{describe_match, describe_point, describe_set};
pub use engine::{
    run_seeded_match, simulate_match, simulate_series, MatchConfig, MatchResult, SeriesSummary,
    MAX_SETS, SETS_TO_WIN,
};
pub use error::{EngineError, Result};
pub use game::{play_game, GameResult, GameState, GameStatus, GAME_POINTS, MIN_LEAD};
pub use opponent::{generate_opponent, DifficultyTier, OpponentIdentity, OpponentSpec, TierConfig};
pub use point::{resolve_point, PointResult, DEFAULT_ROLL_MAX};
pub use profile::{PointCategory, Side, SkillProfile};
pub use random::{RandomSource, SeededRng};
pub use set::{
    play_set, SetResult, SetState, SetStatus, TiebreakResult, TiebreakState,
    MAX_GAMES_BEFORE_TIEBREAK, SET_GAMES, TIEBREAK_POINTS,
};
pub use stats::PerformanceStats;
