//! Set state machine
//!
//! Games accumulate until one side has six with a two-game lead. At 6-6 a
//! tiebreak is played point by point (first to seven, lead of two) and the
//! set is recorded 7-6 whatever the tiebreak score.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::engine::MatchConfig;
use crate::error::{EngineError, Result};
use crate::game::{leader_by_margin, play_game, GameResult};
use crate::point::{play_point, PointResult};
use crate::profile::{Side, SkillProfile};
use crate::random::RandomSource;

/// Games needed to take a set outright
pub const SET_GAMES: u32 = 6;

/// Points needed to take a tiebreak
pub const TIEBREAK_POINTS: u32 = 7;

/// Combined games at which the tiebreak is forced (6-6)
pub const MAX_GAMES_BEFORE_TIEBREAK: u32 = 2 * SET_GAMES;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetStatus {
    InProgress,
    TiebreakInProgress,
    Won { winner: Side, home_games: u32, away_games: u32 },
}

/// Running game counts within one set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetState {
    games: [u32; 2],
    tiebreak: bool,
    winner: Option<Side>,
}

impl SetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self, side: Side) -> u32 {
        self.games[side.index()]
    }

    pub fn total_games(&self) -> u32 {
        self.games[0] + self.games[1]
    }

    pub fn in_tiebreak(&self) -> bool {
        self.tiebreak && self.winner.is_none()
    }

    /// Credit a game to `winner`. Ignored once the set is decided or in a tiebreak.
    pub fn record_game(&mut self, winner: Side) -> SetStatus {
        if self.tiebreak || self.winner.is_some() {
            return self.status();
        }
        self.games[winner.index()] += 1;

        if let Some(side) = leader_by_margin(self.games, SET_GAMES) {
            self.winner = Some(side);
        } else if self.games[0] >= SET_GAMES && self.games[1] >= SET_GAMES {
            debug_assert_eq!(self.total_games(), MAX_GAMES_BEFORE_TIEBREAK);
            self.tiebreak = true;
        }
        self.status()
    }

    /// Close the set for the tiebreak winner at 7-6. Ignored outside a tiebreak.
    pub fn record_tiebreak(&mut self, winner: Side) -> SetStatus {
        if !self.in_tiebreak() {
            return self.status();
        }
        self.games[winner.index()] += 1;
        self.winner = Some(winner);
        self.status()
    }

    pub fn status(&self) -> SetStatus {
        match self.winner {
            Some(winner) => SetStatus::Won {
                winner,
                home_games: self.games[0],
                away_games: self.games[1],
            },
            None if self.tiebreak => SetStatus::TiebreakInProgress,
            None => SetStatus::InProgress,
        }
    }
}

/// Running point counts within a tiebreak
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TiebreakState {
    points: [u32; 2],
}

impl TiebreakState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, side: Side) -> u32 {
        self.points[side.index()]
    }

    pub fn total(&self) -> u32 {
        self.points[0] + self.points[1]
    }

    /// Credit a point and return the tiebreak winner once decided
    pub fn record(&mut self, winner: Side) -> Option<Side> {
        self.points[winner.index()] += 1;
        leader_by_margin(self.points, TIEBREAK_POINTS)
    }

    /// Service alternates every point
    pub fn server(&self, first_server: Side) -> Side {
        if self.total() % 2 == 0 {
            first_server
        } else {
            first_server.opponent()
        }
    }
}

/// Tiebreak played at 6-6
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiebreakResult {
    pub winner: Side,
    pub first_server: Side,
    pub home_points: u32,
    pub away_points: u32,
    pub points: Vec<PointResult>,
}

/// Result of a completed set
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResult {
    pub winner: Side,
    pub home_games: u32,
    pub away_games: u32,
    pub first_server: Side,
    pub games: Vec<GameResult>,
    pub tiebreak: Option<TiebreakResult>,
}

impl SetResult {
    pub fn games_for(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_games,
            Side::Away => self.away_games,
        }
    }

    /// Who opens the following set; the tiebreak takes one service turn
    pub fn next_server(&self) -> Side {
        let turns = self.games.len() + usize::from(self.tiebreak.is_some());
        if turns % 2 == 0 {
            self.first_server
        } else {
            self.first_server.opponent()
        }
    }

    /// Every point of the set in play order
    pub fn points(&self) -> impl Iterator<Item = &PointResult> {
        self.games
            .iter()
            .flat_map(|g| g.points.iter())
            .chain(self.tiebreak.iter().flat_map(|t| t.points.iter()))
    }
}

fn play_tiebreak<R: RandomSource + ?Sized>(
    home: &SkillProfile,
    away: &SkillProfile,
    first_server: Side,
    config: &MatchConfig,
    rng: &mut R,
) -> Result<TiebreakResult> {
    let mut state = TiebreakState::new();
    let mut points = Vec::with_capacity(16);

    loop {
        if state.total() >= config.point_limit {
            warn!(limit = config.point_limit, "tiebreak exceeded point limit");
            return Err(EngineError::PointLimitExceeded { limit: config.point_limit });
        }

        let point = play_point(home, away, state.server(first_server), config.roll_max, rng);
        points.push(point);

        if let Some(winner) = state.record(point.winner) {
            return Ok(TiebreakResult {
                winner,
                first_server,
                home_points: state.points(Side::Home),
                away_points: state.points(Side::Away),
                points,
            });
        }
    }
}

/// Play a set to completion, `first_server` opening the first game
pub fn play_set<R: RandomSource + ?Sized>(
    home: &SkillProfile,
    away: &SkillProfile,
    first_server: Side,
    config: &MatchConfig,
    rng: &mut R,
) -> Result<SetResult> {
    let mut state = SetState::new();
    let mut games = Vec::with_capacity(MAX_GAMES_BEFORE_TIEBREAK as usize);
    let mut tiebreak = None;
    let mut server = first_server;

    loop {
        match state.status() {
            SetStatus::InProgress => {
                let game = play_game(home, away, server, config, rng)?;
                state.record_game(game.winner);
                games.push(game);
                server = server.opponent();
            }
            SetStatus::TiebreakInProgress => {
                trace!(server = ?server, "set tied 6-6, playing tiebreak");
                let result = play_tiebreak(home, away, server, config, rng)?;
                state.record_tiebreak(result.winner);
                tiebreak = Some(result);
            }
            SetStatus::Won { winner, home_games, away_games } => {
                debug!(?winner, home_games, away_games, "set complete");
                return Ok(SetResult {
                    winner,
                    home_games,
                    away_games,
                    first_server,
                    games,
                    tiebreak,
                });
            }
        }
    }
}
