//! Game state machine
//!
//! Points accumulate until one side has at least four with a two-point
//! lead. Deuce and advantage fall out of the lead rule; there is no separate
//! state for them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::MatchConfig;
use crate::error::{EngineError, Result};
use crate::point::{play_point, PointResult};
use crate::profile::{Side, SkillProfile};
use crate::random::RandomSource;

/// Points needed to take a regular game
pub const GAME_POINTS: u32 = 4;

/// Lead required to close out a game, tiebreak or set
pub const MIN_LEAD: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Side),
}

/// Running point counts within one game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    points: [u32; 2],
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, side: Side) -> u32 {
        self.points[side.index()]
    }

    pub fn total(&self) -> u32 {
        self.points[0] + self.points[1]
    }

    /// Credit a point to `winner` and report the resulting status
    pub fn record(&mut self, winner: Side) -> GameStatus {
        self.points[winner.index()] += 1;
        self.status()
    }

    pub fn status(&self) -> GameStatus {
        match leader_by_margin(self.points, GAME_POINTS) {
            Some(side) => GameStatus::Won(side),
            None => GameStatus::InProgress,
        }
    }

    /// Who serves the next point: the role swaps every two points played
    pub fn server(&self, first_server: Side) -> Side {
        if (self.total() / 2) % 2 == 0 {
            first_server
        } else {
            first_server.opponent()
        }
    }
}

/// Side holding at least `target` with a lead of `MIN_LEAD` or more
pub(crate) fn leader_by_margin(counts: [u32; 2], target: u32) -> Option<Side> {
    let [home, away] = counts;
    if home >= target && home >= away + MIN_LEAD {
        Some(Side::Home)
    } else if away >= target && away >= home + MIN_LEAD {
        Some(Side::Away)
    } else {
        None
    }
}

/// Result of a completed game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Side,
    pub first_server: Side,
    pub home_points: u32,
    pub away_points: u32,
    pub points: Vec<PointResult>,
}

/// Play a regular game to completion
pub fn play_game<R: RandomSource + ?Sized>(
    home: &SkillProfile,
    away: &SkillProfile,
    first_server: Side,
    config: &MatchConfig,
    rng: &mut R,
) -> Result<GameResult> {
    let mut state = GameState::new();
    let mut points = Vec::with_capacity(8);

    loop {
        if state.total() >= config.point_limit {
            warn!(limit = config.point_limit, "game exceeded point limit");
            return Err(EngineError::PointLimitExceeded { limit: config.point_limit });
        }

        let server = state.server(first_server);
        let point = play_point(home, away, server, config.roll_max, rng);
        points.push(point);

        if let GameStatus::Won(winner) = state.record(point.winner) {
            return Ok(GameResult {
                winner,
                first_server,
                home_points: state.points(Side::Home),
                away_points: state.points(Side::Away),
                points,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::tests::{forced, Scripted};
    use crate::random::SeededRng;

    /// Script a game where points go to `winners` in order
    fn script(first_server: Side, winners: &[Side]) -> Scripted {
        let mut state = GameState::new();
        let mut values = Vec::new();
        for w in winners {
            values.extend(forced(state.server(first_server), *w));
            state.record(*w);
        }
        Scripted::new(values)
    }

    #[test]
    fn test_straight_game() {
        let mut s = GameState::new();
        assert_eq!(s.record(Side::Home), GameStatus::InProgress);
        assert_eq!(s.record(Side::Home), GameStatus::InProgress);
        assert_eq!(s.record(Side::Home), GameStatus::InProgress);
        assert_eq!(s.record(Side::Home), GameStatus::Won(Side::Home));
    }

    #[test]
    fn test_four_three_is_not_won() {
        let mut s = GameState::new();
        for _ in 0..3 {
            s.record(Side::Home);
            s.record(Side::Away);
        }
        assert_eq!(s.record(Side::Away), GameStatus::InProgress);
        assert_eq!(s.points(Side::Away), 4);
        assert_eq!(s.record(Side::Home), GameStatus::InProgress);
        assert_eq!(s.record(Side::Home), GameStatus::InProgress);
        assert_eq!(s.record(Side::Home), GameStatus::Won(Side::Home));
        assert_eq!(s.points(Side::Home), 6);
        assert_eq!(s.points(Side::Away), 4);
    }

    #[test]
    fn test_server_swaps_every_two_points() {
        let mut s = GameState::new();
        let order: Vec<Side> = (0..6)
            .map(|i| {
                let server = s.server(Side::Home);
                s.record(if i % 2 == 0 { Side::Home } else { Side::Away });
                server
            })
            .collect();
        assert_eq!(
            order,
            vec![Side::Home, Side::Home, Side::Away, Side::Away, Side::Home, Side::Home]
        );
    }

    #[test]
    fn test_play_game_deuce() {
        let p = SkillProfile::uniform(50);
        let winners = [
            Side::Home, Side::Away, Side::Home, Side::Away, Side::Home, Side::Away,
            Side::Away, Side::Home, Side::Away, Side::Away,
        ];
        let mut rng = script(Side::Home, &winners);

        let game = play_game(&p, &p, Side::Home, &MatchConfig::standard(), &mut rng).unwrap();
        assert_eq!(game.winner, Side::Away);
        assert_eq!(game.home_points, 4);
        assert_eq!(game.away_points, 6);
        assert_eq!(game.points.len(), 10);
        let servers: Vec<Side> = game.points.iter().map(|p| p.server).collect();
        assert_eq!(&servers[..4], &[Side::Home, Side::Home, Side::Away, Side::Away]);
    }

    #[test]
    fn test_play_game_terminates_with_lead() {
        let home = SkillProfile::uniform(55);
        let away = SkillProfile::uniform(50);
        let config = MatchConfig::standard();

        for i in 0..500 {
            let mut rng = SeededRng::new(&[11u8; 32], i);
            let game = play_game(&home, &away, Side::Home, &config, &mut rng).unwrap();
            let (w, l) = match game.winner {
                Side::Home => (game.home_points, game.away_points),
                Side::Away => (game.away_points, game.home_points),
            };
            assert!(w >= GAME_POINTS && w >= l + MIN_LEAD, "bad game score {}-{}", w, l);
            assert_eq!(game.points.len() as u32, w + l);
        }
    }

    #[test]
    fn test_point_limit() {
        let p = SkillProfile::uniform(50);
        let config = MatchConfig { point_limit: 5, ..MatchConfig::standard() };
        // alternate winners forever: never a two-point lead
        let winners: Vec<Side> = (0..20)
            .map(|i| if i % 2 == 0 { Side::Home } else { Side::Away })
            .collect();
        let mut rng = script(Side::Home, &winners);

        assert_eq!(
            play_game(&p, &p, Side::Home, &config, &mut rng),
            Err(EngineError::PointLimitExceeded { limit: 5 })
        );
    }

    #[test]
    fn test_leader_by_margin() {
        assert_eq!(leader_by_margin([4, 2], 4), Some(Side::Home));
        assert_eq!(leader_by_margin([3, 5], 4), Some(Side::Away));
        assert_eq!(leader_by_margin([4, 3], 4), None);
        assert_eq!(leader_by_margin([3, 0], 4), None);
        assert_eq!(leader_by_margin([7, 6], 7), None);
        assert_eq!(leader_by_margin([9, 7], 7), Some(Side::Home));
    }
}
