//! Match execution engine

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::point::{PointResult, DEFAULT_ROLL_MAX};
use crate::profile::{Side, SkillProfile};
use crate::random::{RandomSource, SeededRng};
use crate::set::{play_set, SetResult};
use crate::stats::{PerformanceStats, StatsAccumulator};

/// Sets needed to win a best-of-three match
pub const SETS_TO_WIN: u32 = 2;

/// Upper bound on sets in a match
pub const MAX_SETS: u32 = 2 * SETS_TO_WIN - 1;

const SECONDS_PER_POINT: u32 = 40;
const SECONDS_PER_GAME: u32 = 30;

/// Tunable simulation parameters.
///
/// Scoring structure (game, set, tiebreak and match thresholds) is fixed;
/// only the roll width, the runaway safety ceiling and the opening server
/// are configurable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Inclusive upper bound of the per-side contest roll
    pub roll_max: u32,
    /// Points allowed in one game or tiebreak before giving up
    pub point_limit: u32,
    /// Side serving the first game of the match
    pub first_server: Side,
}

impl MatchConfig {
    /// Standard config used for every ranked and exhibition match
    pub fn standard() -> Self {
        Self {
            roll_max: DEFAULT_ROLL_MAX,
            point_limit: 1000,
            first_server: Side::Home,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Side,
    pub home_sets: u32,
    pub away_sets: u32,
    pub sets: Vec<SetResult>,
    pub home_stats: PerformanceStats,
    pub away_stats: PerformanceStats,
    /// Cosmetic length estimate, not measured time
    pub estimated_minutes: u32,
}

impl MatchResult {
    pub fn sets_for(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_sets,
            Side::Away => self.away_sets,
        }
    }

    pub fn stats_for(&self, side: Side) -> &PerformanceStats {
        match side {
            Side::Home => &self.home_stats,
            Side::Away => &self.away_stats,
        }
    }

    /// Every point of the match in play order
    pub fn points(&self) -> impl Iterator<Item = &PointResult> {
        self.sets.iter().flat_map(|s| s.points())
    }

    pub fn total_points(&self) -> u32 {
        self.home_stats.total_points + self.away_stats.total_points
    }
}

fn estimate_minutes(points: u32, games: u32) -> u32 {
    (points * SECONDS_PER_POINT + games * SECONDS_PER_GAME).div_ceil(60)
}

/// Run a best-of-three match between two profiles
///
/// # Arguments
/// * `home` - Home side's profile
/// * `away` - Away side's profile (persisted or generated)
/// * `config` - Simulation parameters
/// * `rng` - Random source; every draw of the match comes from it
///
/// # Returns
/// Complete match result with set-by-set and point-by-point details, or an
/// error if either profile is invalid
pub fn simulate_match<R: RandomSource + ?Sized>(
    home: &SkillProfile,
    away: &SkillProfile,
    config: &MatchConfig,
    rng: &mut R,
) -> Result<MatchResult> {
    home.validate()?;
    away.validate()?;

    let mut sets_won = [0u32; 2];
    let mut sets: Vec<SetResult> = Vec::with_capacity(MAX_SETS as usize);
    let mut stats = StatsAccumulator::default();
    let mut server = config.first_server;

    while sets_won.iter().all(|won| *won < SETS_TO_WIN) {
        let set = play_set(home, away, server, config, rng)?;
        sets_won[set.winner.index()] += 1;
        stats.add_set(&set);
        server = set.next_server();
        sets.push(set);
    }

    let winner = if sets_won[Side::Home.index()] >= SETS_TO_WIN {
        Side::Home
    } else {
        Side::Away
    };
    let home_stats = stats.get(Side::Home);
    let away_stats = stats.get(Side::Away);

    let points = home_stats.total_points + away_stats.total_points;
    let games: u32 = sets
        .iter()
        .map(|s| s.games.len() as u32 + u32::from(s.tiebreak.is_some()))
        .sum();

    debug!(
        ?winner,
        home_sets = sets_won[0],
        away_sets = sets_won[1],
        points,
        "match complete"
    );

    Ok(MatchResult {
        winner,
        home_sets: sets_won[0],
        away_sets: sets_won[1],
        sets,
        home_stats,
        away_stats,
        estimated_minutes: estimate_minutes(points, games),
    })
}

/// Run a match from a 32-byte seed and match index with the standard config
pub fn run_seeded_match(
    home: &SkillProfile,
    away: &SkillProfile,
    seed: &[u8; 32],
    match_index: u32,
) -> Result<MatchResult> {
    let mut rng = SeededRng::new(seed, match_index);
    simulate_match(home, away, &MatchConfig::standard(), &mut rng)
}

/// Aggregate outcome of repeated matches between the same two profiles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub matches: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub three_set_matches: u32,
    pub tiebreaks: u32,
}

impl SeriesSummary {
    pub fn home_win_rate(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.home_wins as f64 / self.matches as f64
    }
}

/// Simulate `matches` independent matches, each on its own stream derived from `seed`
pub fn simulate_series(
    home: &SkillProfile,
    away: &SkillProfile,
    matches: u32,
    seed: u64,
    config: &MatchConfig,
) -> Result<SeriesSummary> {
    let base = SeededRng::from_u64(seed);
    let mut summary = SeriesSummary { matches, ..Default::default() };

    for i in 0..matches {
        let mut rng = base.for_stream(i);
        let result = simulate_match(home, away, config, &mut rng)?;

        match result.winner {
            Side::Home => summary.home_wins += 1,
            Side::Away => summary.away_wins += 1,
        }
        if result.sets.len() as u32 == MAX_SETS {
            summary.three_set_matches += 1;
        }
        summary.tiebreaks += result.sets.iter().filter(|s| s.tiebreak.is_some()).count() as u32;
    }

    debug!(matches, home_wins = summary.home_wins, "series complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_match_determinism() {
        let seed = [42u8; 32];
        let home = SkillProfile::uniform(55);
        let away = SkillProfile::uniform(50);

        let result1 = run_seeded_match(&home, &away, &seed, 0).unwrap();
        let result2 = run_seeded_match(&home, &away, &seed, 0).unwrap();

        assert_eq!(result1, result2);
    }

    #[test]
    fn test_different_matches_differ() {
        let seed = [42u8; 32];
        let p = SkillProfile::uniform(50);

        let result1 = run_seeded_match(&p, &p, &seed, 0).unwrap();
        let result2 = run_seeded_match(&p, &p, &seed, 1).unwrap();

        let points1: Vec<_> = result1.points().map(|p| p.winner).collect();
        let points2: Vec<_> = result2.points().map(|p| p.winner).collect();
        assert_ne!(points1, points2);
    }

    #[test]
    fn test_best_of_three() {
        let p = SkillProfile::uniform(50);
        let seed = [7u8; 32];

        for i in 0..200 {
            let result = run_seeded_match(&p, &p, &seed, i).unwrap();
            let sets = result.sets.len() as u32;
            assert!(sets == 2 || sets == 3, "{} sets played", sets);
            assert_eq!(result.sets_for(result.winner), SETS_TO_WIN);
            assert!(result.sets_for(result.winner.opponent()) < SETS_TO_WIN);
            assert_eq!(result.home_sets + result.away_sets, sets);

            // the deciding set goes to the match winner
            assert_eq!(result.sets.last().unwrap().winner, result.winner);
        }
    }

    #[test]
    fn test_straight_sets_sweep() {
        let strong = SkillProfile::uniform(100);
        let weak = SkillProfile::uniform(0);

        let result = run_seeded_match(&strong, &weak, &[1u8; 32], 0).unwrap();
        assert_eq!(result.winner, Side::Home);
        assert_eq!(result.sets.len(), 2);
        assert_eq!((result.home_sets, result.away_sets), (2, 0));
        assert_eq!(result.home_stats.total_points, 48);
        assert_eq!(result.away_stats.total_points, 0);
        assert_eq!(result.home_stats.games_won, 12);
        // 48 points * 40s + 12 games * 30s = 2280s
        assert_eq!(result.estimated_minutes, 38);
    }

    #[test]
    fn test_stats_match_point_log() {
        let home = SkillProfile::uniform(60);
        let away = SkillProfile::uniform(55);
        let result = run_seeded_match(&home, &away, &[3u8; 32], 4).unwrap();

        let home_points = result.points().filter(|p| p.winner == Side::Home).count() as u32;
        let away_points = result.points().filter(|p| p.winner == Side::Away).count() as u32;
        assert_eq!(result.home_stats.total_points, home_points);
        assert_eq!(result.away_stats.total_points, away_points);
        assert_eq!(result.total_points(), result.points().count() as u32);

        let games: u32 = result.sets.iter().map(|s| s.home_games + s.away_games).sum();
        let counted = result.home_stats.games_won
            + result.away_stats.games_won
            + result.home_stats.tiebreaks_won
            + result.away_stats.tiebreaks_won;
        assert_eq!(games, counted);
    }

    #[test]
    fn test_service_carries_across_sets() {
        let strong = SkillProfile::uniform(100);
        let weak = SkillProfile::uniform(0);
        let config = MatchConfig { first_server: Side::Away, ..MatchConfig::standard() };
        let mut rng = SeededRng::from_u64(12);

        let result = simulate_match(&strong, &weak, &config, &mut rng).unwrap();
        assert_eq!(result.sets[0].first_server, Side::Away);
        // six games in the first set, so the second opens with the same server
        assert_eq!(result.sets[1].first_server, Side::Away);
    }

    #[test]
    fn test_rejects_negative_profile() {
        let good = SkillProfile::uniform(50);
        let bad = SkillProfile { stamina: -10, ..good };

        assert_eq!(
            run_seeded_match(&good, &bad, &[0u8; 32], 0),
            Err(EngineError::NegativeAttribute { attribute: "stamina", value: -10 })
        );
        assert!(run_seeded_match(&bad, &good, &[0u8; 32], 0).is_err());
    }

    #[test]
    fn test_series_counts() {
        let p = SkillProfile::uniform(50);
        let summary = simulate_series(&p, &p, 50, 9, &MatchConfig::standard()).unwrap();

        assert_eq!(summary.matches, 50);
        assert_eq!(summary.home_wins + summary.away_wins, 50);
        assert!(summary.three_set_matches <= 50);

        let again = simulate_series(&p, &p, 50, 9, &MatchConfig::standard()).unwrap();
        assert_eq!(summary, again);
    }

    #[test]
    fn test_empty_series() {
        let p = SkillProfile::uniform(50);
        let summary = simulate_series(&p, &p, 0, 1, &MatchConfig::standard()).unwrap();
        assert_eq!(summary.home_win_rate(), 0.0);
    }

    #[test]
    fn test_result_serializes() {
        let p = SkillProfile::uniform(50);
        let result = run_seeded_match(&p, &p, &[8u8; 32], 0).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
