//! Display strings for replaying results
//!
//! Purely presentational. The engine never calls into this module.

use crate::engine::MatchResult;
use crate::point::PointResult;
use crate::profile::{PointCategory, Side};
use crate::set::SetResult;

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Home => "Home",
        Side::Away => "Away",
    }
}

/// One-line description of a point
pub fn describe_point(point: &PointResult) -> String {
    let winner = side_name(point.winner);
    let margin = (point.server_total - point.receiver_total).abs();

    let shot = match (point.category, point.winner == point.server) {
        (PointCategory::Serve, true) => "serves it out wide, unreturnable",
        (PointCategory::Serve, false) => "reads the serve and punishes it",
        (PointCategory::Return, true) => "handles a heavy return and closes the point",
        (PointCategory::Return, false) => "rips a return winner",
        (PointCategory::Volley, _) => "finishes at the net with a crisp volley",
        (PointCategory::Stroke, _) => "wins the baseline exchange",
        (PointCategory::Mental, _) => "holds nerve through a long rally",
    };

    if margin == 0 {
        format!("{} {} (level contest, receiver's point)", winner, shot)
    } else {
        format!(
            "{} {} ({} vs {})",
            winner,
            shot,
            point.total_for(point.winner),
            point.total_for(point.winner.opponent())
        )
    }
}

/// Set score from the home side's perspective, e.g. `7-6 (5)`
pub fn describe_set(set: &SetResult) -> String {
    match &set.tiebreak {
        Some(tb) => {
            let loser_points = tb.home_points.min(tb.away_points);
            format!("{}-{} ({})", set.home_games, set.away_games, loser_points)
        }
        None => format!("{}-{}", set.home_games, set.away_games),
    }
}

/// Scoreline and headline numbers for a finished match
pub fn describe_match(result: &MatchResult) -> String {
    let sets: Vec<String> = result.sets.iter().map(describe_set).collect();
    format!(
        "{} wins {} in about {} min; points won {}-{}",
        side_name(result.winner),
        sets.join(", "),
        result.estimated_minutes,
        result.home_stats.total_points,
        result.away_stats.total_points,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_seeded_match;
    use crate::profile::SkillProfile;
    use crate::set::TiebreakResult;

    #[test]
    fn test_describe_tied_point() {
        let point = PointResult {
            category: PointCategory::Stroke,
            server: Side::Home,
            server_total: 61,
            receiver_total: 61,
            winner: Side::Away,
        };
        assert_eq!(
            describe_point(&point),
            "Away wins the baseline exchange (level contest, receiver's point)"
        );
    }

    #[test]
    fn test_describe_point_totals() {
        let point = PointResult {
            category: PointCategory::Serve,
            server: Side::Away,
            server_total: 70,
            receiver_total: 52,
            winner: Side::Away,
        };
        assert_eq!(describe_point(&point), "Away serves it out wide, unreturnable (70 vs 52)");
    }

    #[test]
    fn test_describe_tiebreak_set() {
        let set = SetResult {
            winner: Side::Home,
            home_games: 7,
            away_games: 6,
            first_server: Side::Home,
            games: Vec::new(),
            tiebreak: Some(TiebreakResult {
                winner: Side::Home,
                first_server: Side::Home,
                home_points: 9,
                away_points: 7,
                points: Vec::new(),
            }),
        };
        assert_eq!(describe_set(&set), "7-6 (7)");
    }

    #[test]
    fn test_describe_match() {
        let strong = SkillProfile::uniform(100);
        let weak = SkillProfile::uniform(0);
        let result = run_seeded_match(&strong, &weak, &[1u8; 32], 0).unwrap();

        assert_eq!(describe_match(&result), "Home wins 6-0, 6-0 in about 38 min; points won 48-0");
    }
}
