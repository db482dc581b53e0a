//! Per-side performance aggregation

use serde::{Deserialize, Serialize};

use crate::point::PointResult;
use crate::profile::{PointCategory, Side};
use crate::set::SetResult;

/// Point and game tallies for one side across a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub serve_points: u32,
    pub return_points: u32,
    pub volley_points: u32,
    pub stroke_points: u32,
    pub mental_points: u32,
    pub total_points: u32,
    pub games_won: u32,
    pub tiebreaks_won: u32,
}

impl PerformanceStats {
    pub fn category_points(&self, category: PointCategory) -> u32 {
        match category {
            PointCategory::Serve => self.serve_points,
            PointCategory::Return => self.return_points,
            PointCategory::Volley => self.volley_points,
            PointCategory::Stroke => self.stroke_points,
            PointCategory::Mental => self.mental_points,
        }
    }

    fn record_point(&mut self, category: PointCategory) {
        let slot = match category {
            PointCategory::Serve => &mut self.serve_points,
            PointCategory::Return => &mut self.return_points,
            PointCategory::Volley => &mut self.volley_points,
            PointCategory::Stroke => &mut self.stroke_points,
            PointCategory::Mental => &mut self.mental_points,
        };
        *slot += 1;
        self.total_points += 1;
    }
}

/// Both sides' stats, folded set by set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct StatsAccumulator {
    sides: [PerformanceStats; 2],
}

impl StatsAccumulator {
    pub(crate) fn add_point(&mut self, point: &PointResult) {
        self.sides[point.winner.index()].record_point(point.category);
    }

    pub(crate) fn add_set(&mut self, set: &SetResult) {
        for point in set.points() {
            self.add_point(point);
        }
        for game in &set.games {
            self.sides[game.winner.index()].games_won += 1;
        }
        if let Some(tiebreak) = &set.tiebreak {
            self.sides[tiebreak.winner.index()].tiebreaks_won += 1;
        }
    }

    pub(crate) fn get(&self, side: Side) -> PerformanceStats {
        self.sides[side.index()]
    }
}
