//! Point resolution

use serde::{Deserialize, Serialize};

use crate::profile::{PointCategory, Side, SkillProfile};
use crate::random::RandomSource;

/// Upper bound (inclusive) of the random roll added to each contest total
pub const DEFAULT_ROLL_MAX: u32 = 20;

/// Outcome of a single point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointResult {
    pub category: PointCategory,
    pub server: Side,
    pub server_total: i64,
    pub receiver_total: i64,
    pub winner: Side,
}

impl PointResult {
    pub fn receiver(&self) -> Side {
        self.server.opponent()
    }

    /// Contest total for `side`
    pub fn total_for(&self, side: Side) -> i64 {
        if side == self.server {
            self.server_total
        } else {
            self.receiver_total
        }
    }
}

/// Resolve one point between the serving and receiving profiles.
///
/// Draw order is fixed: category, server roll, receiver roll. The server
/// takes the point only with a strictly greater total, so ties go to the
/// receiver.
pub fn resolve_point<R: RandomSource + ?Sized>(
    server_profile: &SkillProfile,
    receiver_profile: &SkillProfile,
    server: Side,
    roll_max: u32,
    rng: &mut R,
) -> PointResult {
    let category = PointCategory::ALL[rng.pick(PointCategory::ALL.len())];

    let server_total = server_profile.rating(category) as i64 + rng.roll(roll_max) as i64;
    let receiver_total = receiver_profile.rating(category) as i64 + rng.roll(roll_max) as i64;

    let winner = if server_total > receiver_total {
        server
    } else {
        server.opponent()
    };

    PointResult {
        category,
        server,
        server_total,
        receiver_total,
        winner,
    }
}

/// Resolve a point with `server` taken from the home/away pairing
pub(crate) fn play_point<R: RandomSource + ?Sized>(
    home: &SkillProfile,
    away: &SkillProfile,
    server: Side,
    roll_max: u32,
    rng: &mut R,
) -> PointResult {
    match server {
        Side::Home => resolve_point(home, away, server, roll_max, rng),
        Side::Away => resolve_point(away, home, server, roll_max, rng),
    }
}
