//! Synthetic opponent generation

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::profile::SkillProfile;
use crate::random::RandomSource;

/// Opponent strength, weakest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Rookie = 1,
    Amateur = 2,
    Pro = 3,
    Elite = 4,
}

/// Attribute generation parameters: each rating is `base + roll(variation)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierConfig {
    pub base: i32,
    pub variation: u32,
}

impl TierConfig {
    pub fn expected_rating(&self) -> f64 {
        self.base as f64 + self.variation as f64 / 2.0
    }
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Rookie,
        DifficultyTier::Amateur,
        DifficultyTier::Pro,
        DifficultyTier::Elite,
    ];

    pub fn config(&self) -> TierConfig {
        match self {
            DifficultyTier::Rookie => TierConfig { base: 20, variation: 15 },
            DifficultyTier::Amateur => TierConfig { base: 40, variation: 15 },
            DifficultyTier::Pro => TierConfig { base: 60, variation: 15 },
            DifficultyTier::Elite => TierConfig { base: 75, variation: 20 },
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyTier::Rookie => "Rookie",
            DifficultyTier::Amateur => "Amateur",
            DifficultyTier::Pro => "Pro",
            DifficultyTier::Elite => "Elite",
        }
    }
}

impl TryFrom<u8> for DifficultyTier {
    type Error = EngineError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(DifficultyTier::Rookie),
            2 => Ok(DifficultyTier::Amateur),
            3 => Ok(DifficultyTier::Pro),
            4 => Ok(DifficultyTier::Elite),
            other => Err(EngineError::UnknownTier(other)),
        }
    }
}

/// Presentation-only identity; never affects simulation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentIdentity {
    pub name: String,
    pub avatar_id: u16,
}

const IDENTITY_POOL: [(&str, u16); 8] = [
    ("Kenji Ota", 101),
    ("Lena Moreau", 102),
    ("Marco Bellini", 103),
    ("Sofia Lindqvist", 104),
    ("Daniel Okafor", 105),
    ("Hana Kim", 106),
    ("Tomas Novak", 107),
    ("Ines Duarte", 108),
];

/// A generated away-side opponent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentSpec {
    pub tier: DifficultyTier,
    pub profile: SkillProfile,
    pub identity: OpponentIdentity,
}

/// Generate an opponent for `tier`.
///
/// Attributes are drawn in profile order (serve, return, volley, stroke,
/// mental, stamina), then the identity.
pub fn generate_opponent<R: RandomSource + ?Sized>(tier: DifficultyTier, rng: &mut R) -> OpponentSpec {
    let TierConfig { base, variation } = tier.config();
    let mut rating = || base + rng.roll(variation) as i32;

    let profile = SkillProfile {
        serve: rating(),
        return_: rating(),
        volley: rating(),
        stroke: rating(),
        mental: rating(),
        stamina: rating(),
    };
    let (name, avatar_id) = IDENTITY_POOL[rng.pick(IDENTITY_POOL.len())];
    let identity = OpponentIdentity { name: name.to_string(), avatar_id };

    debug!(tier = tier.name(), name, "generated opponent");

    OpponentSpec { tier, profile, identity }
}
