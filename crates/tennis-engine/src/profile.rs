//! Skill profiles and the categories points are contested in

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One of the two contestants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Index into per-side `[T; 2]` tallies
    pub(crate) fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }
}

/// The skill a point is contested in.
///
/// Chosen uniformly per point, independent of who is serving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointCategory {
    Serve,
    Return,
    Volley,
    Stroke,
    Mental,
}

impl PointCategory {
    /// Draw order: `rng.pick(5)` indexes this array
    pub const ALL: [PointCategory; 5] = [
        PointCategory::Serve,
        PointCategory::Return,
        PointCategory::Volley,
        PointCategory::Stroke,
        PointCategory::Mental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PointCategory::Serve => "serve",
            PointCategory::Return => "return",
            PointCategory::Volley => "volley",
            PointCategory::Stroke => "stroke",
            PointCategory::Mental => "mental",
        }
    }
}

/// Six-attribute rating record for one contestant.
///
/// No upper cap is enforced. Negative values are rejected by [`validate`](Self::validate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillProfile {
    pub serve: i32,
    #[serde(rename = "return")]
    pub return_: i32,
    pub volley: i32,
    pub stroke: i32,
    pub mental: i32,
    pub stamina: i32,
}

impl SkillProfile {
    /// Profile with every attribute set to `value`
    pub fn uniform(value: i32) -> Self {
        Self {
            serve: value,
            return_: value,
            volley: value,
            stroke: value,
            mental: value,
            stamina: value,
        }
    }

    /// Parse and validate a JSON profile. All six attributes are required.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: SkillProfile = serde_json::from_str(json)
            .map_err(|e| EngineError::MalformedProfile(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Rating used when a point is contested in `category`
    pub fn rating(&self, category: PointCategory) -> i32 {
        match category {
            PointCategory::Serve => self.serve,
            PointCategory::Return => self.return_,
            PointCategory::Volley => self.volley,
            PointCategory::Stroke => self.stroke,
            PointCategory::Mental => self.mental,
        }
    }

    pub fn attributes(&self) -> [(&'static str, i32); 6] {
        [
            ("serve", self.serve),
            ("return", self.return_),
            ("volley", self.volley),
            ("stroke", self.stroke),
            ("mental", self.mental),
            ("stamina", self.stamina),
        ]
    }

    /// Reject negative ratings; the first offending attribute is reported
    pub fn validate(&self) -> Result<()> {
        for (attribute, value) in self.attributes() {
            if value < 0 {
                return Err(EngineError::NegativeAttribute { attribute, value });
            }
        }
        Ok(())
    }

    /// Mean of the six attributes
    pub fn average(&self) -> f64 {
        let sum: i64 = self.attributes().iter().map(|(_, v)| *v as i64).sum();
        sum as f64 / 6.0
    }
}
