//! Error types for boundary validation and simulation limits

/// Errors surfaced by the engine.
///
/// Everything except `PointLimitExceeded` is a contract violation caught
/// before the first point is played.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("skill attribute `{attribute}` is negative ({value})")]
    NegativeAttribute { attribute: &'static str, value: i32 },

    #[error("malformed skill profile: {0}")]
    MalformedProfile(String),

    #[error("unknown difficulty tier {0} (expected 1-4)")]
    UnknownTier(u8),

    #[error("point limit of {limit} exceeded without a winner")]
    PointLimitExceeded { limit: u32 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
