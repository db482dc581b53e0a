//! WASM bindings for frontend match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{describe_match, generate_opponent, simulate_match};
use crate::{DifficultyTier, MatchConfig, MatchResult, SeededRng, SkillProfile};

fn parse_seed(seed: &[u8]) -> Result<[u8; 32], JsError> {
    seed.try_into()
        .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))
}

fn parse_profile(json: &str, label: &str) -> Result<SkillProfile, JsError> {
    SkillProfile::from_json(json)
        .map_err(|e| JsError::new(&format!("Invalid {} profile: {}", label, e)))
}

/// Simulate a match with full set, game and point details
///
/// # Arguments
/// * `home_json` - JSON serialized SkillProfile for the home side
/// * `away_json` - JSON serialized SkillProfile for the away side
/// * `seed` - 32-byte randomness seed
/// * `match_index` - Index mixed into the seed
///
/// # Returns
/// JSON serialized MatchResult
#[wasm_bindgen]
pub fn simulate_match_json(
    home_json: &str,
    away_json: &str,
    seed: &[u8],
    match_index: u32,
) -> Result<JsValue, JsError> {
    let home = parse_profile(home_json, "home")?;
    let away = parse_profile(away_json, "away")?;
    let seed_arr = parse_seed(seed)?;

    let mut rng = SeededRng::new(&seed_arr, match_index);
    let result = simulate_match(&home, &away, &MatchConfig::standard(), &mut rng)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Generate an opponent for a difficulty level (1-4)
#[wasm_bindgen]
pub fn generate_opponent_json(level: u8, seed: &[u8], index: u32) -> Result<JsValue, JsError> {
    let tier = DifficultyTier::try_from(level).map_err(|e| JsError::new(&e.to_string()))?;
    let seed_arr = parse_seed(seed)?;

    let mut rng = SeededRng::new(&seed_arr, index);
    let opponent = generate_opponent(tier, &mut rng);

    serde_wasm_bindgen::to_value(&opponent)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Human-readable scoreline for a serialized MatchResult
#[wasm_bindgen]
pub fn get_match_summary(result_json: &str) -> Result<String, JsError> {
    let result: MatchResult = serde_json::from_str(result_json)
        .map_err(|e| JsError::new(&format!("Invalid match result: {}", e)))?;

    Ok(describe_match(&result))
}

#[derive(serde::Serialize)]
struct TierInfo {
    level: u8,
    name: &'static str,
    base: i32,
    variation: u32,
}

/// Get all difficulty tiers with their generation parameters
#[wasm_bindgen]
pub fn get_difficulty_tiers() -> Result<JsValue, JsError> {
    let tiers: Vec<TierInfo> = DifficultyTier::ALL
        .iter()
        .map(|tier| {
            let config = tier.config();
            TierInfo {
                level: tier.level(),
                name: tier.name(),
                base: config.base,
                variation: config.variation,
            }
        })
        .collect();

    serde_wasm_bindgen::to_value(&tiers)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
