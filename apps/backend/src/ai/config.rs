//! AI configuration handling.
//!
//! Provides a typed interface over the JSON config attached to an AI seat,
//! extracting the standard fields while preserving AI-specific custom fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::Difficulty;

/// Standard configuration for AI players.
///
/// # Standard Fields
///
/// - `seed`: Optional RNG seed. When present the AI seeds its random number
///   generator from it, so the same seat makes the same choices on replay.
/// - `difficulty`: Which tier to build when no AI name is given.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "difficulty": "hard"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Fields outside the standard schema, kept for the AI to query.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AiConfig {
    /// Create an AiConfig from an optional JSON value.
    ///
    /// Malformed input yields an empty config rather than an error.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Configured tier, medium when unset.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            difficulty: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    /// Config for one seat of a given tier.
    pub fn for_tier(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self {
            seed,
            difficulty: Some(difficulty),
            ..Self::empty()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::empty()
    }
}
