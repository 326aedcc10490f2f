use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "bans";

/// A temporary matchmaking ban stored at `bans/{player_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ban {
    pub reason: String,
    pub game_id: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
}

impl Ban {
    pub fn is_active(&self, now_ms: i64) -> bool {
        self.expires_at > now_ms
    }
}
