//! Player domain service: display names and bans.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::display_name;
use crate::entities::bans::Ban;
use crate::error::AppError;
use crate::infra::clock::Clock;
use crate::repos::bans;
use crate::store::DocumentStore;

/// Player domain service.
pub struct PlayerService<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore + ?Sized> PlayerService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Normalise and validate a display name.
    ///
    /// # Returns
    /// * `Ok(String)` - The normalised name to store
    /// * `Err(AppError)` - `INVALID_DISPLAY_NAME` with the reason
    pub fn validate_display_name(&self, raw: &str) -> Result<String, AppError> {
        Ok(display_name::validate_display_name(raw)?)
    }

    /// The player's ban, if one is still in force. Expired bans are ignored.
    pub async fn check_ban(&self, player_id: &str) -> Result<Option<Ban>, AppError> {
        let now = self.clock.now_ms();
        Ok(bans::find_by_player(&*self.store, player_id)
            .await?
            .filter(|ban| ban.is_active(now)))
    }

    /// Whole seconds until the ban lifts, rounded up; zero when not banned.
    pub async fn ban_remaining_seconds(&self, player_id: &str) -> Result<u64, AppError> {
        let Some(ban) = self.check_ban(player_id).await? else {
            return Ok(0);
        };
        let remaining_ms = (ban.expires_at - self.clock.now_ms()).max(0) as u64;
        Ok(remaining_ms.div_ceil(1000))
    }

    /// Ban the player for `duration`, replacing any existing ban.
    pub async fn create_ban(
        &self,
        player_id: &str,
        reason: &str,
        game_id: Option<&str>,
        duration: Duration,
    ) -> Result<Ban, AppError> {
        let now = self.clock.now_ms();
        let ban = Ban {
            reason: reason.to_string(),
            game_id: game_id.map(str::to_string),
            created_at: now,
            expires_at: now + duration.as_millis() as i64,
        };
        bans::put_ban(&*self.store, player_id, &ban).await?;
        info!(player_id, reason, expires_at = ban.expires_at, "Player banned");
        Ok(ban)
    }
}
