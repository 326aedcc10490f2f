use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Timing and policy knobs for online games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Time the current player has to act
    pub turn_timeout: Duration,
    /// Time everyone has to finish swapping
    pub swap_timeout: Duration,
    /// How long a disconnected player is kept before removal
    pub disconnect_grace: Duration,
    /// Timeouts in one game that trigger a ban
    pub timeout_ban_threshold: u32,
    /// Length of a timeout ban
    pub ban_duration: Duration,
    /// Optimistic retries before a transaction gives up
    pub txn_max_attempts: u32,
    /// Period of the online housekeeping sweep
    pub housekeeping_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turn_timeout: Duration::from_secs(20),
            swap_timeout: Duration::from_secs(30),
            disconnect_grace: Duration::from_secs(60),
            timeout_ban_threshold: 3,
            ban_duration: Duration::from_secs(5 * 60),
            txn_max_attempts: 5,
            housekeeping_interval: Duration::from_secs(5),
        }
    }
}

impl GameConfig {
    /// Load from `SHED_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            turn_timeout: secs_var("SHED_TURN_TIMEOUT_SECS", defaults.turn_timeout)?,
            swap_timeout: secs_var("SHED_SWAP_TIMEOUT_SECS", defaults.swap_timeout)?,
            disconnect_grace: secs_var("SHED_DISCONNECT_GRACE_SECS", defaults.disconnect_grace)?,
            timeout_ban_threshold: parsed_var(
                "SHED_TIMEOUT_BAN_THRESHOLD",
                defaults.timeout_ban_threshold,
            )?,
            ban_duration: Duration::from_secs(
                parsed_var::<u64>("SHED_BAN_MINUTES", defaults.ban_duration.as_secs() / 60)? * 60,
            ),
            txn_max_attempts: positive(
                "SHED_TXN_MAX_ATTEMPTS",
                parsed_var("SHED_TXN_MAX_ATTEMPTS", defaults.txn_max_attempts)?,
            )?,
            housekeeping_interval: secs_var(
                "SHED_HOUSEKEEPING_INTERVAL_SECS",
                defaults.housekeeping_interval,
            )?,
        })
    }

    pub fn turn_timeout_ms(&self) -> i64 {
        self.turn_timeout.as_millis() as i64
    }

    pub fn swap_timeout_ms(&self) -> i64 {
        self.swap_timeout.as_millis() as i64
    }

    pub fn disconnect_grace_ms(&self) -> i64 {
        self.disconnect_grace.as_millis() as i64
    }

    pub fn ban_duration_ms(&self) -> i64 {
        self.ban_duration.as_millis() as i64
    }
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}

fn secs_var(name: &str, default: Duration) -> Result<Duration, AppError> {
    let secs = parsed_var(name, default.as_secs())?;
    Ok(Duration::from_secs(positive(name, secs)?))
}

fn positive<T: PartialOrd + Default>(name: &str, value: T) -> Result<T, AppError> {
    if value <= T::default() {
        return Err(AppError::config(format!(
            "Environment variable '{name}' must be greater than zero"
        )));
    }
    Ok(value)
}
