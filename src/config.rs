use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pacing of a battle: how long the engine waits after each visible change.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BattleConfig {
    /// Pause after a state change so the hp bar can be read.
    pub state_change_settle_ms: u64,
    /// Pause after each half of a replacement (out, then in).
    pub replace_settle_ms: u64,
    /// Length of one XP tally frame.
    pub xp_frame_ms: u64,
    /// Whether to wait out an animation's running time.
    pub wait_for_animations: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            state_change_settle_ms: 600,
            replace_settle_ms: 400,
            xp_frame_ms: 16,
            wait_for_animations: true,
        }
    }
}

impl BattleConfig {
    /// No waiting at all. Used by tests and auto-played battles.
    pub fn instant() -> Self {
        Self {
            state_change_settle_ms: 0,
            replace_settle_ms: 0,
            xp_frame_ms: 0,
            wait_for_animations: false,
        }
    }

    pub fn from_ron(text: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Read a RON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn state_change_settle(&self) -> Duration {
        Duration::from_millis(self.state_change_settle_ms)
    }

    pub fn replace_settle(&self) -> Duration {
        Duration::from_millis(self.replace_settle_ms)
    }

    pub fn xp_frame(&self) -> Duration {
        Duration::from_millis(self.xp_frame_ms)
    }
}
