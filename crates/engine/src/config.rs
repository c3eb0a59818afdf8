//! Session configuration
//!
//! Every field has a default, so a config file only needs the fields it changes:
//!
//! ```json
//! { "width": 8, "height": 16, "gravityMs": 500, "policy": "correct" }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use piles_core::{CollisionPolicy, Content};

use crate::types::{Point, BASE_DROP_MS, DEFAULT_HEIGHT, DEFAULT_SPAWN, DEFAULT_WIDTH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: u16, height: u16 },
    #[error("spawn ({}, {}) lies outside the {width}x{height} grid", spawn.x, spawn.y)]
    SpawnOutside { spawn: Point, width: u16, height: u16 },
    #[error("gravity interval must be positive")]
    ZeroGravity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    /// Anchor new bricks spawn at, facing up
    pub spawn: Point,
    /// Gravity interval at level 0
    pub gravity_ms: u32,
    pub policy: CollisionPolicy,
    /// Seed for the bag randomizer
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spawn: DEFAULT_SPAWN,
            gravity_ms: BASE_DROP_MS,
            policy: CollisionPolicy::Reject,
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Take the spawn anchor from level content, when the content sets one
    pub fn apply_content(&mut self, content: &Content) {
        if let Some(spawn) = content.spawn {
            self.spawn = spawn;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        let inside = (0..self.width as i32).contains(&self.spawn.x)
            && (0..self.height as i32).contains(&self.spawn.y);
        if !inside {
            return Err(ConfigError::SpawnOutside {
                spawn: self.spawn,
                width: self.width,
                height: self.height,
            });
        }
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        Ok(())
    }
}
