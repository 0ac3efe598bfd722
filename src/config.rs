//! Game tuning
//!
//! Every knob the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Professor (patrol sprite) tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Speed at the start of a run and after reset
    pub start_speed: f32,
    /// Random speed range `[min_speed, max_speed)`
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_change_interval_ms: f64,
    pub margin: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            start_y: PROFESSOR_START_Y,
            width: PROFESSOR_SIZE,
            height: PROFESSOR_SIZE,
            start_speed: PROFESSOR_START_SPEED,
            min_speed: PROFESSOR_MIN_SPEED,
            max_speed: PROFESSOR_MAX_SPEED,
            speed_change_interval_ms: SPEED_CHANGE_INTERVAL_MS,
            margin: PROFESSOR_MARGIN,
        }
    }
}

/// Player sprite tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub bottom_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            bottom_offset: PLAYER_BOTTOM_OFFSET,
        }
    }
}

/// Block emission tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Chance that each candidate block is actually emitted
    pub base_probability: f64,
    pub max_blocks_per_spawn: u32,
    pub interval_ms: f64,
    pub block_size: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_probability: SPAWN_BASE_PROBABILITY,
            max_blocks_per_spawn: MAX_BLOCKS_PER_SPAWN,
            interval_ms: SPAWN_INTERVAL_MS,
            block_size: BLOCK_SIZE,
        }
    }
}

/// Conditions that end a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLimits {
    pub max_catches: u32,
    pub failing_limit: u32,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_catches: MAX_CATCHES,
            failing_limit: FAILING_LIMIT,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub patrol: PatrolConfig,
    pub player: PlayerConfig,
    pub spawn: SpawnConfig,
    pub limits: RunLimits,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            patrol: PatrolConfig::default(),
            player: PlayerConfig::default(),
            spawn: SpawnConfig::default(),
            limits: RunLimits::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON override document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the simulation can run with these values
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;

        let patrol = &self.patrol;
        positive("patrol.width", patrol.width)?;
        positive("patrol.height", patrol.height)?;
        positive("patrol.start_speed", patrol.start_speed)?;
        positive("patrol.min_speed", patrol.min_speed)?;
        positive("patrol.max_speed", patrol.max_speed)?;
        if patrol.max_speed <= patrol.min_speed {
            return Err(ConfigError::invalid(
                "patrol.max_speed",
                format!("must exceed min_speed ({})", patrol.min_speed),
            ));
        }
        positive("patrol.speed_change_interval_ms", patrol.speed_change_interval_ms as f32)?;
        finite("patrol.start_y", patrol.start_y)?;
        finite("patrol.margin", patrol.margin)?;
        if patrol.margin < 0.0 {
            return Err(ConfigError::invalid("patrol.margin", "must not be negative"));
        }
        if patrol.width + 2.0 * patrol.margin >= self.arena_width {
            return Err(ConfigError::invalid(
                "patrol.width",
                "professor and margins must fit inside the arena",
            ));
        }

        let player = &self.player;
        positive("player.width", player.width)?;
        positive("player.height", player.height)?;
        positive("player.speed", player.speed)?;
        if player.width > self.arena_width {
            return Err(ConfigError::invalid("player.width", "wider than the arena"));
        }
        finite("player.bottom_offset", player.bottom_offset)?;
        if player.bottom_offset < player.height || player.bottom_offset > self.arena_height {
            return Err(ConfigError::invalid(
                "player.bottom_offset",
                "player must sit fully inside the arena",
            ));
        }

        let spawn = &self.spawn;
        if !(0.0..=1.0).contains(&spawn.base_probability) {
            return Err(ConfigError::invalid(
                "spawn.base_probability",
                "must be within [0, 1]",
            ));
        }
        if spawn.max_blocks_per_spawn == 0 {
            return Err(ConfigError::invalid(
                "spawn.max_blocks_per_spawn",
                "must be at least 1",
            ));
        }
        positive("spawn.interval_ms", spawn.interval_ms as f32)?;
        positive("spawn.block_size", spawn.block_size)?;

        if self.limits.max_catches == 0 {
            return Err(ConfigError::invalid("limits.max_catches", "must be at least 1"));
        }
        if self.limits.failing_limit == 0 {
            return Err(ConfigError::invalid("limits.failing_limit", "must be at least 1"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite, got {value}")))
    }
}
