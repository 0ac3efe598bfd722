//! Grade Catcher - chase the professor, catch the grades you want
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (grades, spawning, movement, scoring)
//! - `game_loop`: Run controller owning the game state (frames, restart)
//! - `config`: Data-driven game tuning
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input, asset gate and layout helpers

pub mod config;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, PlatformError};
pub use game_loop::{FrameReport, GameLoop};

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Nominal frame length used by headless drivers (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play area dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Professor (patrol sprite) defaults
    pub const PROFESSOR_START_Y: f32 = 50.0;
    pub const PROFESSOR_SIZE: f32 = 80.0;
    pub const PROFESSOR_START_SPEED: f32 = 8.0;
    pub const PROFESSOR_MIN_SPEED: f32 = 2.0;
    pub const PROFESSOR_MAX_SPEED: f32 = 14.0;
    /// Time between random speed changes (ms)
    pub const SPEED_CHANGE_INTERVAL_MS: f64 = 2000.0;
    /// Wall clearance before the professor turns around
    pub const PROFESSOR_MARGIN: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 70.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Distance from the bottom of the arena to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;

    /// Block spawning
    pub const BLOCK_SIZE: f32 = 30.0;
    pub const SPAWN_BASE_PROBABILITY: f64 = 0.3;
    pub const MAX_BLOCKS_PER_SPAWN: u32 = 5;
    pub const SPAWN_INTERVAL_MS: f64 = 300.0;

    /// Run limits
    pub const MAX_CATCHES: u32 = 7;
    pub const FAILING_LIMIT: u32 = 4;
}
