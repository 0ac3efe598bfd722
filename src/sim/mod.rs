//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Time comes in as a parameter, never read from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grade;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::Rect;
pub use grade::{GRADE_TABLE, Grade, GradeInfo};
pub use score::{CatchOutcome, EndReason, RunState};
pub use spawner::{spawn_blocks, update_professor_speed};
pub use state::{FallingBlock, GameEvent, GameState, Player, Professor};
pub use tick::{TickInput, tick};
