//! Demo autopilot
//!
//! Picks held inputs for the player: chase the lowest passing grade still
//! above the player, otherwise shadow the professor. Used by the native demo
//! and the headless tests; the browser build only uses it in idle mode.

use super::state::GameState;
use super::tick::TickInput;

pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = state.player.rect();

    let target_x = state
        .blocks
        .iter()
        .filter(|b| !b.grade.is_failing() && b.rect().top() < player.bottom())
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.rect().center().x)
        .unwrap_or_else(|| state.professor.rect().center().x);

    let dx = target_x - player.center().x;
    // Dead zone keeps the player from jittering around the target
    let dead_zone = state.player.speed / 2.0;
    TickInput {
        left: dx < -dead_zone,
        right: dx > dead_zone,
    }
}
