//! Wall-clock cadences: professor speed changes and block emission
//!
//! Both are polled once per frame against the caller's clock, so their
//! resolution is bounded by the frame rate but their rate is not.

use rand::Rng;

use super::grade::Grade;
use super::state::{FallingBlock, GameState};

/// Pick a new random professor speed once the change interval has elapsed.
///
/// Returns the new speed when a change happened. The first poll always fires.
pub fn update_professor_speed(state: &mut GameState, now_ms: f64) -> Option<f32> {
    let patrol = &state.config.patrol;
    let due = match state.professor.last_speed_change_ms {
        Some(last) => now_ms - last > patrol.speed_change_interval_ms,
        None => true,
    };
    if !due {
        return None;
    }

    let speed = state.rng.random_range(patrol.min_speed..patrol.max_speed);
    state.professor.speed = speed;
    state.professor.last_speed_change_ms = Some(now_ms);
    log::debug!("Professor speed -> {speed:.2}");
    Some(speed)
}

/// Emit a burst of blocks under the professor once the spawn interval has
/// elapsed. Returns how many blocks were created.
pub fn spawn_blocks(state: &mut GameState, now_ms: f64) -> usize {
    if let Some(last) = state.last_spawn_ms {
        if now_ms - last < state.config.spawn.interval_ms {
            return 0;
        }
    }
    state.last_spawn_ms = Some(now_ms);

    let candidates = state
        .rng
        .random_range(1..=state.config.spawn.max_blocks_per_spawn);

    let mut spawned = 0;
    for _ in 0..candidates {
        if state.rng.random::<f64>() < state.config.spawn.base_probability {
            let block = create_block(state);
            state.blocks.push(block);
            spawned += 1;
        }
    }
    spawned
}

/// Build one block at the professor's drop point with a weighted-random grade
fn create_block(state: &mut GameState) -> FallingBlock {
    let grade = Grade::from_draw(state.rng.random::<f64>());
    let size = state.config.spawn.block_size;
    FallingBlock {
        id: state.next_entity_id(),
        pos: state.professor.drop_point(size),
        size: glam::Vec2::splat(size),
        grade,
        speed: grade.speed(),
    }
}
