//! Per-frame simulation step
//!
//! Moves every entity, runs the spawn cadences, then resolves catches.

use super::score::CatchOutcome;
use super::spawner::{spawn_blocks, update_professor_speed};
use super::state::{GameEvent, GameState};

/// Held inputs for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one frame at wall-clock time `now_ms`.
///
/// A terminal run is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_terminal() {
        return events;
    }

    state.frame_count += 1;
    state.total_frames += 1;
    let arena_width = state.config.arena_width;

    if let Some(speed) = update_professor_speed(state, now_ms) {
        events.push(GameEvent::SpeedChanged { speed });
    }
    state.professor.advance(arena_width);

    state.player.steer(input.left, input.right, arena_width);

    let spawned = spawn_blocks(state, now_ms);
    if spawned > 0 {
        events.push(GameEvent::Spawned { count: spawned });
    }

    resolve_blocks(state, &mut events);
    events
}

/// Drop every block one step, newest first, and settle catches.
///
/// Stops at the catch that ends the run; that block and any older ones stay
/// where they are.
fn resolve_blocks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player.rect();
    let arena_height = state.config.arena_height;

    let mut i = state.blocks.len();
    while i > 0 {
        i -= 1;
        let block = &mut state.blocks[i];
        block.fall();

        if player.overlaps(&block.rect()) {
            let grade = block.grade;
            events.push(GameEvent::Caught { grade });
            log::debug!(
                "Caught {} ({}/{})",
                grade,
                state.run.block_count + 1,
                state.config.limits.max_catches
            );

            match state.run.record_catch(grade, &state.config.limits) {
                CatchOutcome::Ended(reason) => {
                    log::info!(
                        "Run ended: {} final GPA {}",
                        reason.title(),
                        state.run.average_display()
                    );
                    events.push(GameEvent::RunEnded { reason });
                    return;
                }
                CatchOutcome::Continue => {
                    state.blocks.remove(i);
                    continue;
                }
            }
        }

        if block.pos.y > arena_height {
            state.blocks.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grade::Grade;
    use crate::sim::score::EndReason;
    use crate::sim::state::FallingBlock;
    use glam::Vec2;

    /// State with spawning disabled so tests control every block
    fn quiet_state() -> GameState {
        let mut config = GameConfig::default();
        config.spawn.base_probability = 0.0;
        GameState::new(config, 1234)
    }

    /// Place a block that will overlap the player after one fall step
    fn drop_on_player(state: &mut GameState, grade: Grade) {
        let id = state.next_entity_id();
        let target = state.player.rect().center();
        state.blocks.push(FallingBlock {
            id,
            pos: Vec2::new(target.x - 15.0, target.y - 15.0 - grade.speed()),
            size: Vec2::splat(30.0),
            grade,
            speed: grade.speed(),
        });
    }

    #[test]
    fn test_catch_removes_block_and_scores() {
        let mut state = quiet_state();
        drop_on_player(&mut state, Grade::APlus);
        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::Caught { grade: Grade::APlus }));
        assert!(state.blocks.is_empty());
        assert_eq!(state.run.block_count, 1);
        assert_eq!(state.run.average_display(), "4.50");
    }

    #[test]
    fn test_missed_block_leaves_bottom_silently() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.blocks.push(FallingBlock {
            id,
            pos: Vec2::new(0.0, 595.0),
            size: Vec2::splat(30.0),
            grade: Grade::CZero,
            speed: Grade::CZero.speed(),
        });
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.blocks.is_empty());
        assert_eq!(state.run.block_count, 0);
    }

    #[test]
    fn test_block_on_screen_keeps_falling() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.blocks.push(FallingBlock {
            id,
            pos: Vec2::new(0.0, 130.0),
            size: Vec2::splat(30.0),
            grade: Grade::BZero,
            speed: Grade::BZero.speed(),
        });
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.blocks[0].pos.y, 144.0);
    }

    #[test]
    fn test_touching_block_is_not_caught() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        let top = state.player.pos.y;
        // Bottom edge lands exactly on the player's top edge
        state.blocks.push(FallingBlock {
            id,
            pos: Vec2::new(state.player.pos.x + 10.0, top - 30.0 - 10.0),
            size: Vec2::splat(30.0),
            grade: Grade::CZero,
            speed: 10.0,
        });
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.run.block_count, 0);
        assert_eq!(state.blocks.len(), 1);
    }

    #[test]
    fn test_failing_limit_ends_run_and_keeps_block() {
        let mut state = quiet_state();
        for _ in 0..3 {
            drop_on_player(&mut state, Grade::F);
            tick(&mut state, &TickInput::default(), 0.0);
        }
        assert!(!state.is_terminal());

        drop_on_player(&mut state, Grade::F);
        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::RunEnded {
            reason: EndReason::AcademicProbation
        }));
        assert!(state.is_terminal());
        assert_eq!(state.run.block_count, 4);
        // The block that ended the run stays for the overlay
        assert_eq!(state.blocks.len(), 1);
    }

    #[test]
    fn test_catch_limit_ends_run() {
        let mut state = quiet_state();
        for _ in 0..7 {
            drop_on_player(&mut state, Grade::CPlus);
            tick(&mut state, &TickInput::default(), 0.0);
        }
        assert_eq!(state.run.ended, Some(EndReason::SemesterComplete));
        assert_eq!(state.run.failing_count, 0);
    }

    #[test]
    fn test_ending_catch_stops_processing_older_blocks() {
        let mut state = quiet_state();
        for _ in 0..6 {
            drop_on_player(&mut state, Grade::CPlus);
            tick(&mut state, &TickInput::default(), 0.0);
        }
        // Older block far from the player, newer one about to be caught
        let id = state.next_entity_id();
        state.blocks.push(FallingBlock {
            id,
            pos: Vec2::new(0.0, 200.0),
            size: Vec2::splat(30.0),
            grade: Grade::BPlus,
            speed: 16.0,
        });
        drop_on_player(&mut state, Grade::CPlus);
        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.is_terminal());
        assert_eq!(state.blocks.len(), 2);
        // Older block was never advanced
        assert_eq!(state.blocks[0].pos.y, 200.0);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut state = quiet_state();
        for _ in 0..4 {
            drop_on_player(&mut state, Grade::F);
            tick(&mut state, &TickInput::default(), 0.0);
        }
        assert!(state.is_terminal());

        let professor = state.professor.clone();
        let player = state.player.clone();
        let frames = state.frame_count;
        let input = TickInput {
            left: true,
            right: false,
        };
        let events = tick(&mut state, &input, 10_000.0);
        assert!(events.is_empty());
        assert_eq!(state.professor, professor);
        assert_eq!(state.player, player);
        assert_eq!(state.frame_count, frames);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut state = quiet_state();
        let start = state.player.pos.x;
        tick(
            &mut state,
            &TickInput {
                left: false,
                right: true,
            },
            0.0,
        );
        assert_eq!(state.player.pos.x, start + 8.0);
        tick(
            &mut state,
            &TickInput {
                left: true,
                right: true,
            },
            16.0,
        );
        assert_eq!(state.player.pos.x, start + 8.0);
    }

    #[test]
    fn test_first_frame_changes_speed_and_moves_professor() {
        let mut state = quiet_state();
        let events = tick(&mut state, &TickInput::default(), 0.0);
        let speed = match events.first() {
            Some(GameEvent::SpeedChanged { speed }) => *speed,
            other => panic!("expected speed change, got {other:?}"),
        };
        assert_eq!(state.professor.pos.x, 400.0 + speed);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(GameConfig::default(), 99999);
        let mut b = GameState::new(GameConfig::default(), 99999);
        for frame in 0..600 {
            let input = TickInput {
                left: frame % 90 < 45,
                right: frame % 70 < 20,
            };
            let now = frame as f64 * crate::consts::FRAME_MS;
            assert_eq!(tick(&mut a, &input, now), tick(&mut b, &input, now));
        }
        assert_eq!(a.blocks, b.blocks);
        assert_eq!(a.run, b.run);
        assert_eq!(a.professor, b.professor);
    }
}
