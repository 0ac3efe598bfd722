//! Game state and entity types
//!
//! Everything the frame update reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::grade::Grade;
use super::score::RunState;
use crate::config::GameConfig;
use crate::consts::FRAME_MS;

/// The overhead sprite that drops grades
#[derive(Debug, Clone, PartialEq)]
pub struct Professor {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Clearance from each wall before turning around
    pub margin: f32,
    /// Wall-clock time of the last random speed change (ms)
    pub last_speed_change_ms: Option<f64>,
}

impl Professor {
    pub fn new(config: &GameConfig) -> Self {
        let patrol = &config.patrol;
        Self {
            pos: Vec2::new(config.arena_width / 2.0, patrol.start_y),
            size: Vec2::new(patrol.width, patrol.height),
            speed: patrol.start_speed,
            direction: 1.0,
            margin: patrol.margin,
            last_speed_change_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Advance one frame, turning around at the margin-inset walls
    pub fn advance(&mut self, arena_width: f32) {
        self.pos.x += self.speed * self.direction;

        let hit_left = self.direction < 0.0 && self.pos.x <= self.margin;
        let hit_right =
            self.direction > 0.0 && self.pos.x + self.size.x >= arena_width - self.margin;
        if hit_left || hit_right {
            self.direction = -self.direction;
        }

        self.pos.x = self.pos.x.clamp(0.0, arena_width - self.size.x);
    }

    /// Where a new block of the given width appears: centered under the professor
    pub fn drop_point(&self, block_width: f32) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0 - block_width / 2.0,
            self.pos.y + self.size.y,
        )
    }
}

/// The catching sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let player = &config.player;
        Self {
            pos: Vec2::new(
                config.arena_width / 2.0,
                config.arena_height - player.bottom_offset,
            ),
            size: Vec2::new(player.width, player.height),
            speed: player.speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Step by the held inputs; left and right together cancel out
    pub fn steer(&mut self, left: bool, right: bool, arena_width: f32) {
        let axis = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        self.pos.x = (self.pos.x + axis * self.speed).clamp(0.0, arena_width - self.size.x);
    }
}

/// A grade on its way down
#[derive(Debug, Clone, PartialEq)]
pub struct FallingBlock {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub grade: Grade,
    /// Copied from the grade at creation
    pub speed: f32,
}

impl FallingBlock {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }
}

/// Events produced by a frame, for logging and sound/visual cues
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Professor picked a new speed
    SpeedChanged { speed: f32 },
    /// Blocks emitted this frame
    Spawned { count: usize },
    /// Player caught a block
    Caught { grade: Grade },
    /// Run reached a terminal condition
    RunEnded { reason: super::score::EndReason },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub professor: Professor,
    pub player: Player,
    /// Newest blocks at the back
    pub blocks: Vec<FallingBlock>,
    pub run: RunState,
    /// Wall-clock time of the last emission check that fired (ms)
    pub last_spawn_ms: Option<f64>,
    /// Frames processed this run
    pub frame_count: u64,
    /// Frames processed since creation; survives reset
    pub total_frames: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given tuning and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            professor: Professor::new(&config),
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            blocks: Vec::new(),
            run: RunState::default(),
            last_spawn_ms: None,
            frame_count: 0,
            total_frames: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_terminal(&self) -> bool {
        self.run.is_terminal()
    }

    /// Nominal wall clock for headless drivers (lifetime frames at 60 Hz).
    ///
    /// Monotonic across resets, so it never falls behind the saved cadence
    /// timestamps.
    pub fn headless_clock_ms(&self) -> f64 {
        self.total_frames as f64 * FRAME_MS
    }

    /// Return both sprites and the run to their starting state.
    ///
    /// Cadence timestamps and the RNG stream carry over.
    pub fn reset(&mut self) {
        let last_speed_change = self.professor.last_speed_change_ms;
        self.professor = Professor::new(&self.config);
        self.professor.last_speed_change_ms = last_speed_change;
        self.player = Player::new(&self.config);
        self.blocks.clear();
        self.run.reset();
        self.frame_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_positions() {
        let state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.professor.pos, Vec2::new(400.0, 50.0));
        assert_eq!(state.professor.direction, 1.0);
        assert_eq!(state.professor.speed, 8.0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_professor_turns_at_right_margin() {
        let config = GameConfig::default();
        let mut prof = Professor::new(&config);
        // Right edge lands exactly on the margin boundary (800 - 20)
        prof.pos.x = 800.0 - 20.0 - 80.0 - prof.speed;
        prof.advance(config.arena_width);
        assert_eq!(prof.direction, -1.0);

        // One step short of the boundary keeps going
        let mut prof = Professor::new(&config);
        prof.pos.x = 800.0 - 20.0 - 80.0 - prof.speed - 1.0;
        prof.advance(config.arena_width);
        assert_eq!(prof.direction, 1.0);
    }

    #[test]
    fn test_professor_turns_at_left_margin() {
        let config = GameConfig::default();
        let mut prof = Professor::new(&config);
        prof.direction = -1.0;
        prof.pos.x = 20.0 + prof.speed;
        prof.advance(config.arena_width);
        assert_eq!(prof.pos.x, 20.0);
        assert_eq!(prof.direction, 1.0);

        // After turning it moves away from the wall without flipping back
        prof.advance(config.arena_width);
        assert_eq!(prof.direction, 1.0);
        assert!(prof.pos.x > 20.0);
    }

    #[test]
    fn test_drop_point_is_centered_below() {
        let config = GameConfig::default();
        let prof = Professor::new(&config);
        assert_eq!(prof.drop_point(30.0), Vec2::new(400.0 + 40.0 - 15.0, 130.0));
    }

    #[test]
    fn test_player_steer_and_clamp() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.steer(true, false, 800.0);
        assert_eq!(player.pos.x, 392.0);
        player.steer(false, true, 800.0);
        assert_eq!(player.pos.x, 400.0);
        player.steer(true, true, 800.0);
        assert_eq!(player.pos.x, 400.0);

        player.pos.x = 3.0;
        player.steer(true, false, 800.0);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = 727.0;
        player.steer(false, true, 800.0);
        assert_eq!(player.pos.x, 730.0);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.player.pos.x = 10.0;
        state.professor.direction = -1.0;
        state.professor.speed = 13.0;
        state.professor.last_speed_change_ms = Some(1234.0);
        let id = state.next_entity_id();
        state.blocks.push(FallingBlock {
            id,
            pos: Vec2::ZERO,
            size: Vec2::splat(30.0),
            grade: Grade::F,
            speed: 20.0,
        });
        state.run.record_catch(Grade::F, &state.config.limits);

        state.reset();
        let fresh = GameState::new(GameConfig::default(), 9);
        assert_eq!(state.player, fresh.player);
        assert_eq!(state.professor.pos, fresh.professor.pos);
        assert_eq!(state.professor.speed, 8.0);
        assert_eq!(state.professor.direction, 1.0);
        assert_eq!(state.professor.last_speed_change_ms, Some(1234.0));
        assert!(state.blocks.is_empty());
        assert_eq!(state.run, RunState::default());
    }

    #[test]
    fn test_reset_keeps_headless_clock_running() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.frame_count = 120;
        state.total_frames = 120;
        state.last_spawn_ms = Some(state.headless_clock_ms());

        state.reset();
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.total_frames, 120);
        assert_eq!(Some(state.headless_clock_ms()), state.last_spawn_ms);
    }
}
