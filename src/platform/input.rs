//! Held-input tracking
//!
//! Keyboard and touch each keep their own left/right flags; the frame input
//! is their union, so releasing a touch never cancels a held arrow key.

use crate::sim::TickInput;

/// Which half of the screen a touch landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Left half holds left, right half (including the midpoint) holds right
pub fn touch_side(touch_x: f32, screen_width: f32) -> Side {
    if touch_x < screen_width / 2.0 {
        Side::Left
    } else {
        Side::Right
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Held {
    left: bool,
    right: bool,
}

impl Held {
    fn set(&mut self, side: Side, down: bool) {
        match side {
            Side::Left => self.left = down,
            Side::Right => self.right = down,
        }
    }
}

/// Current state of every input device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    keys: Held,
    touch: Held,
}

impl Controls {
    /// Map a `KeyboardEvent.key` to a side, if it steers
    pub fn key_side(key: &str) -> Option<Side> {
        match key {
            "ArrowLeft" => Some(Side::Left),
            "ArrowRight" => Some(Side::Right),
            _ => None,
        }
    }

    /// Whether a `KeyboardEvent.key` is the restart key
    pub fn is_restart_key(key: &str) -> bool {
        matches!(key, "r" | "R")
    }

    pub fn key(&mut self, side: Side, down: bool) {
        self.keys.set(side, down);
    }

    /// Touch or on-screen button on one side
    pub fn touch(&mut self, side: Side, down: bool) {
        self.touch.set(side, down);
    }

    /// Any touch ended: release both touch sides
    pub fn release_touch(&mut self) {
        self.touch = Held::default();
    }

    /// Frame input from everything currently held
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.keys.left || self.touch.left,
            right: self.keys.right || self.touch.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_halves() {
        assert_eq!(touch_side(10.0, 400.0), Side::Left);
        assert_eq!(touch_side(199.9, 400.0), Side::Left);
        assert_eq!(touch_side(200.0, 400.0), Side::Right);
        assert_eq!(touch_side(390.0, 400.0), Side::Right);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Controls::key_side("ArrowLeft"), Some(Side::Left));
        assert_eq!(Controls::key_side("ArrowRight"), Some(Side::Right));
        assert_eq!(Controls::key_side("a"), None);
        assert!(Controls::is_restart_key("R"));
        assert!(!Controls::is_restart_key("Enter"));
    }

    #[test]
    fn test_devices_combine() {
        let mut controls = Controls::default();
        controls.key(Side::Left, true);
        controls.touch(Side::Right, true);
        assert_eq!(
            controls.tick_input(),
            TickInput {
                left: true,
                right: true
            }
        );

        controls.release_touch();
        assert_eq!(
            controls.tick_input(),
            TickInput {
                left: true,
                right: false
            }
        );

        controls.key(Side::Left, false);
        assert_eq!(controls.tick_input(), TickInput::default());
    }

    #[test]
    fn test_touch_release_keeps_keys() {
        let mut controls = Controls::default();
        controls.key(Side::Right, true);
        controls.touch(Side::Right, true);
        controls.release_touch();
        assert!(controls.tick_input().right);
    }
}
