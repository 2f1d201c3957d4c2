//! Keyboard mapping and ball velocity nudges
//!
//! Keys are `KeyboardEvent.key` strings. There is no debouncing: every
//! key-down event, including auto-repeat, nudges the ball again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::maze::Direction;

/// Which key identifiers steer in which direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    pub up: Vec<String>,
    pub right: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
}

impl KeyMap {
    fn from_keys(up: &[&str], right: &[&str], down: &[&str], left: &[&str]) -> Self {
        let own = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect();
        Self {
            up: own(up),
            right: own(right),
            down: own(down),
            left: own(left),
        }
    }

    /// Arrow keys
    pub fn arrows() -> Self {
        Self::from_keys(&["ArrowUp"], &["ArrowRight"], &["ArrowDown"], &["ArrowLeft"])
    }

    /// WASD, either case so Caps Lock doesn't break steering
    pub fn wasd() -> Self {
        Self::from_keys(&["w", "W"], &["d", "D"], &["s", "S"], &["a", "A"])
    }

    /// Direction bound to `key`, if any
    pub fn direction(&self, key: &str) -> Option<Direction> {
        [
            (Direction::Up, &self.up),
            (Direction::Right, &self.right),
            (Direction::Down, &self.down),
            (Direction::Left, &self.left),
        ]
        .into_iter()
        .find(|(_, keys)| keys.iter().any(|k| k == key))
        .map(|(dir, _)| dir)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::arrows()
    }
}

/// Velocity after one nudge in `dir`. Screen y grows downward.
pub fn nudge(velocity: Vec2, dir: Direction, step: f32) -> Vec2 {
    match dir {
        Direction::Up => Vec2::new(velocity.x, velocity.y - step),
        Direction::Right => Vec2::new(velocity.x + step, velocity.y),
        Direction::Down => Vec2::new(velocity.x, velocity.y + step),
        Direction::Left => Vec2::new(velocity.x - step, velocity.y),
    }
}
