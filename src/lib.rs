//! Ball Maze - steer a ball through a perfect maze
//!
//! Core modules:
//! - `maze`: Perfect-maze generation, validation and projection to bodies
//! - `engine`: Contract with the external physics/rendering engine
//! - `game`: Owned game context driven by key and collision events
//! - `input`: Key-to-direction mapping and velocity nudges
//! - `settings`: Presets and user configuration
//! - `platform`: Browser bridge to Matter.js

pub mod engine;
pub mod error;
pub mod game;
pub mod input;
pub mod maze;
pub mod platform;
pub mod settings;

pub use error::{MazeError, Result};
pub use game::MazeGame;
pub use settings::{MazePreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Thickness of interior wall segments
    pub const WALL_THICKNESS: f32 = 5.0;
    /// Thickness of the four boundary walls
    pub const BOUNDARY_THICKNESS: f32 = 10.0;
    /// Goal rectangle size as a fraction of the cell
    pub const GOAL_SCALE: f32 = 0.7;
    /// Ball radius as a fraction of the smaller cell dimension
    pub const BALL_RADIUS_SCALE: f32 = 0.25;
    /// Velocity change per key-down event
    pub const BALL_STEP: f32 = 5.0;
    /// Vertical gravity switched on by the win transition
    pub const WIN_GRAVITY: f32 = 1.0;
    /// Collision group shared by every wall. Negative so that walls never
    /// collide with each other once they turn dynamic (a shared positive
    /// group in Matter.js means always collide).
    pub const WALL_GROUP: i32 = -1;
}
