//! Perfect-maze module
//!
//! Generation, validation and projection are pure and deterministic:
//! - Seeded randomness only (through `MazeRng`)
//! - No engine or platform dependencies
//! - Stable output order

pub mod generator;
pub mod passages;
pub mod projector;
pub mod validate;

pub use generator::{MazeRng, generate};
pub use passages::{Cell, Direction, Passages};
pub use projector::{CellSize, Layout, Palette, ProjectionStyle, project};
pub use validate::validate;
