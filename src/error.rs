//! Error types for maze setup and validation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("Invalid grid dimensions: {rows} rows x {cols} cols (both must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Invalid play area: {width} x {height}")]
    InvalidPlayArea { width: f32, height: f32 },

    #[error("Invalid {what} thickness: {value}")]
    InvalidThickness { what: &'static str, value: f32 },

    #[error("Invalid ball step: {0}")]
    InvalidStep(f32),

    #[error("Win gravity must be positive, got {0}")]
    InvalidGravity(f32),

    #[error("Passage matrices do not match a {rows} x {cols} grid")]
    MalformedPassages { rows: usize, cols: usize },

    #[error("Expected {expected} open passages, found {found}")]
    PassageCount { expected: usize, found: usize },

    #[error("{unreachable} cells cannot be reached from the top-left cell")]
    Disconnected { unreachable: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
