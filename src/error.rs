use thiserror::Error;

use crate::ir::PixelRect;

/// Rejected host input. Generation itself never fails once inputs are accepted.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cell spacing must be a positive finite number, got {0}")]
    InvalidSpacing(f32),
    #[error("viewport size must be finite and non-negative, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("overscan factors must be positive finite numbers, got {x}x{y}")]
    InvalidOverscan { x: f32, y: f32 },
    #[error("branch probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("obstacle #{index} has non-finite coordinates")]
    NonFiniteObstacle { index: usize },
    #[error("obstacle #{index} is inverted: {rect:?}")]
    InvertedObstacle { index: usize, rect: PixelRect },
    #[error("viewport needs a {width}x{height} cell grid, more than {max} cells per side")]
    GridTooLarge { width: usize, height: usize, max: usize },
    #[error("expected obstacle as LEFT,TOP,RIGHT,BOTTOM, got '{0}'")]
    MalformedObstacle(String),
}
