use thiserror::Error;


/// Reasons a [`GameConfig`](crate::config::GameConfig) cannot be played with.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("board must be at least 1x1 blocks, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("palette is empty")]
    EmptyPalette,

    #[error("palette has {0} colors, at most 255 fit in a board cell")]
    PaletteTooLarge(usize),

    #[error("shape table is empty")]
    NoShapes,

    #[error("shape {0} has no rows")]
    EmptyShape(usize),

    #[error("shape {shape} row {row} has {found} cells, expected {expected}")]
    RaggedShape { shape: usize, row: usize, found: usize, expected: usize },

    #[error("shape {shape} has value {value} at ({x}, {y}), only 0 and 1 are allowed")]
    InvalidShapeCell { shape: usize, x: usize, y: usize, value: u8 },

    #[error("shape {0} has no filled cells")]
    HollowShape(usize),

    #[error("block size must be positive")]
    ZeroBlockSize,

    #[error("frame rate must be positive")]
    ZeroFrameRate,
}
