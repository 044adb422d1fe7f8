use std::time::Duration;

use crate::error::ConfigError;
use crate::model::Shape;


/// An RGB color triple, convertible into an SDL color.
pub(crate) type Rgb = (u8, u8, u8);


const SCREEN_WIDTH_PX: u32 = 500;
const SCREEN_HEIGHT_PX: u32 = 600;
const BLOCK_SIZE_PX: u32 = 30;
const FRAMES_PER_SECOND: u32 = 5;
const GAME_OVER_DELAY: Duration = Duration::from_millis(2000);

pub(crate) const BLACK: Rgb = (0, 0, 0);
pub(crate) const WHITE: Rgb = (255, 255, 255);

const PALETTE: [Rgb; 7] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 165, 0),
    (128, 0, 128),
    (0, 255, 255),
];

const SHAPES: [&[&[u8]]; 7] = [
    &[&[1, 1, 1], &[0, 1, 0]], // T
    &[&[1, 1], &[1, 1]], // O
    &[&[1, 1, 0], &[0, 1, 1]], // S
    &[&[0, 1, 1], &[1, 1, 0]], // Z
    &[&[1], &[1], &[1], &[1]], // I
    &[&[1, 1, 1], &[1, 0, 0]], // L
    &[&[1, 1, 1], &[0, 0, 1]], // J
];


/// Everything about a game that stays fixed while it is played.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub block_size: u32,
    pub board_width: usize,
    pub board_height: usize,

    /// Colors available to pieces; a board cell value `n > 0` refers to `palette[n - 1]`.
    pub palette: Vec<Rgb>,

    /// Piece shapes as rows of 0/1 cells.
    pub shapes: Vec<Vec<Vec<u8>>>,

    /// Drawn in place of a color index that misses the palette.
    pub fallback_color: Rgb,
    pub background_color: Rgb,

    pub frames_per_second: u32,
    pub game_over_delay: Duration,
}
impl GameConfig {
    /// Returns a configuration with the given block size whose window fits the board exactly.
    pub fn with_block_size(self, block_size: u32) -> Self {
        let board_width_px = u32::try_from(self.board_width).unwrap_or(u32::MAX);
        let board_height_px = u32::try_from(self.board_height).unwrap_or(u32::MAX);
        Self {
            screen_width: board_width_px.saturating_mul(block_size),
            screen_height: board_height_px.saturating_mul(block_size),
            block_size,
            ..self
        }
    }

    pub fn with_frames_per_second(self, frames_per_second: u32) -> Self {
        Self {
            frames_per_second,
            ..self
        }
    }

    /// Time between two gravity ticks.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }

    /// Converts the raw shape table into checked shapes.
    pub fn build_shapes(&self) -> Result<Vec<Shape>, ConfigError> {
        if self.shapes.is_empty() {
            return Err(ConfigError::NoShapes);
        }
        self.shapes.iter()
            .enumerate()
            .map(|(i, rows)| Shape::from_rows(i, rows.as_slice()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.palette.len() > usize::from(u8::MAX) {
            return Err(ConfigError::PaletteTooLarge(self.palette.len()));
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        self.build_shapes()?;
        Ok(())
    }
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH_PX,
            screen_height: SCREEN_HEIGHT_PX,
            block_size: BLOCK_SIZE_PX,
            board_width: (SCREEN_WIDTH_PX / BLOCK_SIZE_PX) as usize,
            board_height: (SCREEN_HEIGHT_PX / BLOCK_SIZE_PX) as usize,
            palette: PALETTE.to_vec(),
            shapes: SHAPES.iter()
                .map(|rows| rows.iter().map(|row| row.to_vec()).collect())
                .collect(),
            fallback_color: WHITE,
            background_color: BLACK,
            frames_per_second: FRAMES_PER_SECOND,
            game_over_delay: GAME_OVER_DELAY,
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::GameConfig;
    use crate::error::ConfigError;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 16);
        assert_eq!(config.board_height, 20);
        assert_eq!(config.palette.len(), 7);
        assert_eq!(config.frame_duration(), Duration::from_millis(200));
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.build_shapes().unwrap().len(), 7);
    }

    #[test]
    fn test_block_size_fits_window_to_board() {
        let config = GameConfig::default().with_block_size(20);
        assert_eq!(config.screen_width, 16 * 20);
        assert_eq!(config.screen_height, 20 * 20);
        assert_eq!(config.board_width, 16);
    }

    #[test]
    fn test_invalid_configs() {
        let config = GameConfig { board_width: 0, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBoard { width: 0, height: 20 }));

        let config = GameConfig { palette: Vec::new(), ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));

        let config = GameConfig { palette: vec![(1, 2, 3); 256], ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::PaletteTooLarge(256)));

        let config = GameConfig { shapes: Vec::new(), ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoShapes));

        let config = GameConfig { shapes: vec![vec![vec![1, 2]]], ..GameConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidShapeCell { shape: 0, x: 1, y: 0, value: 2 }),
        );

        let config = GameConfig { frames_per_second: 0, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameRate));
    }
}
