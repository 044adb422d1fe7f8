use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::error;

use crate::config::{GameConfig, Rgb, WHITE};
use crate::game::Game;
use crate::model::signed;
use crate::random::PieceSource;
use crate::seg_display::{draw_text, text_width, SegmentSize};


const SCORE_COLOR: Rgb = (0x00, 0x7F, 0x00);
const SCORE_MARGIN_PX: i32 = 16;
const GAME_OVER_TEXT: &str = "GAME OVER";


/// Looks up the color of a cell value (1-based palette index). A value outside the palette means
/// the board is corrupted; the fallback color is returned and the anomaly logged.
pub(crate) fn cell_color(config: &GameConfig, value: u8, x: i32, y: i32) -> Rgb {
    let color = usize::from(value)
        .checked_sub(1)
        .and_then(|i| config.palette.get(i));
    match color {
        Some(&color) => color,
        None => {
            error!(value, x, y, "invalid color index");
            config.fallback_color
        },
    }
}


/// Returns the screen rectangle covering a board cell.
pub(crate) fn block_rect(config: &GameConfig, x: i32, y: i32) -> Rect {
    let block_size = i32::try_from(config.block_size).unwrap_or(i32::MAX);
    Rect::new(
        x.saturating_mul(block_size),
        y.saturating_mul(block_size),
        config.block_size,
        config.block_size,
    )
}


fn fill_block(canvas: &mut Canvas<Window>, config: &GameConfig, value: u8, x: i32, y: i32) -> Result<(), String> {
    canvas.set_draw_color(cell_color(config, value, x, y));
    canvas.fill_rect(block_rect(config, x, y))
}


/// Draws the board and the falling piece. Does not present the canvas.
pub(crate) fn draw<S: PieceSource>(
    canvas: &mut Canvas<Window>,
    config: &GameConfig,
    game: &Game<S>,
) -> Result<(), String> {
    canvas.set_draw_color(config.background_color);
    canvas.clear();

    let board = game.board();
    let width = board.width();
    for (i, &value) in board.cells().iter().enumerate() {
        if value != 0 {
            fill_block(canvas, config, value, signed(i % width), signed(i / width))?;
        }
    }

    let piece = game.piece();
    let piece_value = piece.board_value();
    for (x, y) in piece.cells() {
        fill_block(canvas, config, piece_value, x, y)?;
    }
    Ok(())
}


/// Top-left corners of the game-over banner and of the final score below it, both centered
/// horizontally.
pub(crate) fn game_over_layout(config: &GameConfig, score: &str) -> ((i32, i32), (i32, i32)) {
    let centered_x = |width: u32| {
        i32::try_from((i64::from(config.screen_width) - i64::from(width)) / 2).unwrap_or(0)
    };

    let banner_size = SegmentSize::LARGE;
    let banner_y = (i64::from(config.screen_height) - i64::from(banner_size.glyph_height())) / 2;
    let banner_y = i32::try_from(banner_y).unwrap_or(0);
    let banner = (centered_x(text_width(GAME_OVER_TEXT, banner_size)), banner_y);

    let score_y = banner_y
        + i32::try_from(banner_size.glyph_height()).unwrap_or(0)
        + SCORE_MARGIN_PX;
    let score = (centered_x(text_width(score, SegmentSize::LARGE)), score_y);

    (banner, score)
}


/// Draws the game-over banner with the final score beneath it.
pub(crate) fn draw_game_over(canvas: &mut Canvas<Window>, config: &GameConfig, score: u64) -> Result<(), String> {
    let score = score.to_string();
    let ((banner_x, banner_y), (score_x, score_y)) = game_over_layout(config, &score);
    draw_text(canvas, banner_x, banner_y, WHITE, SegmentSize::LARGE, GAME_OVER_TEXT)?;
    draw_text(canvas, score_x, score_y, SCORE_COLOR, SegmentSize::LARGE, &score)
}


#[cfg(test)]
mod tests {
    use sdl2::rect::Rect;

    use super::{block_rect, cell_color, game_over_layout};
    use crate::seg_display::SegmentSize;
    use crate::config::{GameConfig, WHITE};

    #[test]
    fn test_cell_color_in_palette() {
        let config = GameConfig::default();
        assert_eq!(cell_color(&config, 1, 0, 0), (255, 0, 0));
        assert_eq!(cell_color(&config, 7, 0, 0), (0, 255, 255));
    }

    #[test]
    fn test_cell_color_falls_back() {
        let config = GameConfig::default();
        assert_eq!(cell_color(&config, 8, 3, 4), WHITE);
        assert_eq!(cell_color(&config, 0, 3, 4), WHITE);

        let config = GameConfig { fallback_color: (1, 2, 3), ..GameConfig::default() };
        assert_eq!(cell_color(&config, 200, 0, 0), (1, 2, 3));
    }

    #[test]
    fn test_block_rect() {
        let config = GameConfig::default();
        assert_eq!(block_rect(&config, 2, 3), Rect::new(60, 90, 30, 30));
        assert_eq!(block_rect(&config, 0, -2), Rect::new(0, -60, 30, 30));
    }

    #[test]
    fn test_game_over_layout() {
        let config = GameConfig::default();
        let ((banner_x, banner_y), (score_x, score_y)) = game_over_layout(&config, "1234");

        // "GAME OVER" is 9 glyphs of 24 px with 8 px between them
        assert_eq!(banner_x, (500 - (9 * 32 - 8)) / 2);
        assert_eq!(banner_y, (600 - 42) / 2);
        assert_eq!(score_x, (500 - (4 * 32 - 8)) / 2);
        assert!(score_y >= banner_y + i32::try_from(SegmentSize::LARGE.glyph_height()).unwrap());
    }
}
