use tracing::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::model::{signed, Board, Piece, Shape};
use crate::random::PieceSource;


#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum GameState {
    #[default] Running,
    GameOver,
}


/// What a single downward step of the piece led to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum DropOutcome {
    /// The piece moved down by one row.
    Fell,

    /// The piece locked in; the given number of rows were cleared and a new piece spawned.
    Locked { cleared_rows: usize },

    /// The piece locked in above the board and ended the game.
    ToppedOut,

    /// The game was already over.
    Ignored,
}


/// Owns the board and the falling piece and applies all moves to them.
pub(crate) struct Game<S: PieceSource> {
    board: Board,
    shapes: Vec<Shape>,
    color_count: usize,
    piece: Piece,
    source: S,
    score: u64,
    state: GameState,
}
impl<S: PieceSource> Game<S> {
    pub fn new(config: &GameConfig, mut source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let shapes = config.build_shapes()?;
        let board = Board::new(config.board_width, config.board_height);
        let color_count = config.palette.len();
        let piece = spawn_piece(&shapes, color_count, board.width(), &mut source);

        Ok(Self {
            board,
            shapes,
            color_count,
            piece,
            source,
            score: 0,
            state: GameState::Running,
        })
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn piece(&self) -> &Piece { &self.piece }
    pub fn score(&self) -> u64 { self.score }
    pub fn state(&self) -> GameState { self.state }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Shifts the piece horizontally; a move that would collide is undone.
    pub fn move_piece(&mut self, dx: i32) {
        if self.is_game_over() {
            return;
        }

        self.piece.x += dx;
        if self.check_collision() {
            self.piece.x -= dx;
        }
    }

    /// Rotates the piece clockwise; a rotation that would collide is undone.
    pub fn rotate_piece(&mut self) {
        if self.is_game_over() {
            return;
        }

        let previous_shape = self.piece.shape.clone();
        self.piece.rotate();
        if self.check_collision() {
            self.piece.shape = previous_shape;
        }
    }

    /// Moves the piece down by one row. If it cannot move, it locks into the board; then either
    /// the game ends (the piece is still above the board) or full rows are cleared and the next
    /// piece spawns.
    pub fn drop_piece(&mut self) -> DropOutcome {
        if self.is_game_over() {
            return DropOutcome::Ignored;
        }

        self.piece.y += 1;
        if !self.check_collision() {
            return DropOutcome::Fell;
        }
        self.piece.y -= 1;

        self.merge_piece();
        if self.piece.y < 0 {
            self.state = GameState::GameOver;
            info!(score = self.score, "game over");
            return DropOutcome::ToppedOut;
        }

        let cleared_rows = self.clear_lines();
        self.piece = spawn_piece(&self.shapes, self.color_count, self.board.width(), &mut self.source);
        DropOutcome::Locked { cleared_rows }
    }

    /// Returns whether the piece overlaps a wall, the floor or an occupied board cell. Cells above
    /// the board only collide with the walls.
    pub fn check_collision(&self) -> bool {
        let width = signed(self.board.width());
        let height = signed(self.board.height());

        self.piece.cells().any(|(x, y)| {
            if x < 0 || x >= width || y >= height {
                return true;
            }
            match self.board.get(x, y) {
                Some(cell) => cell != 0,
                None => false, // above the board
            }
        })
    }

    /// Writes the piece into the board. Cells outside the board are skipped and reported; the
    /// number of skipped cells is returned.
    pub fn merge_piece(&mut self) -> usize {
        let value = self.piece.board_value();
        let mut skipped = 0;
        for (x, y) in self.piece.cells() {
            match self.board.index_coords(x, y) {
                Some((bx, by)) => *self.board.cell_mut(bx, by) = value,
                None => {
                    error!(x, y, "attempted to merge piece outside board");
                    skipped += 1;
                },
            }
        }
        debug!(x = self.piece.x, y = self.piece.y, color = self.piece.color_index, "piece locked in");
        skipped
    }

    /// Removes all full rows and adds their number to the score.
    pub fn clear_lines(&mut self) -> usize {
        let cleared_rows = self.board.clear_full_rows();
        if cleared_rows > 0 {
            self.score += u64::try_from(cleared_rows).unwrap_or(u64::MAX);
            debug!(cleared_rows, score = self.score, "cleared lines");
        }
        cleared_rows
    }
}


fn spawn_piece<S: PieceSource>(
    shapes: &[Shape],
    color_count: usize,
    board_width: usize,
    source: &mut S,
) -> Piece {
    let choice = source.next_piece();

    let mut shape_index = choice.shape_index;
    if shape_index >= shapes.len() {
        warn!(shape_index, shape_count = shapes.len(), "piece source chose a missing shape");
        shape_index %= shapes.len();
    }
    let mut color_index = choice.color_index;
    if color_index >= color_count {
        warn!(color_index, color_count, "piece source chose a missing color");
        color_index %= color_count;
    }

    Piece::spawn(shapes[shape_index].clone(), color_index, board_width)
}
