use std::fmt;

use crate::error::ConfigError;


/// Converts a board or shape dimension into signed board space.
pub(crate) fn signed(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}


/// A rectangular 0/1 matrix describing which cells of a piece are filled.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Shape {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}
impl Shape {
    /// Builds a shape from rows of 0/1 values. `index` names the shape in errors.
    pub fn from_rows<R: AsRef<[u8]>>(index: usize, rows: &[R]) -> Result<Self, ConfigError> {
        let width = match rows.first() {
            Some(row) if !row.as_ref().is_empty() => row.as_ref().len(),
            _ => return Err(ConfigError::EmptyShape(index)),
        };

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ConfigError::RaggedShape {
                    shape: index,
                    row: y,
                    found: row.len(),
                    expected: width,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(ConfigError::InvalidShapeCell { shape: index, x, y, value }),
                }
            }
        }

        if !cells.iter().any(|&c| c) {
            return Err(ConfigError::HollowShape(index));
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Returns the (x, y) offsets of all filled cells, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells.iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Returns this shape turned a quarter clockwise: the transpose of the shape with its rows
    /// reversed. Width and height swap.
    pub fn rotated(&self) -> Self {
        let width = self.height;
        let height = self.width;
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..height {
            for x in 0..width {
                cells.push(self.is_filled(y, self.height - 1 - x));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }
}


/// The falling piece.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Piece {
    pub shape: Shape,

    /// 0-based index into the palette.
    pub color_index: usize,

    /// Board column of the shape's left edge.
    pub x: i32,

    /// Board row of the shape's top edge; negative while above the board.
    pub y: i32,
}
impl Piece {
    /// Places a new piece horizontally centered and entirely above the board.
    pub fn spawn(shape: Shape, color_index: usize, board_width: usize) -> Self {
        let x = signed(board_width / 2) - signed(shape.width() / 2);
        let y = -signed(shape.height());
        Self {
            shape,
            color_index,
            x,
            y,
        }
    }

    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated();
    }

    /// Returns the board coordinates of the piece's filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.filled_cells()
            .map(|(x, y)| (self.x + signed(x), self.y + signed(y)))
    }

    /// The value this piece leaves in board cells once it locks in.
    pub fn board_value(&self) -> u8 {
        u8::try_from(self.color_index + 1).unwrap_or(u8::MAX)
    }
}


/// The playing grid. A cell holds 0 when empty, otherwise a 1-based palette index.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Board {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}
impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut u8 {
        &mut self.cells[y * self.width + x]
    }

    /// Returns the cell at the given signed coordinates, or `None` outside the board.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        let (x, y) = self.index_coords(x, y)?;
        Some(self.cell(x, y))
    }

    /// Converts signed board coordinates into indices if they lie on the board.
    pub fn index_coords(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x < self.width && y < self.height {
            Some((x, y))
        } else {
            None
        }
    }

    /// Returns a reference to the board's cells, row by row.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|&c| c != 0)
    }

    /// Removes every full row, shifting the rows above it down and filling the top with empty
    /// rows. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write = self.height;
        for read in (0..self.height).rev() {
            if self.is_row_full(read) {
                continue;
            }
            write -= 1;
            if write != read {
                self.cells.copy_within(read * width..(read + 1) * width, write * width);
            }
        }

        // `write` rows at the top are stale
        self.cells[..write * width].fill(0);
        write
    }
}
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{250C}")?;
        for _ in 0..self.width {
            write!(f, "\u{2500}")?;
        }
        writeln!(f, "\u{2510}")?;

        for y in 0..self.height {
            write!(f, "\u{2502}")?;
            for &cell in self.row(y) {
                match cell {
                    0 => write!(f, " ")?,
                    c if c < 10 => write!(f, "{}", c)?,
                    _ => write!(f, "#")?,
                }
            }
            writeln!(f, "\u{2502}")?;
        }

        write!(f, "\u{2514}")?;
        for _ in 0..self.width {
            write!(f, "\u{2500}")?;
        }
        writeln!(f, "\u{2518}")?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Board, Piece, Shape};
    use crate::error::ConfigError;

    /// Builds a board from rows of cell values; all rows must have the same length.
    pub(crate) fn board_from_rows(rows: &[&[u8]]) -> Board {
        let width = rows[0].len();
        let mut board = Board::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width);
            for (x, &cell) in row.iter().enumerate() {
                *board.cell_mut(x, y) = cell;
            }
        }
        board
    }

    pub(crate) fn shape(rows: &[&[u8]]) -> Shape {
        Shape::from_rows(0, rows).unwrap()
    }

    #[test]
    fn test_shape_validation() {
        let empty: &[&[u8]] = &[];
        assert_eq!(Shape::from_rows(3, empty), Err(ConfigError::EmptyShape(3)));
        let blank_row: &[&[u8]] = &[&[]];
        assert_eq!(Shape::from_rows(3, blank_row), Err(ConfigError::EmptyShape(3)));
        let ragged: &[&[u8]] = &[&[1, 1], &[1]];
        assert_eq!(
            Shape::from_rows(1, ragged),
            Err(ConfigError::RaggedShape { shape: 1, row: 1, found: 1, expected: 2 }),
        );
        let hollow: &[&[u8]] = &[&[0, 0]];
        assert_eq!(Shape::from_rows(2, hollow), Err(ConfigError::HollowShape(2)));
    }

    #[test]
    fn test_rotate_t() {
        let t = shape(&[&[1, 1, 1], &[0, 1, 0]]);
        let rotated = t.rotated();
        assert_eq!(rotated, shape(&[&[0, 1], &[1, 1], &[0, 1]]));
    }

    #[test]
    fn test_rotate_non_square_swaps_dimensions() {
        let i = shape(&[&[1], &[1], &[1], &[1]]);
        let rotated = i.rotated();
        assert_eq!(rotated.width(), 4);
        assert_eq!(rotated.height(), 1);
        assert_eq!(rotated, shape(&[&[1, 1, 1, 1]]));
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let shapes = [
            shape(&[&[1, 1, 1], &[0, 1, 0]]),
            shape(&[&[1, 1, 0], &[0, 1, 1]]),
            shape(&[&[1], &[1], &[1], &[1]]),
            shape(&[&[1, 1, 1], &[1, 0, 0]]),
        ];
        for original in shapes {
            let mut piece = Piece::spawn(original.clone(), 0, 10);
            for _ in 0..4 {
                piece.rotate();
            }
            assert_eq!(piece.shape, original);
        }
    }

    #[test]
    fn test_spawn_position() {
        let t = shape(&[&[1, 1, 1], &[0, 1, 0]]);
        let piece = Piece::spawn(t, 4, 16);
        assert_eq!(piece.x, 7);
        assert_eq!(piece.y, -2);
        assert_eq!(piece.board_value(), 5);

        let cells: Vec<(i32, i32)> = piece.cells().collect();
        assert_eq!(cells, vec![(7, -2), (8, -2), (9, -2), (8, -1)]);
    }

    #[test]
    fn test_clear_single_row() {
        let mut board = Board::new(5, 20);
        for x in 0..5 {
            *board.cell_mut(x, 10) = 1;
        }
        *board.cell_mut(2, 9) = 3;
        *board.cell_mut(0, 11) = 4;

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.height(), 20);
        assert_eq!(board.row(0), &[0, 0, 0, 0, 0]);
        assert!((0..20).all(|y| !board.is_row_full(y)));
        // the row above the cleared one moved down, the row below stayed
        assert_eq!(board.row(10), &[0, 0, 3, 0, 0]);
        assert_eq!(board.row(11), &[4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_clear_preserves_order() {
        let mut board = board_from_rows(&[
            &[0, 0, 1],
            &[1, 1, 1],
            &[2, 0, 0],
            &[1, 1, 1],
            &[0, 3, 0],
        ]);
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board, board_from_rows(&[
            &[0, 0, 0],
            &[0, 0, 0],
            &[0, 0, 1],
            &[2, 0, 0],
            &[0, 3, 0],
        ]));
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = board_from_rows(&[
            &[0, 1],
            &[1, 0],
        ]);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_get_outside_board() {
        let board = Board::new(3, 2);
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(3, 0), None);
        assert_eq!(board.get(0, 2), None);
        assert_eq!(board.get(2, 1), Some(0));
    }

    #[test]
    fn test_display() {
        let board = board_from_rows(&[
            &[0, 1],
            &[2, 0],
        ]);
        assert_eq!(
            board.to_string(),
            "\u{250C}\u{2500}\u{2500}\u{2510}\n\u{2502} 1\u{2502}\n\u{2502}2 \u{2502}\n\u{2514}\u{2500}\u{2500}\u{2518}\n",
        );
    }
}
