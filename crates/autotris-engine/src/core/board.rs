use std::fmt;

use arrayvec::ArrayVec;

use super::piece::{Piece, PieceKind};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A single cell of the board.
///
/// Occupied cells optionally carry the kind of the piece that filled them,
/// which only matters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Occupied cell with no display attribute (e.g. loaded from a fixture).
    Garbage,
    /// Cell locked from a piece of a specific type.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }
}

/// A single row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Cell; BOARD_WIDTH],
}

impl BoardRow {
    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; BOARD_WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; BOARD_WIDTH] {
        &self.cells
    }

    /// Checks if every column of the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| c.is_occupied())
    }
}

/// Fixed-size 20×10 playfield.
///
/// Rows are indexed top to bottom (row 0 is topmost), columns left to right.
/// Only the visible grid is stored; cells above row 0 are implicitly empty, which
/// lets pieces spawn partially off the top of the board.
///
/// `Board` is plain data, so `clone()` yields a fully independent snapshot that
/// can be mutated for lookahead without touching the original.
///
/// # Example
///
/// ```
/// use autotris_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = board.drop_to_rest(Piece::new(PieceKind::I));
/// board.lock(&piece);
/// assert!(board.complete_rows().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn rows(&self) -> &[BoardRow; BOARD_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y].cells[x]
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_occupied()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].cells[x] = cell;
    }

    /// Checks whether every cell of the piece lies inside the side walls, above
    /// the floor, and on an empty cell.
    ///
    /// Cells above row 0 are always legal.
    #[must_use]
    pub fn is_legal(&self, piece: &Piece) -> bool {
        piece.blocks().into_iter().all(|(x, y)| {
            let Ok(x) = usize::try_from(x) else {
                return false;
            };
            if x >= BOARD_WIDTH {
                return false;
            }
            match usize::try_from(y) {
                Err(_) => true,
                Ok(y) => y < BOARD_HEIGHT && self.rows[y].cells[x].is_empty(),
            }
        })
    }

    /// Checks legality of the piece after applying a translation and an optional
    /// rotation override, without modifying the piece.
    #[must_use]
    pub fn is_legal_with(
        &self,
        piece: &Piece,
        dx: i32,
        dy: i32,
        rotation: Option<usize>,
    ) -> bool {
        let mut candidate = piece.moved(dx, dy);
        if let Some(rotation) = rotation {
            candidate = candidate.with_rotation(rotation);
        }
        self.is_legal(&candidate)
    }

    /// Moves the piece down one row at a time while the next row is legal and
    /// returns the resting piece.
    #[must_use]
    pub fn drop_to_rest(&self, piece: Piece) -> Piece {
        let mut dropped = piece;
        while self.is_legal(&dropped.moved(0, 1)) {
            dropped.translate(0, 1);
        }
        dropped
    }

    /// Writes the piece's cells into the board.
    ///
    /// Cells outside the visible grid (including every cell with a negative row)
    /// are skipped. Returns `false` if any cell was skipped, which for a resting
    /// piece means it locked above the visible area.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let mut fully_visible = true;
        for (x, y) in piece.blocks() {
            match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) if x < BOARD_WIDTH && y < BOARD_HEIGHT => {
                    self.rows[y].cells[x] = Cell::Piece(piece.kind());
                }
                _ => fully_visible = false,
            }
        }
        fully_visible
    }

    /// Indices of rows in which every column is filled, in ascending order.
    #[must_use]
    pub fn complete_rows(&self) -> ArrayVec<usize, BOARD_HEIGHT> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_filled())
            .map(|(y, _)| y)
            .collect()
    }

    /// Removes the listed rows and refills the top with the same number of empty
    /// rows. Remaining rows keep their relative order.
    ///
    /// Duplicate and out-of-range indices are ignored.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if rows.contains(&y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
    }

    /// Clears every complete row and returns how many were removed.
    pub fn clear_complete_rows(&mut self) -> usize {
        let rows = self.complete_rows();
        self.clear_rows(&rows);
        rows.len()
    }

    /// Parses a board from ASCII art: `#` is an occupied cell, `.` an empty one.
    ///
    /// Each line must have exactly 10 cells. Lines fill the board from the
    /// bottom, so a fixture only needs to list its non-empty rows. Blank lines
    /// and whitespace are ignored.
    pub fn from_ascii(art: &str) -> Result<Self, ParseBoardError> {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.len() > BOARD_HEIGHT {
            return Err(ParseBoardError::TooManyRows { rows: lines.len() });
        }

        let mut board = Self::EMPTY;
        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let mut row = BoardRow::EMPTY;
            let mut width = 0;
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = match ch {
                    '#' => Cell::Garbage,
                    '.' => Cell::Empty,
                    _ => return Err(ParseBoardError::InvalidCell { line: i + 1, ch }),
                };
                if width < BOARD_WIDTH {
                    row.cells[width] = cell;
                }
                width += 1;
            }
            if width != BOARD_WIDTH {
                return Err(ParseBoardError::WrongWidth { line: i + 1, width });
            }
            board.rows[top + i] = row;
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row.cells {
                f.write_str(if cell.is_empty() { "." } else { "#" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Error returned by [`Board::from_ascii`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has {rows} rows, at most {BOARD_HEIGHT} allowed")]
    TooManyRows { rows: usize },
    #[display("line {line} has {width} cells, expected {BOARD_WIDTH}")]
    WrongWidth { line: usize, width: usize },
    #[display("line {line} contains invalid cell '{ch}' (expected '#' or '.')")]
    InvalidCell { line: usize, ch: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(art: &str) -> Board {
        Board::from_ascii(art).unwrap()
    }

    fn filled_row() -> BoardRow {
        BoardRow {
            cells: [Cell::Garbage; BOARD_WIDTH],
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                assert!(!board.is_occupied(x, y));
            }
        }
        assert!(board.complete_rows().is_empty());
    }

    #[test]
    fn test_from_ascii_is_bottom_aligned() {
        let board = board(
            "
            #.........
            ##########
            ",
        );
        assert!(board.is_occupied(0, BOARD_HEIGHT - 2));
        assert!(!board.is_occupied(1, BOARD_HEIGHT - 2));
        assert!(board.rows[BOARD_HEIGHT - 1].is_filled());
        assert_eq!(board.complete_rows().as_slice(), &[BOARD_HEIGHT - 1]);
    }

    #[test]
    fn test_from_ascii_errors() {
        assert_eq!(
            Board::from_ascii("#########"),
            Err(ParseBoardError::WrongWidth { line: 1, width: 9 })
        );
        assert_eq!(
            Board::from_ascii("####x#####"),
            Err(ParseBoardError::InvalidCell { line: 1, ch: 'x' })
        );
        let tall = "..........\n".repeat(BOARD_HEIGHT + 1);
        assert_eq!(
            Board::from_ascii(&tall),
            Err(ParseBoardError::TooManyRows {
                rows: BOARD_HEIGHT + 1
            })
        );
    }

    #[test]
    fn test_is_legal_bounds() {
        let board = Board::EMPTY;
        // O occupies template columns 1..=2, rows 2..=3
        let o = Piece::new(PieceKind::O);
        assert!(board.is_legal(&o.with_position(-1, 0)));
        assert!(!board.is_legal(&o.with_position(-2, 0)));
        assert!(board.is_legal(&o.with_position(7, 0)));
        assert!(!board.is_legal(&o.with_position(8, 0)));
        assert!(board.is_legal(&o.with_position(0, 16)));
        assert!(!board.is_legal(&o.with_position(0, 17)));
    }

    #[test]
    fn test_is_legal_allows_cells_above_ceiling() {
        let mut board = Board::EMPTY;
        for x in 0..BOARD_WIDTH {
            board.set_cell(x, 0, Cell::Garbage);
        }
        // Entirely above row 0
        let o = Piece::new(PieceKind::O).with_position(3, -4);
        assert!(board.is_legal(&o));
        // Bottom half overlaps row 0
        assert!(!board.is_legal(&o.moved(0, 1)));
    }

    #[test]
    fn test_is_legal_with_override() {
        let board = Board::EMPTY;
        // Vertical I at column x+2, horizontal I spans template columns 0..=3
        let i = Piece::new(PieceKind::I).with_position(-2, 0);
        assert!(board.is_legal(&i));
        assert!(!board.is_legal_with(&i, 0, 0, Some(1)));
        assert!(board.is_legal_with(&i, 2, 0, Some(1)));
        assert!(!board.is_legal_with(&i, -1, 0, None));
        assert_eq!(i.rotation(), 0);
    }

    #[test]
    fn test_is_legal_detects_overlap() {
        let board = board("#.........");
        let o = Piece::new(PieceKind::O).with_position(-1, 16);
        assert!(!board.is_legal(&o));
        assert!(board.is_legal(&o.moved(0, -1)));
    }

    #[test]
    fn test_drop_to_rest_lands_on_floor_and_stack() {
        let board = Board::EMPTY;
        let rested = board.drop_to_rest(Piece::new(PieceKind::O));
        assert_eq!(rested.y(), 16);
        assert!(board.is_legal(&rested));
        assert!(!board.is_legal(&rested.moved(0, 1)));

        let board = board_with_heights(&[0, 0, 0, 0, 3, 0, 0, 0, 0, 0]);
        let rested = board.drop_to_rest(Piece::new(PieceKind::O));
        // O at x=3 covers columns 4 and 5; column 4 has height 3
        assert_eq!(rested.y(), 13);
        assert!(board.is_legal(&rested));
        assert!(!board.is_legal(&rested.moved(0, 1)));
    }

    #[test]
    fn test_drop_to_rest_from_every_legal_spawn() {
        let board = board(
            "
            ..#.......
            .###...#..
            ####.#####
            ",
        );
        for kind in PieceKind::ALL {
            for rotation in 0..kind.rotation_count() {
                for x in -2..=(BOARD_WIDTH as i32 + 1) {
                    let piece = Piece::new(kind).with_rotation(rotation).with_position(x, 0);
                    if !board.is_legal(&piece) {
                        continue;
                    }
                    let rested = board.drop_to_rest(piece);
                    assert!(board.is_legal(&rested));
                    assert!(!board.is_legal(&rested.moved(0, 1)));
                    assert!(rested.y() - piece.y() <= BOARD_HEIGHT as i32);
                }
            }
        }
    }

    #[test]
    fn test_lock_writes_visible_cells_only() {
        let mut board = Board::EMPTY;
        let o = Piece::new(PieceKind::O).with_position(0, 16);
        assert!(board.lock(&o));
        assert_eq!(board.cell(1, 18), Cell::Piece(PieceKind::O));
        assert_eq!(board.cell(2, 19), Cell::Piece(PieceKind::O));

        let mut board = Board::EMPTY;
        // Rows -1 and 0
        let above = Piece::new(PieceKind::O).with_position(0, -3);
        assert!(!board.lock(&above));
        assert!(board.is_occupied(1, 0));
        assert!(board.is_occupied(2, 0));
        let occupied = board
            .rows
            .iter()
            .flat_map(|r| r.cells)
            .filter(|c| c.is_occupied())
            .count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_clear_rows_multiple_non_adjacent() {
        let mut board = Board::EMPTY;
        let marker = |y: usize| {
            let mut row = BoardRow::EMPTY;
            row.cells[y % BOARD_WIDTH] = Cell::Garbage;
            row
        };
        for y in 0..BOARD_HEIGHT {
            board.rows[y] = marker(y);
        }
        for y in [2, 5, 7] {
            board.rows[y] = filled_row();
        }
        let expected_rest: Vec<BoardRow> = (0..BOARD_HEIGHT)
            .filter(|y| ![2, 5, 7].contains(y))
            .map(marker)
            .collect();

        assert_eq!(board.complete_rows().as_slice(), &[2, 5, 7]);
        board.clear_rows(&[2, 5, 7]);

        assert_eq!(board.rows.len(), BOARD_HEIGHT);
        for y in 0..3 {
            assert_eq!(board.rows[y], BoardRow::EMPTY);
        }
        assert_eq!(&board.rows[3..], expected_rest.as_slice());
        assert!(board.complete_rows().is_empty());
    }

    #[test]
    fn test_clear_rows_order_of_indices_does_not_matter() {
        let art = "
            #.........
            ##########
            .#........
            ##########
            ..#.......
            ";
        let mut a = board(art);
        let mut b = board(art);
        a.clear_rows(&[BOARD_HEIGHT - 4, BOARD_HEIGHT - 2]);
        b.clear_rows(&[BOARD_HEIGHT - 2, BOARD_HEIGHT - 4, BOARD_HEIGHT - 2]);
        assert_eq!(a, b);
        assert_eq!(
            a,
            board(
                "
                #.........
                .#........
                ..#.......
                "
            )
        );
    }

    #[test]
    fn test_clear_complete_rows_bottom_and_all() {
        let mut board = board(
            "
            ....#.....
            ##########
            ",
        );
        assert_eq!(board.clear_complete_rows(), 1);
        assert_eq!(board, self::board("....#....."));

        let mut full = Board::EMPTY;
        full.rows.fill(filled_row());
        assert_eq!(full.clear_complete_rows(), BOARD_HEIGHT);
        assert_eq!(full, Board::EMPTY);
    }

    #[test]
    fn test_display_matches_ascii() {
        let board = board("##..#.....");
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_HEIGHT);
        assert_eq!(lines[BOARD_HEIGHT - 1], "##..#.....");
        assert_eq!(lines[0], "..........");
    }

    fn board_with_heights(heights: &[usize; BOARD_WIDTH]) -> Board {
        let mut board = Board::EMPTY;
        for (x, &h) in heights.iter().enumerate() {
            for y in BOARD_HEIGHT - h..BOARD_HEIGHT {
                board.set_cell(x, y, Cell::Garbage);
            }
        }
        board
    }
}
