use std::{cell::OnceCell, iter};

use autotris_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board};

/// Lazily evaluated metrics of a board snapshot.
///
/// Each metric is computed on first access and cached, so evaluating only a
/// subset of them costs only what is used.
#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    column_heights: OnceCell<[usize; BOARD_WIDTH]>,
    hole_count: OnceCell<usize>,
    bumpiness: OnceCell<usize>,
    complete_lines: OnceCell<usize>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board.clone(),
            column_heights: OnceCell::new(),
            hole_count: OnceCell::new(),
            bumpiness: OnceCell::new(),
            complete_lines: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Per column, the distance from the topmost filled cell down to the
    /// floor, or 0 for an empty column.
    #[must_use]
    pub fn column_heights(&self) -> &[usize; BOARD_WIDTH] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; BOARD_WIDTH];
            for (x, h) in column_heights.iter_mut().enumerate() {
                if let Some(top) = (0..BOARD_HEIGHT).find(|&y| self.board.is_occupied(x, y)) {
                    *h = BOARD_HEIGHT - top;
                }
            }
            column_heights
        })
    }

    /// Number of empty cells that have at least one filled cell above them in
    /// the same column.
    #[must_use]
    pub fn hole_count(&self) -> usize {
        *self.hole_count.get_or_init(|| {
            let mut holes = 0;
            for x in 0..BOARD_WIDTH {
                let mut covered = false;
                for y in 0..BOARD_HEIGHT {
                    if self.board.is_occupied(x, y) {
                        covered = true;
                    } else if covered {
                        holes += 1;
                    }
                }
            }
            holes
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        *self.bumpiness.get_or_init(|| {
            let h = self.column_heights();
            iter::zip(h, &h[1..]).map(|(a, b)| a.abs_diff(*b)).sum()
        })
    }

    /// Number of fully filled rows. Evaluated on the board as given, so a
    /// post-lock snapshot reports the lines its placement would clear.
    #[must_use]
    pub fn complete_lines(&self) -> usize {
        *self
            .complete_lines
            .get_or_init(|| self.board.complete_rows().len())
    }
}
