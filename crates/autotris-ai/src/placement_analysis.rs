//! Analysis of a hypothetical piece placement.
//!
//! [`PlacementAnalysis`] locks a resting piece into a private copy of the
//! board and measures the result. Features are taken from the post-lock board
//! *before* any complete rows are cleared, so `lines_cleared` counts the rows
//! this placement completes and holes/bumpiness still see those rows.
//!
//! ```
//! use autotris_ai::placement_analysis::PlacementAnalysis;
//! use autotris_engine::{Board, Piece, PieceKind};
//!
//! let board = Board::EMPTY;
//! let placement = board.drop_to_rest(Piece::new(PieceKind::O));
//! let analysis = PlacementAnalysis::from_board(&board, placement);
//!
//! assert_eq!(analysis.features().holes, 0);
//! assert_eq!(analysis.features().landing_height, 16);
//! ```

use autotris_engine::{Board, Piece};
use serde::{Deserialize, Serialize};

use crate::board_analysis::BoardAnalysis;

/// Scalar features of a post-placement board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementFeatures {
    pub holes: usize,
    /// Row anchor of the resting piece. Smaller values are higher on the board.
    pub landing_height: i32,
    pub lines_cleared: usize,
    pub bumpiness: usize,
}

#[derive(Debug)]
pub struct PlacementAnalysis {
    placement: Piece,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Locks `placement` into a copy of `before_placement`; the original board
    /// is never touched.
    #[must_use]
    pub fn from_board(before_placement: &Board, placement: Piece) -> Self {
        let mut board = before_placement.clone();
        board.lock(&placement);
        Self {
            placement,
            board_analysis: BoardAnalysis::from_board(&board),
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    #[must_use]
    pub fn features(&self) -> PlacementFeatures {
        PlacementFeatures {
            holes: self.board_analysis.hole_count(),
            landing_height: self.placement.y(),
            lines_cleared: self.board_analysis.complete_lines(),
            bumpiness: self.board_analysis.bumpiness(),
        }
    }
}
