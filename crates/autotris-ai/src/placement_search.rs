//! Exhaustive one-piece placement search.
//!
//! [`best_move`] tries every rotation of the piece at every horizontal offset
//! from `-2` to `BOARD_WIDTH + 1`, drops it from the spawn row, and scores the
//! legal results with [`EvaluationWeights`]. The scan range is wider than any
//! piece needs; out-of-bounds candidates are rejected as illegal.
//!
//! # Tie-breaking
//!
//! Only a strictly higher score replaces the current best, so among equal
//! scores the first candidate in scan order wins: lowest rotation index, then
//! lowest x.
//!
//! ```
//! use autotris_ai::{placement_search::best_move, weights::EvaluationWeights};
//! use autotris_engine::{Board, Piece, PieceKind};
//!
//! let candidate = best_move(&Board::EMPTY, &Piece::new(PieceKind::I), &EvaluationWeights::default())
//!     .expect("empty board always has a placement");
//! assert_eq!(candidate.features().holes, 0);
//! ```

use std::ops::RangeInclusive;

use autotris_engine::{BOARD_WIDTH, Board, Piece, PiecePosition};
use serde::Serialize;

use crate::{
    placement_analysis::{PlacementAnalysis, PlacementFeatures},
    weights::EvaluationWeights,
};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const SEARCH_X_RANGE: RangeInclusive<i32> = -2..=(BOARD_WIDTH as i32 + 1);

/// Result of the search: where the piece ends up and how it was scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementCandidate {
    placement: Piece,
    features: PlacementFeatures,
    score: f64,
}

impl PlacementCandidate {
    /// The resting piece, including its kind, rotation and anchor.
    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.placement.rotation()
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.placement.x()
    }

    #[must_use]
    pub fn landing_y(&self) -> i32 {
        self.placement.y()
    }

    #[must_use]
    pub fn features(&self) -> &PlacementFeatures {
        &self.features
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Finds the highest-scoring placement of `piece` on `board`.
///
/// Only the kind of `piece` matters; every candidate starts from the spawn row.
/// Each candidate is simulated on its own copy of the board. Returns `None`
/// when no candidate is legal.
#[must_use]
pub fn best_move(
    board: &Board,
    piece: &Piece,
    weights: &EvaluationWeights,
) -> Option<PlacementCandidate> {
    let mut best: Option<PlacementCandidate> = None;
    for rotation in 0..piece.rotation_count() {
        for x in SEARCH_X_RANGE {
            let start = piece
                .with_rotation(rotation)
                .with_position(x, PiecePosition::SPAWN_POSITION.y());
            let placement = board.drop_to_rest(start);
            if !board.is_legal(&placement) {
                continue;
            }

            let features = PlacementAnalysis::from_board(board, placement).features();
            let score = weights.score(&features);
            if best.is_none_or(|best| score > best.score) {
                best = Some(PlacementCandidate {
                    placement,
                    features,
                    score,
                });
            }
        }
    }
    best
}
