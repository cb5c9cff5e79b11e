//! Turning a chosen placement into controller inputs.
//!
//! The plan always rotates forward first, then shifts horizontally, then
//! hard-drops. It is replayed without re-validation: the search already proved
//! the final position reachable from the spawn row.

use std::collections::VecDeque;

use autotris_engine::{Command, Piece};
use serde::Serialize;

use crate::placement_search::PlacementCandidate;

/// The subset of [`Command`]s an autonomous controller issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    #[display("rotate")]
    Rotate,
    #[display("move-left")]
    MoveLeft,
    #[display("move-right")]
    MoveRight,
    #[display("hard-drop")]
    HardDrop,
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        match action {
            Action::Rotate => Command::Rotate,
            Action::MoveLeft => Command::MoveLeft,
            Action::MoveRight => Command::MoveRight,
            Action::HardDrop => Command::HardDrop,
        }
    }
}

/// Builds the action sequence from the current rotation and column to the
/// target ones.
///
/// Rotations are `(target_rotation - current_rotation) mod rotation_count`
/// forward steps, never backward. The sequence always ends in exactly one
/// [`Action::HardDrop`].
#[must_use]
pub fn plan(
    current_rotation: usize,
    current_x: i32,
    rotation_count: usize,
    target_rotation: usize,
    target_x: i32,
) -> VecDeque<Action> {
    let rotation_count = rotation_count.max(1);
    let rotations = (target_rotation % rotation_count + rotation_count
        - current_rotation % rotation_count)
        % rotation_count;
    let shift = if target_x < current_x {
        Action::MoveLeft
    } else {
        Action::MoveRight
    };
    let shifts = target_x.abs_diff(current_x) as usize;

    let mut actions = VecDeque::with_capacity(rotations + shifts + 1);
    actions.extend(std::iter::repeat_n(Action::Rotate, rotations));
    actions.extend(std::iter::repeat_n(shift, shifts));
    actions.push_back(Action::HardDrop);
    actions
}

/// Plans the moves that carry `piece` from its current state to `candidate`.
#[must_use]
pub fn plan_actions(piece: &Piece, candidate: &PlacementCandidate) -> VecDeque<Action> {
    plan(
        piece.rotation(),
        piece.x(),
        piece.rotation_count(),
        candidate.rotation(),
        candidate.x(),
    )
}

#[cfg(test)]
mod tests {
    use autotris_engine::{Board, GameSession, PieceKind};

    use super::*;
    use crate::{placement_search::best_move, weights::EvaluationWeights};

    use super::Action::{HardDrop, MoveLeft, MoveRight, Rotate};

    #[test]
    fn test_actions_never_stop_the_session() {
        let mut session = GameSession::with_seed(0);
        for action in [Rotate, MoveLeft, MoveRight, HardDrop] {
            assert_ne!(Command::from(action), Command::Quit);
            assert!(session.handle_command(action.into()).is_continue());
        }
    }

    #[test]
    fn test_rotate_then_move_then_drop() {
        let actions = plan(0, 3, 4, 2, 5);
        assert_eq!(
            Vec::from(actions),
            [Rotate, Rotate, MoveRight, MoveRight, HardDrop]
        );
    }

    #[test]
    fn test_rotation_wraps_forward() {
        assert_eq!(Vec::from(plan(3, 4, 4, 0, 4)), [Rotate, HardDrop]);
        assert_eq!(
            Vec::from(plan(1, 4, 2, 0, 1)),
            [Rotate, MoveLeft, MoveLeft, MoveLeft, HardDrop]
        );
    }

    #[test]
    fn test_already_in_place() {
        assert_eq!(Vec::from(plan(0, 3, 1, 0, 3)), [HardDrop]);
    }

    #[test]
    fn test_negative_target() {
        assert_eq!(
            Vec::from(plan(0, 3, 1, 0, -1)),
            [MoveLeft, MoveLeft, MoveLeft, MoveLeft, HardDrop]
        );
    }

    #[test]
    fn test_replay_reaches_candidate() {
        let board = Board::from_ascii(
            "
            #.########
            #.########
            ",
        )
        .unwrap();
        let mut session = GameSession::from_board(board.clone(), PieceKind::I, 0);
        let piece = *session.current_piece();
        let candidate = best_move(&board, &piece, &EvaluationWeights::default()).unwrap();

        let mut actions = plan_actions(&piece, &candidate);
        assert_eq!(actions.pop_back(), Some(HardDrop));
        for action in actions {
            let _ = session.handle_command(action.into());
        }
        assert_eq!(session.ghost_piece(), *candidate.placement());

        let _ = session.handle_command(HardDrop.into());
        assert_eq!(session.stats().total_cleared_lines(), 2);
    }
}
