use std::{ops::ControlFlow, time::Duration};

use rand::Rng as _;

use crate::{
    PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind},
    },
};

use super::{Command, GameStats, piece_generator::PieceGenerator};

const BASE_FALL_INTERVAL: Duration = Duration::from_millis(500);
const MIN_FALL_INTERVAL: Duration = Duration::from_millis(50);
const FALL_INTERVAL_STEP: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// The authoritative game: board, current and next piece, statistics and
/// gravity.
///
/// Controllers (human or AI) only mutate the session through the primitive
/// operations here ([`try_move`](Self::try_move), [`try_rotate`](Self::try_rotate),
/// [`hard_drop`](Self::hard_drop), or [`handle_command`](Self::handle_command)),
/// so every move obeys the same legality rules.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    session_state: SessionState,
    fall_timer: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a session whose piece sequence is determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let current_piece = Piece::new(generator.next_kind());
        let next_piece = Piece::new(generator.next_kind());
        Self {
            board: Board::EMPTY,
            current_piece,
            next_piece,
            generator,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            fall_timer: Duration::ZERO,
        }
    }

    /// Creates a session starting from an existing board and current piece.
    ///
    /// Useful for replaying fixtures; the next piece is drawn from `seed`.
    #[must_use]
    pub fn from_board(board: Board, current: PieceKind, seed: u64) -> Self {
        let mut session = Self::with_seed(seed);
        session.board = board;
        session.current_piece = Piece::new(current);
        if !session.board.is_legal(&session.current_piece) {
            session.session_state = SessionState::GameOver;
        }
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_legal(&self, piece: &Piece) -> bool {
        self.board.is_legal(piece)
    }

    /// Current piece dropped to its resting position (drop preview).
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.board.drop_to_rest(self.current_piece)
    }

    /// Gravity interval for the current level.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        let level = u32::try_from(self.stats.level()).unwrap_or(u32::MAX);
        BASE_FALL_INTERVAL
            .saturating_sub(FALL_INTERVAL_STEP.saturating_mul(level - 1))
            .max(MIN_FALL_INTERVAL)
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver, // No change from game over
        };
    }

    /// Starts a fresh game. The piece sequence continues from the same generator.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.current_piece = Piece::new(self.generator.next_kind());
        self.next_piece = Piece::new(self.generator.next_kind());
        self.stats = GameStats::new();
        self.session_state = SessionState::Playing;
        self.fall_timer = Duration::ZERO;
    }

    /// Moves the current piece if the destination is legal.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        let piece = self.current_piece.moved(dx, dy);
        if !self.board.is_legal(&piece) {
            return Err(PieceCollisionError);
        }
        self.current_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_move(-1, 0)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_move(1, 0)
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.try_move(0, 1)
    }

    /// Rotates the current piece to its next rotation state if that is legal.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.current_piece.rotated();
        if !self.board.is_legal(&piece) {
            return Err(PieceCollisionError);
        }
        self.current_piece = piece;
        Ok(())
    }

    /// Drops the current piece to rest, awarding points per row, and locks it.
    pub fn hard_drop(&mut self) {
        let mut rows = 0;
        while self.try_soft_drop().is_ok() {
            rows += 1;
        }
        self.stats.add_hard_drop(rows);
        self.lock_current_piece();
    }

    /// Advances gravity by `dt`. Does nothing unless the session is playing.
    pub fn update(&mut self, dt: Duration) {
        if !self.session_state.is_playing() {
            return;
        }
        self.fall_timer += dt;
        if self.fall_timer >= self.fall_interval() {
            if self.try_soft_drop().is_err() {
                self.lock_current_piece();
            }
            self.fall_timer = Duration::ZERO;
        }
    }

    /// Applies a controller command.
    ///
    /// Movement commands are ignored unless the session is playing, and
    /// rejected moves are silently dropped. `Restart` only acts after game over.
    /// Returns [`ControlFlow::Break`] when the controller asked to quit.
    pub fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Quit => return ControlFlow::Break(()),
            Command::Restart => {
                if self.session_state.is_game_over() {
                    self.reset();
                }
            }
            Command::TogglePause => self.toggle_pause(),
            _ if !self.session_state.is_playing() => {}
            Command::MoveLeft => {
                self.try_move_left().ok();
            }
            Command::MoveRight => {
                self.try_move_right().ok();
            }
            Command::SoftDrop => {
                self.try_soft_drop().ok();
            }
            Command::Rotate => {
                self.try_rotate().ok();
            }
            Command::HardDrop => self.hard_drop(),
        }
        ControlFlow::Continue(())
    }

    fn lock_current_piece(&mut self) {
        self.board.lock(&self.current_piece);
        let cleared_lines = self.board.clear_complete_rows();
        self.stats.complete_piece_drop(cleared_lines);

        self.current_piece = self.next_piece;
        self.next_piece = Piece::new(self.generator.next_kind());
        if !self.board.is_legal(&self.current_piece) {
            log::info!(
                "game over: score {}, lines {}, pieces {}",
                self.stats.score(),
                self.stats.total_cleared_lines(),
                self.stats.completed_pieces()
            );
            self.session_state = SessionState::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PiecePosition;

    fn session_with(board: &str, kind: PieceKind) -> GameSession {
        GameSession::from_board(Board::from_ascii(board).unwrap(), kind, 0)
    }

    #[test]
    fn test_new_session_is_playing() {
        let session = GameSession::with_seed(3);
        assert!(session.session_state().is_playing());
        assert_eq!(session.current_piece().position(), PiecePosition::SPAWN_POSITION);
        assert_eq!(session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_try_move_rejects_walls() {
        let mut session = session_with("", PieceKind::O);
        // O occupies columns x+1..=x+2; spawn x is 3
        for _ in 0..4 {
            session.try_move_left().unwrap();
        }
        assert_eq!(session.current_piece().x(), -1);
        assert_eq!(session.try_move_left(), Err(PieceCollisionError));
        assert_eq!(session.current_piece().x(), -1);
    }

    #[test]
    fn test_try_rotate_only_when_legal() {
        let mut session = session_with("", PieceKind::I);
        session.try_rotate().unwrap();
        assert_eq!(session.current_piece().rotation(), 1);

        // Vertical I sits at column x+2; horizontal I spans x..=x+3.
        let mut session = session_with("", PieceKind::I);
        for _ in 0..5 {
            session.try_move_left().unwrap();
        }
        assert_eq!(session.current_piece().x(), -2);
        assert_eq!(session.try_rotate(), Err(PieceCollisionError));
        assert_eq!(session.current_piece().rotation(), 0);
    }

    #[test]
    fn test_hard_drop_locks_scores_and_spawns_next() {
        let mut session = session_with("", PieceKind::O);
        let next = *session.next_piece();
        session.hard_drop();

        assert!(session.board().is_occupied(4, 19));
        assert!(session.board().is_occupied(5, 18));
        // 16 rows travelled at 2 points each
        assert_eq!(session.stats().score(), 32);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.current_piece(), &next);
    }

    #[test]
    fn test_hard_drop_clears_lines() {
        let mut session = session_with(
            "
            ####..####
            ####..####
            ",
            PieceKind::O,
        );
        session.hard_drop();
        assert_eq!(session.stats().total_cleared_lines(), 2);
        assert_eq!(session.stats().score(), 300 + 16 * 2);
        assert_eq!(session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_update_applies_gravity_on_interval() {
        let mut session = session_with("", PieceKind::T);
        let y0 = session.current_piece().y();
        session.update(Duration::from_millis(499));
        assert_eq!(session.current_piece().y(), y0);
        session.update(Duration::from_millis(1));
        assert_eq!(session.current_piece().y(), y0 + 1);
    }

    #[test]
    fn test_update_locks_resting_piece() {
        let mut session = session_with("", PieceKind::O);
        let ghost = session.ghost_piece();
        session.try_move(0, ghost.y() - session.current_piece().y()).unwrap();
        session.update(Duration::from_millis(500));
        assert_eq!(session.stats().completed_pieces(), 1);
        assert!(session.board().is_occupied(4, 19));
    }

    #[test]
    fn test_pause_freezes_gravity_and_movement() {
        let mut session = session_with("", PieceKind::T);
        let before = *session.current_piece();
        assert!(session.handle_command(Command::TogglePause).is_continue());
        assert!(session.session_state().is_paused());

        session.update(Duration::from_secs(10));
        session.handle_command(Command::MoveLeft);
        session.handle_command(Command::HardDrop);
        assert_eq!(session.current_piece(), &before);
        assert_eq!(session.stats().completed_pieces(), 0);

        session.handle_command(Command::TogglePause);
        assert!(session.session_state().is_playing());
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut art = String::new();
        for _ in 0..16 {
            art.push_str("#########.\n");
        }
        let mut session = session_with(&art, PieceKind::O);
        session.hard_drop();
        assert!(session.session_state().is_game_over());

        // Pause has no effect after game over, restart does.
        session.toggle_pause();
        assert!(session.session_state().is_game_over());
        session.handle_command(Command::Restart);
        assert!(session.session_state().is_playing());
        assert_eq!(session.board(), &Board::EMPTY);
        assert_eq!(session.stats().score(), 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = session_with("#.........", PieceKind::T);
        session.handle_command(Command::Restart);
        assert!(session.board().is_occupied(0, 19));
    }

    #[test]
    fn test_quit_breaks() {
        let mut session = GameSession::with_seed(0);
        assert!(session.handle_command(Command::Quit).is_break());
    }

    #[test]
    fn test_fall_interval_by_level() {
        let mut session = GameSession::with_seed(0);
        assert_eq!(session.fall_interval(), Duration::from_millis(500));
        for _ in 0..10 {
            session.stats.complete_piece_drop(1);
        }
        assert_eq!(session.fall_interval(), Duration::from_millis(450));
        for _ in 0..200 {
            session.stats.complete_piece_drop(1);
        }
        assert_eq!(session.fall_interval(), MIN_FALL_INTERVAL);
    }
}
