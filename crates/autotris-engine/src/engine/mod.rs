//! Live game rules built on top of the [`core`](crate::core) data structures.
//!
//! - [`GameSession`] - Board, current and next piece, gravity, pause and game over
//! - [`GameStats`] - Score, level, cleared lines and piece count
//! - [`PieceGenerator`] - Seeded source of piece kinds
//! - [`Command`] - Primitive inputs shared by human and autonomous controllers
//!
//! # Example
//!
//! ```
//! use autotris_engine::{Command, GameSession};
//!
//! let mut session = GameSession::with_seed(1);
//! let _ = session.handle_command(Command::Rotate);
//! let _ = session.handle_command(Command::HardDrop);
//!
//! assert_eq!(session.stats().completed_pieces(), 1);
//! ```

pub use self::{command::*, game_session::*, game_stats::*, piece_generator::*};

mod command;
mod game_session;
mod game_stats;
mod piece_generator;
