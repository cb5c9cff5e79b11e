//! Falling-block puzzle engine: piece catalog, board simulation and live game
//! rules.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned when a move or rotation would put the current piece out of bounds
/// or on top of a locked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece would collide with the board")]
pub struct PieceCollisionError;
