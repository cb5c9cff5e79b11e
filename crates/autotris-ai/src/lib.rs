//! Heuristic autonomous player for the falling-block engine.
//!
//! The crate is layered bottom-up:
//!
//! ```text
//! AutoPlayer (timers + action queue, drives a GameSession)
//!     ↓ uses
//! Action planner (rotate, shift, hard-drop)
//!     ↓ uses
//! Placement search (every rotation × every x, strict-improvement tie-break)
//!     ↓ uses
//! Placement analysis + weights (holes, landing height, lines, bumpiness)
//! ```
//!
//! - [`board_analysis`] - Lazily evaluated board metrics
//! - [`placement_analysis`] - Features of a hypothetical post-lock board
//! - [`weights`] - Linear scoring coefficients
//! - [`placement_search`] - [`best_move`](placement_search::best_move)
//! - [`action_plan`] - Converts a chosen placement into controller actions
//! - [`auto_player`] - Paced controller built on all of the above
//!
//! Every search runs on private copies of the board; the live session is only
//! ever changed through [`Command`](autotris_engine::Command)s.

pub mod action_plan;
pub mod auto_player;
pub mod board_analysis;
pub mod placement_analysis;
pub mod placement_search;
pub mod weights;
