use autotris_ai::{
    action_plan::Action, auto_player::AutoPlayerConfig, placement_search::PlacementCandidate,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of a headless auto-play run
#[derive(Debug, Clone, Serialize)]
pub struct AutoPlayReport {
    /// Timestamp when the run finished (ISO 8601 format)
    pub finished_at: DateTime<Utc>,
    /// Random seed used for piece generation
    pub seed: u64,
    /// Player configuration, including the evaluation weights
    pub config: AutoPlayerConfig,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    /// Number of pieces locked into the board
    pub pieces: usize,
    /// Whether the run ended by topping out rather than reaching the piece limit
    pub game_over: bool,
}

/// Chosen placement for a single board and the inputs that reach it
#[derive(Debug, Clone, Serialize)]
pub struct BestMoveReport {
    pub candidate: PlacementCandidate,
    pub actions: Vec<Action>,
    /// Board rows after locking the piece and clearing complete rows, top first
    pub board_after: Vec<String>,
}
