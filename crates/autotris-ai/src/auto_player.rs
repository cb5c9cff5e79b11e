//! Autonomous controller driving a [`GameSession`] through the same commands
//! a human player would send.
//!
//! Two accumulating timers pace the player. The *think* timer gates new
//! searches, which only happen while the action queue is empty. The *move*
//! timer releases one queued action per interval. Both timers are advanced by
//! a caller-supplied delta, so a test or a headless run can drive the player
//! with fixed fake ticks.
//!
//! ```
//! use std::time::Duration;
//!
//! use autotris_ai::auto_player::{AutoPlayer, AutoPlayerConfig};
//! use autotris_engine::GameSession;
//!
//! let mut session = GameSession::with_seed(7);
//! let mut player = AutoPlayer::new(AutoPlayerConfig::default());
//! for _ in 0..600 {
//!     player.update(&mut session, Duration::from_millis(16));
//!     session.update(Duration::from_millis(16));
//! }
//! assert!(session.stats().completed_pieces() > 0);
//! ```

use std::{collections::VecDeque, time::Duration};

use autotris_engine::GameSession;
use serde::{Deserialize, Serialize};

use crate::{
    action_plan::{Action, plan_actions},
    placement_search::{PlacementCandidate, best_move},
    weights::EvaluationWeights,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPlayerConfig {
    pub weights: EvaluationWeights,
    /// Minimum time between two searches.
    pub think_interval_ms: u64,
    /// Time between two replayed actions.
    pub move_interval_ms: u64,
}

impl Default for AutoPlayerConfig {
    fn default() -> Self {
        Self {
            weights: EvaluationWeights::default(),
            think_interval_ms: 200,
            move_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    weights: EvaluationWeights,
    think_interval: Duration,
    move_interval: Duration,
    think_timer: Duration,
    move_timer: Duration,
    actions: VecDeque<Action>,
    last_candidate: Option<PlacementCandidate>,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(AutoPlayerConfig::default())
    }
}

impl AutoPlayer {
    #[must_use]
    pub fn new(config: AutoPlayerConfig) -> Self {
        Self {
            weights: config.weights,
            think_interval: Duration::from_millis(config.think_interval_ms),
            move_interval: Duration::from_millis(config.move_interval_ms),
            think_timer: Duration::ZERO,
            move_timer: Duration::ZERO,
            actions: VecDeque::new(),
            last_candidate: None,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    /// Replaces the weights used by subsequent searches. Any value is accepted.
    pub fn set_weights(&mut self, weights: EvaluationWeights) {
        self.weights = weights;
    }

    /// Actions planned but not yet issued.
    #[must_use]
    pub fn pending_actions(&self) -> &VecDeque<Action> {
        &self.actions
    }

    /// The placement chosen by the most recent successful search.
    #[must_use]
    pub fn last_candidate(&self) -> Option<&PlacementCandidate> {
        self.last_candidate.as_ref()
    }

    /// Searches the session's current piece immediately, ignoring the timers.
    #[must_use]
    pub fn compute_best_move(&self, session: &GameSession) -> Option<PlacementCandidate> {
        best_move(session.board(), session.current_piece(), &self.weights)
    }

    /// Advances both timers by `dt`, then thinks and/or issues one action.
    ///
    /// Nothing happens while the session is paused or over: timers and the
    /// queue stay exactly as they were until play resumes.
    pub fn update(&mut self, session: &mut GameSession, dt: Duration) {
        if !session.session_state().is_playing() {
            return;
        }

        self.think_timer += dt;
        self.move_timer += dt;

        if self.actions.is_empty() && self.think_timer >= self.think_interval {
            self.think(session);
            self.think_timer = Duration::ZERO;
        }

        if !self.actions.is_empty() && self.move_timer >= self.move_interval {
            if let Some(action) = self.actions.pop_front() {
                log::trace!("action: {action}");
                let flow = session.handle_command(action.into());
                debug_assert!(flow.is_continue(), "{action} never quits");
            }
            self.move_timer = Duration::ZERO;
        }
    }

    fn think(&mut self, session: &GameSession) {
        let piece = session.current_piece();
        let Some(candidate) = self.compute_best_move(session) else {
            log::debug!("no legal placement for {}", piece.kind());
            return;
        };
        log::debug!(
            "placing {} at rotation {} x {} (score {:.1})",
            piece.kind(),
            candidate.rotation(),
            candidate.x(),
            candidate.score()
        );
        self.actions = plan_actions(piece, &candidate);
        self.last_candidate = Some(candidate);
    }
}
