/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Points awarded for each row a piece travels during a hard drop.
const HARD_DROP_POINTS_PER_ROW: usize = 2;

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// # Scoring
///
/// - Line clears award [`SCORE_TABLE`] points multiplied by the level reached
///   *after* the cleared lines are counted
/// - Hard drops award 2 points per row travelled
/// - Level starts at 1 and increases by 1 for every 10 lines cleared
///
/// # Example
///
/// ```
/// use autotris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: 1 plus one level per 10 lines cleared.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / 10 + 1
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Index `n` is the number of locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece is locked.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by the lock (0-4)
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        let points = SCORE_TABLE.get(cleared_lines).copied().unwrap_or(0);
        self.score += points * self.level();
    }

    /// Awards hard drop points for the rows travelled.
    pub fn add_hard_drop(&mut self, rows: usize) {
        self.score += rows * HARD_DROP_POINTS_PER_ROW;
    }
}
