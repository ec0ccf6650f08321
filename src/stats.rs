//! Statistics collected while searching

use std::time::Duration;

/// What happened during the last search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Completed iterations
    pub iterations: usize,

    /// Wall-clock time of the whole search
    pub total_time: Duration,

    /// Nodes in the tree when the search ended, root included
    pub tree_size: usize,

    /// Deepest node simulated from, relative to the root
    pub max_depth: usize,

    /// True if the time budget ended the search before the iteration budget
    pub stopped_early: bool,

    /// Visits of the root child that was chosen
    pub best_visits: u64,

    /// Average reward of the root child that was chosen
    pub best_value: f64,
}

impl SearchStatistics {
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::ZERO,
            tree_size: 1,
            max_depth: 0,
            stopped_early: false,
            best_visits: 0,
            best_value: 0.0,
        }
    }

    /// Iterations completed per second of search
    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }

    /// Share of iterations spent on the chosen move, in `[0, 1]`
    pub fn best_visit_share(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.best_visits as f64 / self.iterations as f64
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}{}\n\
             - Total time: {:.3} seconds ({:.1} iterations/s)\n\
             - Tree size: {} nodes, max depth {}\n\
             - Chosen move: {} visits ({:.1}%), value {:.3}",
            self.iterations,
            if self.stopped_early { " (stopped early)" } else { "" },
            self.total_time.as_secs_f64(),
            self.iterations_per_second(),
            self.tree_size,
            self.max_depth,
            self.best_visits,
            self.best_visit_share() * 100.0,
            self.best_value
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
