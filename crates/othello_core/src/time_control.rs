//! Time control and search limits.
//!
//! Search runs against a wall-clock deadline. The stop flag is shared so the
//! worker that owns the search and anyone holding a clone observe the same
//! expiry. Checking is cooperative: the search calls [`TimeControl::check_time`]
//! at node entry and unwinds when it reports expiry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Default think budget per move.
pub const DEFAULT_MOVE_TIME: Duration = Duration::from_millis(2000);

/// Search limits that control when an engine should stop searching.
///
/// Engines respect both depth and time, stopping when either is reached.
/// Time takes precedence: once it runs out the engine returns the best move
/// from the deepest completed iteration.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Time controller for checking if search should stop
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Create limits with only time constraint (depth left to the engine).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::time(DEFAULT_MOVE_TIME)
    }
}

/// Thread-safe deadline tracker.
///
/// Cheap to clone; clones share the stop flag and start instant.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
    /// Nodes between clock reads. 1 reads the clock at every node.
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            check_interval: 1,
        }
    }

    /// Read the clock only every `interval` nodes (minimum 1).
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Start the clock and clear any previous expiry.
    pub fn start(&self) {
        *self
            .start_time
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    fn expire(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Fast atomic load of the stop flag.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and latches the stop flag once the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit {
            if self.elapsed() >= limit {
                self.expire();
                return true;
            }
        }

        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    /// Time since `start`, zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
