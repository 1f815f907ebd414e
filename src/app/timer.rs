//! Game stopwatch
//!
//! Starts when play begins and is stopped exactly once, when the puzzle is
//! solved. The clock display is derived on demand instead of from a ticking
//! callback.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTimer {
    started: Instant,
    stopped: Option<Duration>,
}

impl GameTimer {
    /// Starts a timer now
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self { started, stopped: None }
    }

    pub fn is_running(&self) -> bool {
        self.stopped.is_none()
    }

    /// Time since start, frozen once stopped
    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }

    /// Whole seconds since start
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Stops the timer and returns the final elapsed time
    ///
    /// Only the first call stops the clock; later calls return `None`.
    pub fn stop(&mut self) -> Option<Duration> {
        if self.stopped.is_some() {
            return None;
        }
        let elapsed = self.started.elapsed();
        self.stopped = Some(elapsed);
        Some(elapsed)
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::start()
    }
}

/// Formats seconds as zero-padded `MM:SS`
///
/// Minutes are not wrapped into hours, so an hour reads `60:00`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
