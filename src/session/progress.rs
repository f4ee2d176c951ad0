use std::fmt;
use std::time::{Duration, Instant};

/// Per-frame progress reporting: completed count and average rate.
#[derive(Debug)]
pub struct Progress {
    total: u64,
    done: u64,
    started: Instant,
}

/// Progress state after one completed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSnapshot {
    /// Frames completed so far.
    pub done: u64,
    /// Frames in the whole run.
    pub total: u64,
    /// Average frames per second since the start; `None` before any time has elapsed.
    pub rate: Option<f64>,
}

impl ProgressSnapshot {
    pub fn at(done: u64, total: u64, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        let rate = (secs > 0.0).then(|| done as f64 / secs);
        Self { done, total, rate }
    }

    /// Estimated time left at the current average rate.
    pub fn eta(&self) -> Option<Duration> {
        let rate = self.rate.filter(|r| *r > 0.0)?;
        let left = self.total.saturating_sub(self.done) as f64;
        Duration::try_from_secs_f64(left / rate).ok()
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.done, self.total)?;
        match self.rate {
            Some(r) if r >= 1.0 => write!(f, " [{r:.2} frames/s]"),
            Some(r) if r > 0.0 => write!(f, " [{:.2} s/frame]", 1.0 / r),
            _ => write!(f, " [? frames/s]"),
        }
    }
}

impl Progress {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            done: 0,
            started: Instant::now(),
        }
    }

    /// Record one finished frame and log the new state.
    pub fn frame_done(&mut self) -> ProgressSnapshot {
        self.done += 1;
        let snap = ProgressSnapshot::at(self.done, self.total, self.started.elapsed());
        match snap.eta() {
            Some(eta) => tracing::info!(eta_secs = eta.as_secs(), "shooting {snap}"),
            None => tracing::info!("shooting {snap}"),
        }
        snap
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/progress.rs"]
mod tests;
