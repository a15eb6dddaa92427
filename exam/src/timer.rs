//! One-second countdown for strict exams.
//!
//! The countdown itself holds no clock; the driver (a browser interval or a
//! tokio interval) calls [`Countdown::tick`] once per second and must stop
//! scheduling as soon as a tick reports [`TickOutcome::Expired`] or
//! [`TickOutcome::Stopped`].

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// Seconds left below which the clock is rendered as a warning.
pub const LOW_TIME_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting; carries the remaining seconds.
    Running(u64),
    /// This tick reached zero. Reported exactly once.
    Expired,
    /// Already expired or stopped; nothing changed.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    stopped: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(secs: u64) -> Self {
        Self { remaining: secs, stopped: false }
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[must_use]
    pub fn is_running_low(&self) -> bool {
        !self.stopped && self.remaining <= LOW_TIME_SECS
    }

    /// Freeze the countdown; later ticks are no-ops.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stopped = true;
            return TickOutcome::Expired;
        }
        TickOutcome::Running(self.remaining)
    }
}

/// Render seconds as `MM:SS`, or `H:MM:SS` from one hour up.
#[must_use]
pub fn format_clock(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
