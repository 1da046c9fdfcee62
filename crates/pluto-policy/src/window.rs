//! Period window rollover.
//!
//! The window has two phases. It is **Open** while
//! `now - window_start < period_duration` and **Expired** once that much
//! time has passed. Expiry is only ever noticed when a request looks at the
//! window; there is no timer.
//!
//! Rollover is wholesale. An expired window is replaced by an empty one
//! anchored at the observing request's own timestamp, however many periods
//! went by. Waiting out several periods never accumulates quota.

use pluto_contracts::{mint::PeriodWindow, time::Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Open,
    Expired,
}

/// Which phase `window` is in as seen from `now`.
pub fn phase(window: &PeriodWindow, period_duration: u64, now: Timestamp) -> WindowPhase {
    if now.elapsed_since(window.window_start) >= period_duration {
        WindowPhase::Expired
    } else {
        WindowPhase::Open
    }
}

/// The window a request at `now` evaluates against.
///
/// Open windows come back unchanged. Expired windows are re-anchored to
/// `now` with a zero accumulator, never to `window_start + k * period`.
pub fn roll_over(window: &PeriodWindow, period_duration: u64, now: Timestamp) -> PeriodWindow {
    match phase(window, period_duration, now) {
        WindowPhase::Open => *window,
        WindowPhase::Expired => PeriodWindow::open_at(now),
    }
}
