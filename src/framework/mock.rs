//! # Mock Pacing
//!
//! Utilities for running simulations without random timing.
//!
//! Use [`ScriptedPacing`] to decide, per [`Activity`], exactly which durations the actors
//! will draw, in order. Scripted durations are clamped into the requested range.
//! Activities without a script (or whose script ran out) take the lower bound of their
//! range, so `ScriptedPacing::new()` alone is a "fixed minimum" pacing.
//!
//! Combined with Tokio's paused clock (`#[tokio::test(start_paused = true)]`), a scripted
//! run produces the same event log every time.
//!
//! # Example
//! ```ignore
//! let pacing = ScriptedPacing::new()
//!     .script(Activity::ClientArrival, [Duration::from_secs(1)])
//!     .script(Activity::Haircut, [Duration::from_secs(5)]);
//! let shop = BarberShop::open(config, Arc::new(pacing), log).await?;
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::framework::{Activity, DurationRange, Pacing};

/// Pacing that replays scripted durations per activity.
#[derive(Debug, Default)]
pub struct ScriptedPacing {
    scripts: Mutex<HashMap<Activity, VecDeque<Duration>>>,
}

impl ScriptedPacing {
    /// Creates a pacing with no scripts: every draw returns the range minimum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues durations for `activity`, consumed one per draw.
    pub fn script(self, activity: Activity, durations: impl IntoIterator<Item = Duration>) -> Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(activity)
            .or_default()
            .extend(durations);
        self
    }

    /// Durations still queued for `activity`.
    pub fn remaining(&self, activity: Activity) -> usize {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&activity)
            .map_or(0, VecDeque::len)
    }
}

impl Pacing for ScriptedPacing {
    fn draw(&self, activity: Activity, range: DurationRange) -> Duration {
        let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        scripts
            .get_mut(&activity)
            .and_then(VecDeque::pop_front)
            .map_or(range.min(), |scripted| scripted.clamp(range.min(), range.max()))
    }
}
