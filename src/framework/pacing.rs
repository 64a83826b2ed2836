//! # Simulated durations
//!
//! Every timed step in both simulations (client arrivals, the two haircut phases,
//! thinking, eating) asks a [`Pacing`] source how long to take. Production runs use
//! [`RandomPacing`]; tests swap in [`ScriptedPacing`](crate::framework::mock::ScriptedPacing)
//! so that the logical order of events does not depend on a random number generator.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::framework::ConfigError;

/// The timed activities a simulation can ask a [`Pacing`] source about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    /// Gap between two client arrivals at the barbershop.
    ClientArrival,
    /// First service phase: cutting.
    Haircut,
    /// Second service phase: finishing up.
    Finish,
    /// A philosopher thinking, holding nothing.
    Thinking,
    /// A philosopher eating, holding both forks and a permit.
    Eating,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(activity_label(*self))
    }
}

/// Inclusive bounds for a simulated duration, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DurationRange {
    pub const fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub const fn from_secs(min: u64, max: u64) -> Self {
        Self::from_millis(min * 1000, max * 1000)
    }

    pub const fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub const fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    pub fn contains(&self, duration: Duration) -> bool {
        self.min() <= duration && duration <= self.max()
    }

    /// Rejects ranges whose lower bound exceeds the upper bound.
    pub fn validate(&self, activity: Activity) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvertedRange {
                activity: activity_label(activity),
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

fn activity_label(activity: Activity) -> &'static str {
    match activity {
        Activity::ClientArrival => "client arrival",
        Activity::Haircut => "haircut",
        Activity::Finish => "finish",
        Activity::Thinking => "thinking",
        Activity::Eating => "eating",
    }
}

/// Source of simulated durations, shared by every actor of a simulation.
///
/// Implementations must return a duration inside `range`; actors never check.
pub trait Pacing: Send + Sync + 'static {
    fn draw(&self, activity: Activity, range: DurationRange) -> Duration;
}

/// Uniformly random durations over the inclusive range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPacing;

impl Pacing for RandomPacing {
    fn draw(&self, _activity: Activity, range: DurationRange) -> Duration {
        let millis = rand::thread_rng().gen_range(range.min_ms..=range.max_ms);
        Duration::from_millis(millis)
    }
}
