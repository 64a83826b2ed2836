//! A philosopher at the table.
//!
//! # Protocol
//!
//! 1. Think, holding nothing.
//! 2. Get a permit from the waiter.
//! 3. Pick up the left fork, then the right fork. Always in that order.
//! 4. Eat.
//! 5. Put down the right fork, then the left fork, then return the permit.
//!
//! Step 2 bounds contenders to N-1 and step 3 fixes a global acquisition order; together
//! they rule out circular wait. Nothing here times out.
//!
//! A stop request may cancel a meal at any point. Held forks and the meal itself log
//! their end when dropped, so a stopped philosopher still leaves a balanced log.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::framework::{Activity, Actor, DurationRange, Event, EventLog, Pacing, Shutdown};
use crate::model::PhilosopherState;
use crate::philosopher_actor::{Fork, ForkGuard, Waiter};

/// Duration bounds of the two timed activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealTimes {
    pub thinking: DurationRange,
    pub eating: DurationRange,
}

pub struct Philosopher {
    name: String,
    left: Arc<Fork>,
    right: Arc<Fork>,
    waiter: Arc<Waiter>,
    pacing: Arc<dyn Pacing>,
    times: MealTimes,
    log: EventLog,
}

impl Philosopher {
    pub fn new(
        name: impl Into<String>,
        left: Arc<Fork>,
        right: Arc<Fork>,
        waiter: Arc<Waiter>,
        pacing: Arc<dyn Pacing>,
        times: MealTimes,
        log: EventLog,
    ) -> Self {
        Self {
            name: name.into(),
            left,
            right,
            waiter,
            pacing,
            times,
            log,
        }
    }

    fn enter(&self, state: PhilosopherState) {
        debug!(philosopher = %self.name, %state, "Philosopher transition");
        let name = self.name.clone();
        self.log.record(match state {
            PhilosopherState::Thinking => Event::PhilosopherThinking { philosopher: name },
            PhilosopherState::Hungry => Event::PhilosopherHungry { philosopher: name },
            PhilosopherState::Eating => Event::PhilosopherEating { philosopher: name },
        });
    }

    async fn think(&self) {
        self.enter(PhilosopherState::Thinking);
        let thinking = self.pacing.draw(Activity::Thinking, self.times.thinking);
        tokio::time::sleep(thinking).await;
    }

    /// Hungry through done eating. Returns `false` if the waiter was closed.
    ///
    /// Cancelling this future drops whatever is held in reverse order of acquisition, and
    /// each release is still logged before it happens.
    async fn eat(&self) -> bool {
        self.enter(PhilosopherState::Hungry);
        let Some(permit) = self.waiter.acquire_permit().await else {
            return false;
        };
        let left = HeldFork::pick_up(&self.left, &self.name, &self.log).await;
        let right = HeldFork::pick_up(&self.right, &self.name, &self.log).await;

        let meal = Meal::start(self);
        let eating = self.pacing.draw(Activity::Eating, self.times.eating);
        tokio::time::sleep(eating).await;

        drop(meal);
        right.put_down();
        left.put_down();
        Waiter::release_permit(permit);
        true
    }
}

/// A fork in a philosopher's hand. Logs the pick-up on creation and the put-down on drop,
/// before the fork itself is released.
struct HeldFork<'a> {
    philosopher: &'a str,
    log: &'a EventLog,
    guard: ForkGuard<'a>,
}

impl<'a> HeldFork<'a> {
    async fn pick_up(fork: &'a Fork, philosopher: &'a str, log: &'a EventLog) -> Self {
        let guard = fork.acquire().await;
        log.record(Event::PickedUpFork {
            philosopher: philosopher.to_owned(),
            fork: guard.index(),
        });
        Self {
            philosopher,
            log,
            guard,
        }
    }

    fn put_down(self) {
        drop(self);
    }
}

impl Drop for HeldFork<'_> {
    fn drop(&mut self) {
        self.log.record(Event::PutDownFork {
            philosopher: self.philosopher.to_owned(),
            fork: self.guard.index(),
        });
    }
}

/// The eating phase. Ends, and is logged as done, when dropped.
struct Meal<'a> {
    philosopher: &'a str,
    log: &'a EventLog,
}

impl<'a> Meal<'a> {
    fn start(philosopher: &'a Philosopher) -> Self {
        philosopher.enter(PhilosopherState::Eating);
        Self {
            philosopher: &philosopher.name,
            log: &philosopher.log,
        }
    }
}

impl Drop for Meal<'_> {
    fn drop(&mut self) {
        self.log.record(Event::PhilosopherDoneEating {
            philosopher: self.philosopher.to_owned(),
        });
    }
}

#[async_trait]
impl Actor for Philosopher {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn run(self, mut shutdown: Shutdown) {
        info!(
            left = self.left.index(),
            right = self.right.index(),
            "Philosopher seated"
        );
        let mut meals = 0u64;
        loop {
            if shutdown.interruptible(self.think()).await.is_none() {
                break;
            }
            match shutdown.interruptible(self.eat()).await {
                Some(true) => meals += 1,
                Some(false) | None => break,
            }
        }
        info!(meals, "Philosopher leaving the table");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::ScriptedPacing;
    use crate::framework::{spawn_actor, ShutdownTrigger};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn stopping_mid_meal_logs_every_release() {
        let (log, mut events) = EventLog::channel();
        let left = Arc::new(Fork::new(0));
        let right = Arc::new(Fork::new(1));
        let waiter = Arc::new(Waiter::new(1));
        let times = MealTimes {
            thinking: DurationRange::from_millis(10, 10),
            eating: DurationRange::from_secs(3600, 3600),
        };
        let kant = Philosopher::new(
            "Kant",
            left.clone(),
            right.clone(),
            waiter.clone(),
            Arc::new(ScriptedPacing::new()),
            times,
            log,
        );
        let (trigger, shutdown) = ShutdownTrigger::new();
        let handle = spawn_actor(kant, shutdown);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(left.is_held() && right.is_held());
        trigger.trigger();
        handle.join().await.unwrap();

        assert!(!left.is_held() && !right.is_held());
        assert_eq!(waiter.held(), 0);
        let name = || "Kant".to_string();
        assert_eq!(
            events.drain(),
            vec![
                Event::PhilosopherThinking { philosopher: name() },
                Event::PhilosopherHungry { philosopher: name() },
                Event::PickedUpFork { philosopher: name(), fork: 0 },
                Event::PickedUpFork { philosopher: name(), fork: 1 },
                Event::PhilosopherEating { philosopher: name() },
                Event::PhilosopherDoneEating { philosopher: name() },
                Event::PutDownFork { philosopher: name(), fork: 1 },
                Event::PutDownFork { philosopher: name(), fork: 0 },
            ]
        );
    }
}
