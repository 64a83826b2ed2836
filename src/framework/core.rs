//! # Core Actor Plumbing
//!
//! Both simulations are populations of long-running actors. This module defines what an
//! actor is and how it is spawned and joined.
//!
//! ## Key Types
//!
//! - [`Actor`]: The trait every simulated participant implements.
//! - [`ActorHandle`]: The join handle an orchestrator keeps for graceful shutdown.
//! - [`spawn_actor`]: Starts an actor in its own Tokio task.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

use crate::framework::{Shutdown, SimulationError};

/// A concurrently running participant of a simulation.
///
/// # Architecture Note
/// Actors never talk to each other directly. Everything they share (waiting room,
/// forks, waiter, event log) is handed to them at construction, so `run` only needs the
/// stop signal. An actor returns from `run` when it observes the stop signal at one of
/// its suspension points.
#[async_trait]
pub trait Actor: Send + 'static {
    /// Identity used for the task span and failure reports.
    fn name(&self) -> String;

    /// The actor's main loop.
    async fn run(self, shutdown: Shutdown);
}

/// Handle to a spawned actor task.
#[derive(Debug)]
pub struct ActorHandle {
    name: String,
    handle: JoinHandle<()>,
}

/// Spawns `actor` in its own Tokio task, inside a span named after it.
pub fn spawn_actor<A: Actor>(actor: A, shutdown: Shutdown) -> ActorHandle {
    let name = actor.name();
    let span = tracing::info_span!("actor", name = %name);
    let handle = tokio::spawn(actor.run(shutdown).instrument(span));
    ActorHandle { name, handle }
}

impl ActorHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waits for the actor task to end.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor left its loop normally
    /// - `Err(SimulationError::ActorFailed)` if the task panicked or was aborted
    pub async fn join(self) -> Result<(), SimulationError> {
        match self.handle.await {
            Ok(()) => {
                info!(actor = %self.name, "Actor stopped");
                Ok(())
            }
            Err(e) => {
                error!(actor = %self.name, "Actor task failed: {:?}", e);
                Err(SimulationError::ActorFailed(format!("{}: {e}", self.name)))
            }
        }
    }
}

/// Joins every handle, reporting the first failure after all of them finished.
pub async fn join_all(handles: Vec<ActorHandle>) -> Result<(), SimulationError> {
    let mut first_failure = None;
    for handle in handles {
        if let Err(e) = handle.join().await {
            first_failure.get_or_insert(e);
        }
    }
    match first_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ShutdownTrigger;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Ticker {
        ticks: Arc<AtomicU32>,
    }

    #[async_trait]
    impl Actor for Ticker {
        fn name(&self) -> String {
            "ticker".into()
        }

        async fn run(self, mut shutdown: Shutdown) {
            while shutdown
                .interruptible(tokio::time::sleep(Duration::from_millis(10)))
                .await
                .is_some()
            {
                self.ticks.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    struct Panicker;

    #[async_trait]
    impl Actor for Panicker {
        fn name(&self) -> String {
            "panicker".into()
        }

        async fn run(self, _shutdown: Shutdown) {
            panic!("boom");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn actor_runs_until_stopped() {
        let ticks = Arc::new(AtomicU32::new(0));
        let (trigger, shutdown) = ShutdownTrigger::new();
        let handle = spawn_actor(
            Ticker {
                ticks: ticks.clone(),
            },
            shutdown,
        );
        assert_eq!(handle.name(), "ticker");

        tokio::time::sleep(Duration::from_millis(55)).await;
        trigger.trigger();
        handle.join().await.unwrap();

        assert_eq!(ticks.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn panicking_actor_is_reported() {
        let (_trigger, shutdown) = ShutdownTrigger::new();
        let handles = vec![spawn_actor(Panicker, shutdown)];
        let err = join_all(handles).await.unwrap_err();
        assert!(matches!(err, SimulationError::ActorFailed(ref msg) if msg.starts_with("panicker")));
    }
}
