use std::sync::Arc;

use tracing::info;

use crate::config::TableConfig;
use crate::framework::{
    join_all, spawn_actor, ActorHandle, EventLog, Pacing, ShutdownTrigger, SimulationError,
};
use crate::philosopher_actor::{Fork, Philosopher, Waiter};

/// The running dining-philosophers simulation.
///
/// Seat `i` gets fork `i` on its left and fork `(i + 1) % N` on its right, so each fork
/// sits between exactly two neighbours. The waiter hands out `N - 1` permits.
pub struct DiningTable {
    forks: Vec<Arc<Fork>>,
    waiter: Arc<Waiter>,
    trigger: ShutdownTrigger,
    philosophers: Vec<ActorHandle>,
}

impl DiningTable {
    /// Validates `config`, lays the table and starts every philosopher thinking.
    pub fn seat(
        config: TableConfig,
        pacing: Arc<dyn Pacing>,
        log: EventLog,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let seats = config.philosophers.len();
        let waiter = Arc::new(Waiter::for_table(seats)?);
        let forks: Vec<Arc<Fork>> = (0..seats).map(|i| Arc::new(Fork::new(i))).collect();
        let (trigger, shutdown) = ShutdownTrigger::new();

        let times = config.meal_times();
        let philosophers = config
            .philosophers
            .into_iter()
            .zip(forks.iter().zip(forks.iter().cycle().skip(1)))
            .map(|(name, (left, right))| {
                let philosopher = Philosopher::new(
                    name,
                    left.clone(),
                    right.clone(),
                    waiter.clone(),
                    pacing.clone(),
                    times,
                    log.clone(),
                );
                spawn_actor(philosopher, shutdown.clone())
            })
            .collect();
        info!(seats, permits = waiter.capacity(), "Table laid");

        Ok(Self {
            forks,
            waiter,
            trigger,
            philosophers,
        })
    }

    pub fn seats(&self) -> usize {
        self.forks.len()
    }

    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    pub fn forks(&self) -> &[Arc<Fork>] {
        &self.forks
    }

    /// Stops every philosopher and waits for all of them.
    pub async fn shutdown(self) -> Result<(), SimulationError> {
        info!("Clearing the table...");
        self.trigger.trigger();
        self.waiter.close();
        join_all(self.philosophers).await?;
        info!("Table cleared.");
        Ok(())
    }
}
