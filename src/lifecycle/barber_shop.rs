use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::barber_actor::{Admission, Barber, WaitingRoom};
use crate::config::ShopConfig;
use crate::framework::{
    join_all, spawn_actor, Activity, Actor, ActorHandle, DurationRange, EventLog, Pacing,
    Shutdown, ShutdownTrigger, SimulationError,
};
use crate::model::Client;

/// The running sleeping-barber simulation.
///
/// `BarberShop` is responsible for:
/// - **Validation**: Rejecting bad parameters before anything starts
/// - **Wiring**: One shared [`WaitingRoom`] between the barber and the arrivals
/// - **Lifecycle**: Starting both actors and stopping them on [`shutdown`](Self::shutdown)
///
/// # Example
///
/// ```ignore
/// let (log, mut events) = EventLog::channel();
/// let mut shop = BarberShop::open(ShopConfig::default(), Arc::new(RandomPacing), log).await?;
/// shop.wait_until_idle().await?;
/// shop.shutdown().await?;
/// ```
pub struct BarberShop {
    room: Arc<WaitingRoom>,
    trigger: ShutdownTrigger,
    barber: ActorHandle,
    /// Taken once the arrival loop has been awaited.
    arrivals: Option<ActorHandle>,
}

impl BarberShop {
    /// Validates `config`, puts the barber to sleep in an empty shop, then lets clients in.
    ///
    /// The barber is asleep before the first client arrives, so every run starts with
    /// "Barber is sleeping" followed by the first client waking the barber.
    pub async fn open(
        config: ShopConfig,
        pacing: Arc<dyn Pacing>,
        log: EventLog,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let room = Arc::new(WaitingRoom::new(config.capacity, log.clone())?);
        let (trigger, shutdown) = ShutdownTrigger::new();

        let barber = spawn_actor(
            Barber::new(room.clone(), pacing.clone(), config.service_times(), log),
            shutdown.clone(),
        );
        room.barber_asleep().await;

        let clients = config.clients.iter().map(Client::new).collect();
        let arrivals = spawn_actor(
            Arrivals {
                clients,
                room: room.clone(),
                pacing,
                interval: config.arrival,
            },
            shutdown,
        );
        info!(capacity = config.capacity, clients = config.clients.len(), "Barbershop open");

        Ok(Self {
            room,
            trigger,
            barber,
            arrivals: Some(arrivals),
        })
    }

    pub fn room(&self) -> &Arc<WaitingRoom> {
        &self.room
    }

    /// Waits until every client has arrived or balked.
    pub async fn arrivals_finished(&mut self) -> Result<(), SimulationError> {
        match self.arrivals.take() {
            Some(arrivals) => arrivals.join().await,
            None => Ok(()),
        }
    }

    /// Waits until every client has arrived and been served, with the barber back asleep.
    pub async fn wait_until_idle(&mut self) -> Result<(), SimulationError> {
        self.arrivals_finished().await?;
        while !self.room.is_idle() {
            self.room.barber_asleep().await;
        }
        Ok(())
    }

    /// Stops the barber (and the arrivals, if still running) and waits for both.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both actors stopped cleanly
    /// - `Err(SimulationError::ActorFailed)` if either task panicked
    pub async fn shutdown(self) -> Result<(), SimulationError> {
        info!("Closing the barbershop...");
        self.trigger.trigger();

        let mut handles = vec![self.barber];
        handles.extend(self.arrivals);
        join_all(handles).await?;

        info!("Barbershop closed.");
        Ok(())
    }
}

/// The producer: walks the client list once, in order.
struct Arrivals {
    clients: Vec<Client>,
    room: Arc<WaitingRoom>,
    pacing: Arc<dyn Pacing>,
    interval: DurationRange,
}

#[async_trait]
impl Actor for Arrivals {
    fn name(&self) -> String {
        "Arrivals".into()
    }

    async fn run(self, mut shutdown: Shutdown) {
        for client in self.clients {
            if shutdown.is_triggered() {
                break;
            }
            // A client who leaves does not delay the next one.
            if self.room.enqueue(client) == Admission::Balked {
                continue;
            }
            let gap = self.pacing.draw(Activity::ClientArrival, self.interval);
            debug!(?gap, "Next arrival");
            if shutdown.interruptible(tokio::time::sleep(gap)).await.is_none() {
                break;
            }
        }
        info!("No more clients");
    }
}
