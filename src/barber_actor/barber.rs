//! The single consumer of the waiting room.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::barber_actor::WaitingRoom;
use crate::framework::{Activity, Actor, DurationRange, Event, EventLog, Pacing, Shutdown};
use crate::model::{BarberState, Client};

/// Duration bounds of the two service phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTimes {
    pub haircut: DurationRange,
    pub finish: DurationRange,
}

/// The barber: sleeps on an empty room, serves clients one at a time otherwise.
pub struct Barber {
    room: Arc<WaitingRoom>,
    pacing: Arc<dyn Pacing>,
    times: ServiceTimes,
    log: EventLog,
    state: BarberState,
}

impl Barber {
    pub fn new(
        room: Arc<WaitingRoom>,
        pacing: Arc<dyn Pacing>,
        times: ServiceTimes,
        log: EventLog,
    ) -> Self {
        Self {
            room,
            pacing,
            times,
            log,
            state: BarberState::default(),
        }
    }

    fn transition(&mut self, state: BarberState) {
        debug!(from = %self.state, to = %state, "Barber transition");
        self.state = state;
    }

    /// Both service phases, the haircut already logged by the room. `None` if stopped midway.
    async fn serve(&self, client: Client, shutdown: &mut Shutdown) -> Option<()> {
        let cutting = self.pacing.draw(Activity::Haircut, self.times.haircut);
        shutdown.interruptible(tokio::time::sleep(cutting)).await?;

        self.log.record(Event::BarberFinishedCutting {
            client: client.name.clone(),
        });
        let finishing = self.pacing.draw(Activity::Finish, self.times.finish);
        shutdown.interruptible(tokio::time::sleep(finishing)).await?;

        self.log.record(Event::BarberDoneWith {
            client: client.name,
        });
        Some(())
    }
}

#[async_trait]
impl Actor for Barber {
    fn name(&self) -> String {
        "Barber".into()
    }

    async fn run(mut self, mut shutdown: Shutdown) {
        info!("Barber open for business");
        loop {
            self.transition(BarberState::Sleeping);
            let Some(wake) = shutdown.interruptible(self.room.sleep_until_woken()).await else {
                break;
            };
            // Wake only ever happens with a client seated, and only we dequeue.
            let Some(client) = shutdown.interruptible(self.room.dequeue()).await else {
                break;
            };
            debug!(?wake, client = %client.name, "Next client");

            self.transition(BarberState::Cutting);
            if self.serve(client, &mut shutdown).await.is_none() {
                break;
            }
        }
        info!(state = %self.state, "Barber closing");
    }
}
