//! # Waiting room
//!
//! A bounded FIFO of [`Client`]s plus the "barber awake" bell, both behind one mutex so
//! that every check-then-act (full? empty? barber asleep?) is atomic with the mutation
//! it guards.
//!
//! ## The bell
//!
//! `barber_awake` is cleared only by the barber, and only when it is about to block on
//! an empty room. A client sets it, and rings, exactly when it enters an empty room
//! while the flag is clear. The barber registers for the ring while still holding the
//! mutex, so a ring can never slip in between "decide to sleep" and "start sleeping".
//!
//! Rings use `Notify::notify_waiters`, which stores no permit: a ring with nobody
//! asleep is lost, which is fine because the flag already tells the barber not to sleep.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::debug;

use crate::framework::{ConfigError, Event, EventLog};
use crate::model::Client;

/// Outcome of a client's arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Room was full; the client left.
    Balked,
    /// Seated behind others, or the barber was already awake.
    Waiting,
    /// Seated in an empty room and woke the sleeping barber.
    WokeBarber,
}

/// How the barber left [`WaitingRoom::sleep_until_woken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Clients were already waiting, so the barber never fell asleep.
    ClientsWaiting,
    /// Slept, and a client rang the bell.
    Rung,
}

#[derive(Debug, Default)]
struct RoomState {
    queue: VecDeque<Client>,
    barber_awake: bool,
}

#[derive(Debug)]
pub struct WaitingRoom {
    capacity: usize,
    state: Mutex<RoomState>,
    /// The bell: rung on the empty→non-empty edge while the barber sleeps.
    bell: Notify,
    /// Rung on every admission, for whoever blocks in `dequeue`.
    arrival: Notify,
    /// Permit left each time the barber falls asleep.
    asleep: Notify,
    log: EventLog,
}

impl WaitingRoom {
    /// Creates an empty room with the barber asleep.
    pub fn new(capacity: usize, log: EventLog) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            state: Mutex::new(RoomState::default()),
            bell: Notify::new(),
            arrival: Notify::new(),
            asleep: Notify::new(),
            log,
        })
    }

    fn state(&self) -> MutexGuard<'_, RoomState> {
        // Critical sections never panic midway, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.state().queue.len() >= self.capacity
    }

    /// True when nobody waits and the barber is asleep.
    pub fn is_idle(&self) -> bool {
        let state = self.state();
        state.queue.is_empty() && !state.barber_awake
    }

    /// A client walks in. Never blocks.
    ///
    /// Balks when the room is at capacity. Rings the bell when the room was empty and the
    /// barber asleep. Each outcome is logged under the room lock.
    pub fn enqueue(&self, client: Client) -> Admission {
        let mut state = self.state();
        if state.queue.len() >= self.capacity {
            self.log.record(Event::ClientBalks {
                client: client.name,
            });
            return Admission::Balked;
        }

        let wakes_barber = state.queue.is_empty() && !state.barber_awake;
        if wakes_barber {
            state.barber_awake = true;
            self.log.record(Event::ClientWakesBarber {
                client: client.name.clone(),
            });
        }
        self.log.record(Event::ClientWaits {
            client: client.name.clone(),
        });
        state.queue.push_back(client);
        debug!(occupancy = state.queue.len(), capacity = self.capacity, "Client seated");

        self.arrival.notify_waiters();
        if wakes_barber {
            self.bell.notify_waiters();
            Admission::WokeBarber
        } else {
            Admission::Waiting
        }
    }

    /// Removes the longest-waiting client, blocking while the room is empty.
    ///
    /// The client goes straight into the barber's chair: the start of the haircut is
    /// logged here, under the room lock, so occupancy replayed from the log always matches
    /// the real queue.
    pub async fn dequeue(&self) -> Client {
        loop {
            let arrived = self.arrival.notified();
            tokio::pin!(arrived);
            {
                let mut state = self.state();
                if let Some(client) = state.queue.pop_front() {
                    self.log.record(Event::BarberCutting {
                        client: client.name.clone(),
                    });
                    return client;
                }
                arrived.as_mut().enable();
            }
            arrived.await;
        }
    }

    /// The barber's sleeping state.
    ///
    /// With clients already waiting the barber stays awake and returns at once.
    /// Otherwise clears the bell, logs the barber asleep and blocks until a client rings.
    pub async fn sleep_until_woken(&self) -> Wake {
        let rung = self.bell.notified();
        tokio::pin!(rung);
        {
            let mut state = self.state();
            if !state.queue.is_empty() {
                state.barber_awake = true;
                return Wake::ClientsWaiting;
            }
            state.barber_awake = false;
            self.log.record(Event::BarberSleeps);
            rung.as_mut().enable();
        }
        self.asleep.notify_one();
        rung.await;
        self.log.record(Event::BarberWakes);
        Wake::Rung
    }

    /// Waits for a report that the barber fell asleep.
    ///
    /// The report may be from an earlier sleep than the current one; pair it with
    /// [`is_idle`](Self::is_idle) when the current state matters.
    pub async fn barber_asleep(&self) {
        self.asleep.notified().await;
    }
}
