//! # Event log
//!
//! The only observable output of a simulation: an ordered, timestamp-free sequence of
//! [`Event`]s, one line each when displayed.
//!
//! [`EventLog`] is the cheap, cloneable write half handed to every actor. [`EventStream`]
//! is the single read half owned by whoever prints or inspects the run.
//!
//! ## Ordering
//!
//! The log is a single unbounded `mpsc` channel, so events appear in the order their
//! `record` calls completed. Actors record "acquired" events after taking a resource and
//! "released" events before letting it go, which means the log never shows two holders of
//! the same resource overlapping unless they really did.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Everything either simulation can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Arrived to a full waiting room and left the shop.
    ClientBalks { client: String },
    /// Took a seat in the waiting room.
    ClientWaits { client: String },
    /// Arrived to an empty room with the barber asleep, and rang the bell.
    ClientWakesBarber { client: String },
    BarberSleeps,
    BarberWakes,
    /// First service phase started.
    BarberCutting { client: String },
    /// First service phase finished, finishing phase started.
    BarberFinishedCutting { client: String },
    /// Client served and gone.
    BarberDoneWith { client: String },

    PhilosopherThinking { philosopher: String },
    /// Waiting for the waiter's permit, then for the forks.
    PhilosopherHungry { philosopher: String },
    PickedUpFork { philosopher: String, fork: usize },
    PutDownFork { philosopher: String, fork: usize },
    PhilosopherEating { philosopher: String },
    PhilosopherDoneEating { philosopher: String },
}

impl Event {
    /// The identity of the actor this event is about.
    pub fn actor(&self) -> &str {
        match self {
            Self::ClientBalks { client }
            | Self::ClientWaits { client }
            | Self::ClientWakesBarber { client } => client,
            Self::BarberSleeps
            | Self::BarberWakes
            | Self::BarberCutting { .. }
            | Self::BarberFinishedCutting { .. }
            | Self::BarberDoneWith { .. } => "Barber",
            Self::PhilosopherThinking { philosopher }
            | Self::PhilosopherHungry { philosopher }
            | Self::PickedUpFork { philosopher, .. }
            | Self::PutDownFork { philosopher, .. }
            | Self::PhilosopherEating { philosopher }
            | Self::PhilosopherDoneEating { philosopher } => philosopher,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientBalks { client } => write!(f, "{client} left the shop"),
            Self::ClientWaits { client } => write!(f, "{client} is waiting"),
            Self::ClientWakesBarber { client } => write!(f, "{client} woke up the barber"),
            Self::BarberSleeps => f.write_str("Barber is sleeping"),
            Self::BarberWakes => f.write_str("Barber woke up"),
            Self::BarberCutting { client } => write!(f, "Barber is cutting {client}"),
            Self::BarberFinishedCutting { client } => {
                write!(f, "Barber finished cutting {client}")
            }
            Self::BarberDoneWith { client } => write!(f, "Barber is done with {client}"),
            Self::PhilosopherThinking { philosopher } => write!(f, "{philosopher}: is thinking"),
            Self::PhilosopherHungry { philosopher } => {
                write!(f, "{philosopher}: waiting for the waiter")
            }
            Self::PickedUpFork { philosopher, fork } => {
                write!(f, "{philosopher}: picked up fork {fork}")
            }
            Self::PutDownFork { philosopher, fork } => {
                write!(f, "{philosopher}: put down fork {fork}")
            }
            Self::PhilosopherEating { philosopher } => write!(f, "{philosopher}: is dining"),
            Self::PhilosopherDoneEating { philosopher } => {
                write!(f, "{philosopher}: is done dining")
            }
        }
    }
}

/// Write half of the event log.
#[derive(Debug, Clone)]
pub struct EventLog {
    sender: mpsc::UnboundedSender<Event>,
}

/// Read half of the event log.
#[derive(Debug)]
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventLog {
    pub fn channel() -> (EventLog, EventStream) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (EventLog { sender }, EventStream { receiver })
    }

    /// Appends an event. Never blocks.
    pub fn record(&self, event: Event) {
        debug!(actor = event.actor(), "{event}");
        if self.sender.send(event).is_err() {
            // Nobody is reading anymore; the simulation keeps its semantics regardless.
            trace!("Event stream closed, event dropped");
        }
    }
}

impl EventStream {
    /// Next event, or `None` once every [`EventLog`] handle has been dropped.
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Everything recorded so far, without waiting.
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_actor_identity() {
        let event = Event::ClientWakesBarber {
            client: "Alice".into(),
        };
        assert_eq!(event.to_string(), "Alice woke up the barber");
        assert_eq!(event.actor(), "Alice");

        let event = Event::PickedUpFork {
            philosopher: "Kant".into(),
            fork: 4,
        };
        assert_eq!(event.to_string(), "Kant: picked up fork 4");
        assert_eq!(event.actor(), "Kant");

        assert_eq!(Event::BarberSleeps.actor(), "Barber");
    }

    #[tokio::test]
    async fn drain_preserves_record_order() {
        let (log, mut stream) = EventLog::channel();
        let other = log.clone();
        log.record(Event::BarberSleeps);
        other.record(Event::ClientWaits {
            client: "Bob".into(),
        });
        log.record(Event::BarberWakes);

        assert_eq!(
            stream.drain(),
            vec![
                Event::BarberSleeps,
                Event::ClientWaits {
                    client: "Bob".into()
                },
                Event::BarberWakes,
            ]
        );
        assert!(stream.drain().is_empty());
    }

    #[tokio::test]
    async fn stream_ends_when_all_writers_drop() {
        let (log, mut stream) = EventLog::channel();
        log.record(Event::BarberSleeps);
        drop(log);
        assert_eq!(stream.recv().await, Some(Event::BarberSleeps));
        assert_eq!(stream.recv().await, None);
    }
}
