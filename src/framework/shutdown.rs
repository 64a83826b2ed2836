//! Stop signal shared by every actor of a simulation.
//!
//! Both simulations run until told to stop. The orchestrator owns a [`ShutdownTrigger`];
//! each actor owns a [`Shutdown`] and races it against every blocking point with
//! [`Shutdown::interruptible`], so a stop request ends each loop at its next suspension.

use std::future::Future;

use tokio::sync::watch;

/// Sending half of the stop signal.
#[derive(Debug)]
pub struct ShutdownTrigger {
    stop_tx: watch::Sender<bool>,
}

/// Receiving half of the stop signal. Clone one per actor.
#[derive(Debug, Clone)]
pub struct Shutdown {
    stop_rx: watch::Receiver<bool>,
}

impl ShutdownTrigger {
    pub fn new() -> (Self, Shutdown) {
        let (stop_tx, stop_rx) = watch::channel(false);
        (Self { stop_tx }, Shutdown { stop_rx })
    }

    pub fn trigger(&self) {
        // send_replace never fails, even with every receiver gone.
        self.stop_tx.send_replace(true);
    }
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// Resolves once a stop was requested or the trigger was dropped.
    pub async fn recv(&mut self) {
        loop {
            if *self.stop_rx.borrow_and_update() {
                return;
            }
            if self.stop_rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Runs `fut` to completion unless a stop is requested first.
    ///
    /// Returns `None` when stopped; `fut` is dropped at its current await point.
    pub async fn interruptible<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.recv() => None,
            output = fut => Some(output),
        }
    }
}
