//! Forks: one exclusive-use lock between each pair of neighbours.

use tokio::sync::{Mutex, MutexGuard};

/// A fork on the table. Holds no data; holding its guard is the point.
#[derive(Debug)]
pub struct Fork {
    index: usize,
    lock: Mutex<()>,
}

/// Proof of holding a [`Fork`]. Dropping it puts the fork down.
#[derive(Debug)]
pub struct ForkGuard<'a> {
    index: usize,
    _held: MutexGuard<'a, ()>,
}

impl Fork {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lock: Mutex::new(()),
        }
    }

    /// Position on the table, used in the event log.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Blocks until the fork is free, with no timeout.
    ///
    /// Not reentrant: acquiring a fork you already hold never returns.
    pub async fn acquire(&self) -> ForkGuard<'_> {
        ForkGuard {
            index: self.index,
            _held: self.lock.lock().await,
        }
    }

    pub fn release(guard: ForkGuard<'_>) {
        drop(guard);
    }

    pub fn is_held(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

impl ForkGuard<'_> {
    pub fn index(&self) -> usize {
        self.index
    }
}
