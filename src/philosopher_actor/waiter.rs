//! The waiter: a counting permit pool that seats at most N-1 philosophers at the forks.
//!
//! With N forks and at most N-1 philosophers reaching for them, at least one of them can
//! always get both forks, so the all-holding-left circular wait cannot form.

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::framework::ConfigError;

#[derive(Debug)]
pub struct Waiter {
    capacity: usize,
    permits: Semaphore,
}

/// One seat at the forks. Dropping it returns the permit.
#[derive(Debug)]
pub struct Permit<'a> {
    _permit: SemaphorePermit<'a>,
}

impl Waiter {
    /// A waiter bounding concurrent attempts to `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            permits: Semaphore::new(capacity),
        }
    }

    /// The waiter for a ring of `seats` philosophers: `seats - 1` permits.
    pub fn for_table(seats: usize) -> Result<Self, ConfigError> {
        if seats < 2 {
            return Err(ConfigError::RingTooSmall(seats));
        }
        Ok(Self::new(seats - 1))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently handed out.
    pub fn held(&self) -> usize {
        self.capacity.saturating_sub(self.permits.available_permits())
    }

    /// Blocks while every permit is held. `None` once the waiter was closed.
    pub async fn acquire_permit(&self) -> Option<Permit<'_>> {
        self.permits
            .acquire()
            .await
            .ok()
            .map(|permit| Permit { _permit: permit })
    }

    pub fn release_permit(permit: Permit<'_>) {
        drop(permit);
    }

    /// Refuses all further permits and wakes everyone still waiting for one.
    pub fn close(&self) {
        self.permits.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn ring_needs_two_seats() {
        assert_eq!(Waiter::for_table(1).unwrap_err(), ConfigError::RingTooSmall(1));
        assert_eq!(Waiter::for_table(5).unwrap().capacity(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn blocks_after_n_minus_one_permits() {
        let waiter = Arc::new(Waiter::for_table(3).unwrap());
        let first = waiter.acquire_permit().await.unwrap();
        let _second = waiter.acquire_permit().await.unwrap();
        assert_eq!(waiter.held(), 2);

        let third = tokio::spawn({
            let waiter = waiter.clone();
            async move { waiter.acquire_permit().await.is_some() }
        });
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!third.is_finished());

        Waiter::release_permit(first);
        assert!(third.await.unwrap());
    }

    #[tokio::test]
    async fn close_wakes_waiting_philosophers() {
        let waiter = Arc::new(Waiter::new(1));
        let held = waiter.acquire_permit().await.unwrap();

        let blocked = tokio::spawn({
            let waiter = waiter.clone();
            async move { waiter.acquire_permit().await.is_none() }
        });
        tokio::task::yield_now().await;
        waiter.close();

        assert!(blocked.await.unwrap());
        drop(held);
    }
}
