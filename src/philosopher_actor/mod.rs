//! Dining-philosophers participants: forks, the waiter and the philosophers.

pub mod fork;
pub mod philosopher;
pub mod waiter;

pub use fork::*;
pub use philosopher::*;
pub use waiter::*;
