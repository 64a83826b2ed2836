//! Generic simulation plumbing shared by the barbershop and the dining table.
//!
//! # Main Components
//!
//! - [`Actor`] / [`spawn_actor`] - How participants run as Tokio tasks
//! - [`EventLog`] / [`EventStream`] - The ordered, observable output of a run
//! - [`Pacing`] - Where simulated durations come from
//! - [`Shutdown`] / [`ShutdownTrigger`] - The external stop signal
//! - [`ConfigError`] / [`SimulationError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for deterministic pacing.

pub mod core;
pub mod error;
pub mod event;
pub mod mock;
pub mod pacing;
pub mod shutdown;

// Re-export core types for convenience
pub use self::core::*;
pub use error::*;
pub use event::*;
pub use pacing::*;
pub use shutdown::*;
