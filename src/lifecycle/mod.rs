//! # Orchestration
//!
//! Actors don't exist in a vacuum. Each simulation has one orchestrator that validates
//! its parameters, builds the shared resources, injects them into freshly spawned actors
//! and owns the stop signal.
//!
//! - [`BarberShop`]: the sleeping barber
//! - [`DiningTable`]: the dining philosophers
//! - [`tracing::setup_tracing`]: diagnostics for the binary

pub mod barber_shop;
pub mod dining_table;
pub mod tracing;

pub use barber_shop::BarberShop;
pub use dining_table::DiningTable;
