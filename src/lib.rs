//! # Sync Sims
//!
//! > **Two classic synchronization problems, run as concurrent actor simulations.**
//!
//! - **Sleeping barber**: a bounded waiting room, one barber who sleeps when it is empty,
//!   and a stream of clients who leave when it is full.
//! - **Dining philosophers**: N philosophers around a ring of N forks, with a waiter
//!   that lets at most N-1 of them reach for forks at once.
//!
//! Both share a shape: a fixed population of actors contending for scarce shared resources
//! under an explicit arbitration policy, observable only through an ordered event log.
//!
//! ## 🏗️ Design
//!
//! ### Actors on Tokio
//! Every participant (the barber, the client arrivals, each philosopher) implements
//! [`Actor`](framework::Actor) and runs in its own Tokio task. Actors never message each
//! other: they share only the synchronization primitives handed to them at construction.
//!
//! ### Explicit shared resources
//! Nothing is global. Orchestrators build the [`WaitingRoom`](barber_actor::WaitingRoom),
//! [`Fork`](philosopher_actor::Fork)s and [`Waiter`](philosopher_actor::Waiter), and pass
//! `Arc`s of them to each actor. Their lifetime is one simulation run.
//!
//! ### Deterministic logical order
//! Durations come from an injectable [`Pacing`](framework::Pacing). With
//! [`ScriptedPacing`](framework::mock::ScriptedPacing) and Tokio's paused clock the event
//! log of a run is fully reproducible.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Plumbing ([`framework`])
//! Actor trait, event log, pacing, stop signal, errors.
//!
//! ### 2. The Orchestrators ([`lifecycle`])
//! [`BarberShop`](lifecycle::BarberShop) and [`DiningTable`](lifecycle::DiningTable):
//! validate, wire, spawn, shut down.
//!
//! ### 3. The Participants ([`barber_actor`], [`philosopher_actor`])
//! The synchronization primitives and the actors that contend for them.
//!
//! ### 4. Parameters ([`config`], [`model`])
//! Construction parameters with the classic defaults, and plain data.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Five clients, three chairs
//! cargo run -- barbershop
//!
//! # Five philosophers, with lifecycle logs on stderr
//! RUST_LOG=info cargo run -- dining
//!
//! # Custom parameters
//! cargo run -- barbershop sims.toml
//! ```

pub mod barber_actor;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod philosopher_actor;
