//! # Observability & Tracing
//!
//! Diagnostics are separate from the simulation's event log. The event log is the
//! simulation's output and the binary prints it on stdout; `tracing` output goes to stderr
//! and is filtered with `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: start, stop and task failures, each inside an `actor{name=..}` span
//! - **State transitions**: barber and philosopher states at `debug`
//! - **Events**: every event-log line is mirrored at `debug` with its actor
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle only
//! RUST_LOG=info cargo run -- dining
//!
//! # Every transition and event
//! RUST_LOG=debug cargo run -- barbershop
//!
//! # Filter to one module
//! RUST_LOG=sync_sims::barber_actor=debug cargo run -- barbershop
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false) // Actor spans already say who is talking
        .compact() // Compact format shows spans inline (e.g., "actor{name=Kant}")
        .init();
}
