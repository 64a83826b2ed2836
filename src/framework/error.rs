//! Error types shared by both simulations.

use thiserror::Error;

/// Errors raised while validating simulation parameters.
///
/// Every orchestrator validates its configuration before spawning a single actor,
/// so a `ConfigError` always means nothing is running yet.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The waiting room must hold at least one client.
    #[error("Waiting room capacity must be positive")]
    ZeroCapacity,

    /// The barbershop was given no clients to simulate.
    #[error("No clients configured")]
    NoClients,

    /// A dining table needs at least two seats to form a ring.
    #[error("Dining table needs at least 2 philosophers, got {0}")]
    RingTooSmall(usize),

    /// An identity (client or philosopher name) was blank.
    #[error("Blank name in {0}")]
    BlankName(&'static str),

    /// Two philosophers share a name, which makes the event log ambiguous.
    #[error("Duplicate philosopher: {0}")]
    DuplicateName(String),

    /// A duration range has its bounds the wrong way round.
    #[error("Invalid {activity} range: min {min_ms}ms is greater than max {max_ms}ms")]
    InvertedRange {
        activity: &'static str,
        min_ms: u64,
        max_ms: u64,
    },

    /// The configuration file could not be read.
    #[error("Could not read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// The configuration file is not valid TOML for this schema.
    #[error("Malformed config: {0}")]
    Malformed(String),
}

/// Errors surfaced by a running simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An actor task panicked or was aborted.
    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}
