//! State machines of the two kinds of long-running actors.

use std::fmt;

/// The barber alternates between these two states forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarberState {
    /// Blocked until a client rings the bell. Initial state.
    #[default]
    Sleeping,
    /// Serving exactly one client.
    Cutting,
}

/// Thinking → Hungry → Eating → Thinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhilosopherState {
    /// Holding nothing. Initial state.
    #[default]
    Thinking,
    /// Waiting for a permit, then the left fork, then the right fork.
    Hungry,
    /// Holding a permit and both forks.
    Eating,
}

impl fmt::Display for BarberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sleeping => f.write_str("sleeping"),
            Self::Cutting => f.write_str("cutting"),
        }
    }
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thinking => f.write_str("thinking"),
            Self::Hungry => f.write_str("hungry"),
            Self::Eating => f.write_str("eating"),
        }
    }
}
