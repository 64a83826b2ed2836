//! Plain data shared by the actors: client identities and actor states.

pub mod client;
pub mod state;

pub use client::*;
pub use state::*;
