//! Sleeping-barber participants: the bounded waiting room and the barber.

pub mod barber;
pub mod waiting_room;

pub use barber::*;
pub use waiting_room::*;
