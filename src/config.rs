//! # Configuration
//!
//! Construction parameters for both simulations, with defaults reproducing the classic
//! demo: five clients in a three-chair shop, five philosophers around one table.
//!
//! A TOML file may override any field; missing fields keep their defaults.
//!
//! ```toml
//! [barbershop]
//! clients = ["Alice", "Bob", "Charlie"]
//! capacity = 1
//! haircut = { min_ms = 500, max_ms = 1500 }
//!
//! [dining]
//! philosophers = ["Kant", "Hume", "Locke"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::barber_actor::ServiceTimes;
use crate::framework::{Activity, ConfigError, DurationRange};
use crate::philosopher_actor::MealTimes;

pub const DEFAULT_CAPACITY: usize = 3;

/// Parameters of the sleeping-barber simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    /// Arrival order of the clients.
    pub clients: Vec<String>,
    /// Chairs in the waiting room.
    pub capacity: usize,
    /// Gap after a seated client before the next one arrives.
    pub arrival: DurationRange,
    pub haircut: DurationRange,
    pub finish: DurationRange,
    /// Let the binary stop once every client has been handled.
    pub stop_when_drained: bool,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            clients: ["Alice", "Bob", "Charlie", "David", "Eve"]
                .map(String::from)
                .to_vec(),
            capacity: DEFAULT_CAPACITY,
            arrival: DurationRange::from_secs(1, 3),
            haircut: DurationRange::from_secs(1, 3),
            finish: DurationRange::from_secs(1, 3),
            stop_when_drained: false,
        }
    }
}

impl ShopConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.clients.is_empty() {
            return Err(ConfigError::NoClients);
        }
        if self.clients.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::BlankName("clients"));
        }
        self.arrival.validate(Activity::ClientArrival)?;
        self.haircut.validate(Activity::Haircut)?;
        self.finish.validate(Activity::Finish)
    }

    pub fn service_times(&self) -> ServiceTimes {
        ServiceTimes {
            haircut: self.haircut,
            finish: self.finish,
        }
    }
}

/// Parameters of the dining-philosophers simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Seating order around the ring.
    pub philosophers: Vec<String>,
    pub thinking: DurationRange,
    pub eating: DurationRange,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            philosophers: ["Kant", "Hume", "Descartes", "Locke", "Leibniz"]
                .map(String::from)
                .to_vec(),
            thinking: DurationRange::from_secs(2, 4),
            eating: DurationRange::from_secs(1, 3),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.philosophers.len() < 2 {
            return Err(ConfigError::RingTooSmall(self.philosophers.len()));
        }
        let mut seen = HashSet::new();
        for name in &self.philosophers {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankName("philosophers"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
        }
        self.thinking.validate(Activity::Thinking)?;
        self.eating.validate(Activity::Eating)
    }

    pub fn meal_times(&self) -> MealTimes {
        MealTimes {
            thinking: self.thinking,
            eating: self.eating,
        }
    }
}

/// Both simulations' parameters, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub barbershop: ShopConfig,
    pub dining: TableConfig,
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}
