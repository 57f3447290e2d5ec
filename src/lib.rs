//! Slotted CSMA/CA (802.11 DCF) channel simulator.
//!
//! A fixed population of nodes contends for one shared medium. Each slot every
//! node senses the channel and counts down its backoff; a single expiry is a
//! successful transmission, several expiries in the same slot are a collision
//! that doubles the contention window of every node involved. The run stops
//! once transmission efficiency has stabilised.

pub mod backoff;
pub mod channel;
pub mod config;
pub mod consts;
pub mod convergence;
pub mod error;
pub mod logging;
pub mod node;
pub mod scheduler;
pub mod stats;
pub mod sweep;

pub use backoff::{BackoffSource, RandomBackoff};
pub use channel::{Channel, SlotState};
pub use config::SimConfig;
pub use error::SimError;
pub use node::{Backoff, Node, NodeSummary, Observation};
pub use scheduler::{Resolution, Scheduler, SlotOutcome};
pub use stats::{SimulationReport, SimulationStats};
