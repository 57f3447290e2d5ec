use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CW_SIZE, MAX_NODE_COUNT, MAX_PKT_SIZE, MAX_SLOT_SIZE};
use crate::error::SimError;

/// Inputs of a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Slots occupied by one transmission or collision.
    pub pkt_size: usize,
    pub node_count: usize,
    /// Initial contention window of every node.
    pub cw_size: u64,
    /// Length of the slot timeline.
    pub max_slots: usize,
    /// Fixed seed for the backoff draws; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(pkt_size: usize, node_count: usize, cw_size: u64) -> SimConfig {
        SimConfig {
            pkt_size,
            node_count,
            cw_size,
            max_slots: MAX_SLOT_SIZE,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> SimConfig {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_slots(mut self, max_slots: usize) -> SimConfig {
        self.max_slots = max_slots;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check("pkt_size", self.pkt_size as u64, MAX_PKT_SIZE as u64)?;
        check("node_count", self.node_count as u64, MAX_NODE_COUNT as u64)?;
        check("cw_size", self.cw_size, MAX_CW_SIZE)?;
        check("max_slots", self.max_slots as u64, MAX_SLOT_SIZE as u64)?;
        Ok(())
    }
}

fn check(parameter: &'static str, value: u64, max: u64) -> Result<(), SimError> {
    if value == 0 {
        return Err(SimError::ZeroParameter { parameter });
    }
    if value > max {
        return Err(SimError::BoundExceeded {
            parameter,
            value,
            max,
        });
    }
    Ok(())
}
