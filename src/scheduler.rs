use std::fmt;
use tracing::{info, trace, warn};

use crate::backoff::{BackoffSource, RandomBackoff};
use crate::channel::{Channel, SlotState};
use crate::config::SimConfig;
use crate::convergence::ConvergenceCheck;
use crate::error::SimError;
use crate::node::{Node, Observation};
use crate::stats::{SimulationReport, SimulationStats};

/// How the backoff expiries of one slot were resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No node expired its backoff.
    Quiet,
    Success { node: usize },
    Collision { nodes: Vec<usize> },
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Quiet => write!(f, "Quiet"),
            Resolution::Success { node } => write!(f, "Success (node {})", node),
            Resolution::Collision { nodes } => write!(f, "Collision ({} nodes)", nodes.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOutcome {
    pub index: usize,
    pub resolution: Resolution,
    /// State the slot was classified with.
    pub state: SlotState,
    pub converged: bool,
}

/// Advances every node one slot at a time over the shared channel.
pub struct Scheduler<S> {
    config: SimConfig,
    channel: Channel,
    node_list: Vec<Node>,
    ready: Vec<usize>,
    stats: SimulationStats,
    convergence: ConvergenceCheck,
    source: S,
    next_slot: usize,
    converged: bool,
}

impl Scheduler<RandomBackoff<rand_chacha::ChaCha8Rng>> {
    /// Engine drawing from `config.seed`, or from the OS when no seed is set.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        let source = match config.seed {
            Some(seed) => RandomBackoff::seeded(seed),
            None => RandomBackoff::from_entropy(),
        };
        Scheduler::new(config, source)
    }
}

impl<S: BackoffSource> Scheduler<S> {
    pub fn new(config: &SimConfig, source: S) -> Result<Self, SimError> {
        config.validate()?;

        let node_list = (0..config.node_count)
            .map(|id| Node::new(id, config.cw_size))
            .collect();

        Ok(Scheduler {
            config: config.clone(),
            channel: Channel::new(config.max_slots),
            node_list,
            ready: Vec::with_capacity(config.node_count),
            stats: SimulationStats::default(),
            convergence: ConvergenceCheck::default(),
            source,
            next_slot: 0,
            converged: false,
        })
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn nodes(&self) -> &[Node] {
        &self.node_list
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Index of the slot the next call to `handle_next_slot` will process.
    pub fn slot_index(&self) -> usize {
        self.next_slot
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Processes one slot: every node observes it, expiries are resolved,
    /// the slot is classified and convergence is checked.
    pub fn handle_next_slot(&mut self) -> Result<SlotOutcome, SimError> {
        let i = self.next_slot;
        let current = self
            .channel
            .get_state(i)
            .ok_or(SimError::NonConvergence {
                slots: self.channel.len(),
            })?;

        // All nodes see the state fixed at slot entry; resolution comes after.
        self.ready.clear();
        for node in self.node_list.iter_mut() {
            if node.observe(current, &mut self.source) == Observation::ReadyToTransmit {
                self.ready.push(node.get_id());
            }
        }

        let resolution = match self.ready.len() {
            0 => Resolution::Quiet,
            1 => {
                let id = self.ready[0];
                self.channel
                    .occupy(i, self.config.pkt_size, SlotState::Transmission);
                self.node_list[id].tx_success();
                self.stats.record_packet();
                Resolution::Success { node: id }
            }
            _ => {
                self.channel
                    .occupy(i, self.config.pkt_size, SlotState::Collision);
                for &id in &self.ready {
                    self.node_list[id].tx_collision();
                }
                Resolution::Collision {
                    nodes: self.ready.clone(),
                }
            }
        };

        let state = self.channel.get_state(i).unwrap_or(current);
        self.stats.record_slot(state);
        if resolution != Resolution::Quiet {
            trace!(slot = i, %state, %resolution, "slot resolved");
        }

        self.converged = self.convergence.update(i, self.stats.transmission_slots);
        self.next_slot = i + 1;

        Ok(SlotOutcome {
            index: i,
            resolution,
            state,
            converged: self.converged,
        })
    }

    /// Runs until convergence. Fails with `NonConvergence` when the slot
    /// timeline runs out first.
    pub fn run(&mut self) -> Result<SimulationReport, SimError> {
        info!(
            pkt_size = self.config.pkt_size,
            node_count = self.config.node_count,
            cw_size = self.config.cw_size,
            "simulation started"
        );

        loop {
            let outcome = match self.handle_next_slot() {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("{}", e);
                    return Err(e);
                }
            };
            if outcome.converged {
                info!(slot = outcome.index, "simulation converged");
                return Ok(self.report(outcome.index));
            }
        }
    }

    fn report(&self, stop_slot: usize) -> SimulationReport {
        SimulationReport::new(
            self.config.clone(),
            self.stats,
            stop_slot,
            self.node_list.iter().map(Node::summary).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_names() {
        assert_eq!(Resolution::Quiet.to_string(), "Quiet");
        assert_eq!(Resolution::Success { node: 4 }.to_string(), "Success (node 4)");
        assert_eq!(
            Resolution::Collision { nodes: vec![1, 2, 7] }.to_string(),
            "Collision (3 nodes)"
        );
    }
}
