use serde::Serialize;

use crate::channel::SlotState;
use crate::config::SimConfig;
use crate::node::NodeSummary;

/// Running counters of a simulation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub idle_slots: usize,
    pub transmission_slots: usize,
    pub collision_slots: usize,
    /// Successfully transmitted packets.
    pub packet_count: usize,
}

impl SimulationStats {
    pub fn record_slot(&mut self, state: SlotState) {
        match state {
            SlotState::Idle => self.idle_slots += 1,
            SlotState::Transmission => self.transmission_slots += 1,
            SlotState::Collision => self.collision_slots += 1,
        }
    }

    pub fn record_packet(&mut self) {
        self.packet_count += 1;
    }

    /// Number of slots classified so far.
    pub fn slots_classified(&self) -> usize {
        self.idle_slots + self.transmission_slots + self.collision_slots
    }

    /// Packets per classified slot. Never above 1.
    pub fn packets_per_slot(&self) -> f64 {
        ratio(self.packet_count, self.slots_classified())
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Final result of a converged run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub config: SimConfig,
    pub stats: SimulationStats,
    /// Slot index at which convergence was detected.
    pub stop_slot: usize,
    /// Same as `stop_slot`: the stop slot itself is classified but not counted.
    pub slots_used: usize,
    /// `packet_count / slots_used`
    pub throughput: f64,
    /// Fraction of slots carrying a successful transmission.
    pub efficiency: f64,
    pub nodes: Vec<NodeSummary>,
}

impl SimulationReport {
    pub fn new(
        config: SimConfig,
        stats: SimulationStats,
        stop_slot: usize,
        nodes: Vec<NodeSummary>,
    ) -> Self {
        Self {
            config,
            stats,
            stop_slot,
            slots_used: stop_slot,
            throughput: ratio(stats.packet_count, stop_slot),
            efficiency: ratio(stats.transmission_slots, stop_slot),
            nodes,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn print_stats(&self) {
        println!("Idle Slots: {}", self.stats.idle_slots);
        println!("Transmission Slots: {}", self.stats.transmission_slots);
        println!("Collision Slots: {}", self.stats.collision_slots);
        println!("Packets successfully transmitted: {}", self.stats.packet_count);
        println!("Total slots used for simulation: {}", self.slots_used);
        println!("Throughput: {:.6}", self.throughput);
        println!(" {} {:.6}", self.config.cw_size, self.efficiency);
    }

    pub fn print_node_stats(&self) {
        println!("*******************Per-node results*******************");
        for node in &self.nodes {
            let attempts = node.successes + node.collisions;
            println!(
                "node {} prob success: {:.4} (cw {})",
                node.id,
                ratio(node.successes as usize, attempts as usize),
                node.cw_size
            );
        }
        println!("*******************Per-node results*******************");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_slots() {
        let mut stats = SimulationStats::default();
        stats.record_slot(SlotState::Idle);
        stats.record_slot(SlotState::Idle);
        stats.record_slot(SlotState::Transmission);
        stats.record_slot(SlotState::Collision);
        stats.record_packet();
        assert_eq!(stats.idle_slots, 2);
        assert_eq!(stats.transmission_slots, 1);
        assert_eq!(stats.collision_slots, 1);
        assert_eq!(stats.slots_classified(), 4);
        assert_eq!(stats.packets_per_slot(), 0.25);
    }

    #[test]
    fn empty_stats_have_zero_throughput() {
        assert_eq!(SimulationStats::default().packets_per_slot(), 0.0);
    }

    #[test]
    fn report_counts_slots_up_to_stop_index() {
        let stats = SimulationStats {
            idle_slots: 0,
            transmission_slots: 2001,
            collision_slots: 0,
            packet_count: 2001,
        };
        let report = SimulationReport::new(SimConfig::new(1, 1, 1), stats, 2000, Vec::new());
        assert_eq!(report.slots_used, 2000);
        assert_eq!(report.throughput, 2001.0 / 2000.0);
        assert_eq!(report.efficiency, 2001.0 / 2000.0);
        assert_eq!(stats.slots_classified(), report.slots_used + 1);
    }

    #[test]
    fn report_encodes_as_json() {
        let stats = SimulationStats {
            idle_slots: 10,
            transmission_slots: 30,
            collision_slots: 1,
            packet_count: 3,
        };
        let report = SimulationReport::new(SimConfig::new(10, 2, 8), stats, 40, Vec::new());
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["slots_used"], 40);
        assert_eq!(value["stats"]["packet_count"], 3);
        assert_eq!(value["config"]["cw_size"], 8);
        assert_eq!(value["throughput"], 0.075);
    }

    #[test]
    fn report_of_empty_run_has_zero_ratios() {
        let report =
            SimulationReport::new(SimConfig::new(1, 1, 1), SimulationStats::default(), 0, Vec::new());
        assert_eq!(report.throughput, 0.0);
        assert_eq!(report.efficiency, 0.0);
    }
}
