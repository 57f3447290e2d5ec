use tracing::info;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::scheduler::Scheduler;
use crate::stats::SimulationReport;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub cw_size: u64,
    pub outcome: Result<SimulationReport, SimError>,
}

impl SweepPoint {
    pub fn efficiency(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|r| r.efficiency)
    }
}

/// `start, 2 * start, 4 * start, ...` up to and including `end`.
pub fn doubling_cw_sizes(start: u64, end: u64) -> Vec<u64> {
    let mut sizes = Vec::new();
    let mut cw = start.max(1);
    while cw <= end {
        sizes.push(cw);
        cw = match cw.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    sizes
}

/// Runs one independent simulation per contention window size. Points that
/// fail keep their error so the rest of the sweep still runs.
pub fn run_cw_sweep(base: &SimConfig, cw_sizes: &[u64]) -> Vec<SweepPoint> {
    cw_sizes
        .iter()
        .map(|&cw_size| {
            let config = SimConfig {
                cw_size,
                ..base.clone()
            };
            info!(cw_size, "sweep point");
            let outcome = Scheduler::from_config(&config).and_then(|mut s| s.run());
            SweepPoint { cw_size, outcome }
        })
        .collect()
}
