use tracing::debug;

use crate::consts::{CHECKPOINT_INTERVAL, CONVERGENCE_THRESHOLD};

/// Stopping rule: at every checkpoint the transmission efficiency is compared
/// with the one from the previous checkpoint. The run has converged once both
/// this delta and the previous one are below the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceCheck {
    interval: usize,
    threshold: f32,
    prev_efficiency: f32,
    prev_delta: f32,
}

impl Default for ConvergenceCheck {
    fn default() -> Self {
        Self::new(CHECKPOINT_INTERVAL, CONVERGENCE_THRESHOLD)
    }
}

impl ConvergenceCheck {
    pub fn new(interval: usize, threshold: f32) -> Self {
        Self {
            interval,
            threshold,
            prev_efficiency: 0.000001,
            prev_delta: 1.0,
        }
    }

    pub fn is_checkpoint(&self, slot: usize) -> bool {
        slot != 0 && slot % self.interval == 0
    }

    /// Returns true when the run should stop at `slot`. Slots that are not
    /// checkpoints never converge and leave the state untouched.
    pub fn update(&mut self, slot: usize, transmission_slots: usize) -> bool {
        if !self.is_checkpoint(slot) {
            return false;
        }

        let efficiency = transmission_slots as f32 / slot as f32;
        let delta = (efficiency - self.prev_efficiency).abs();
        debug!(slot, efficiency, delta, "checkpoint");

        if delta < self.threshold && self.prev_delta < self.threshold {
            return true;
        }

        self.prev_efficiency = efficiency;
        self.prev_delta = delta;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_multiples_are_checkpoints() {
        let check = ConvergenceCheck::default();
        assert!(!check.is_checkpoint(0));
        assert!(!check.is_checkpoint(999));
        assert!(check.is_checkpoint(1000));
        assert!(!check.is_checkpoint(1500));
        assert!(check.is_checkpoint(3000));
    }

    #[test]
    fn needs_two_consecutive_small_deltas() {
        let mut check = ConvergenceCheck::default();
        // 0.5 efficiency: big jump from the initial value
        assert!(!check.update(1000, 500));
        // same efficiency, but the previous delta was large
        assert!(!check.update(2000, 1000));
        assert!(check.update(3000, 1500));
    }

    #[test]
    fn a_large_delta_resets_the_streak() {
        let mut check = ConvergenceCheck::default();
        assert!(!check.update(1000, 500));
        assert!(!check.update(2000, 1000));
        // efficiency jumps from 0.5 to 0.6
        assert!(!check.update(3000, 1800));
        // back to a stable value, but previous delta was large
        assert!(!check.update(4000, 2400));
        assert!(check.update(5000, 3000));
    }

    #[test]
    fn non_checkpoint_slots_are_ignored() {
        let mut check = ConvergenceCheck::default();
        let before = check.clone();
        assert!(!check.update(1234, 600));
        assert_eq!(check, before);
    }
}
