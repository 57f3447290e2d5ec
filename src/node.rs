use serde::Serialize;

use crate::backoff::BackoffSource;
use crate::channel::SlotState;

/// Backoff counter of a node. `Undrawn` until the node first counts down
/// after a reset.
#[derive(Debug, Hash, Eq, Clone, Copy, PartialEq)]
pub enum Backoff {
    Undrawn,
    Remaining(u64),
}

/// Result of a node sensing one slot.
#[derive(Debug, Eq, Clone, Copy, PartialEq)]
pub enum Observation {
    ReadyToTransmit,
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: usize,
    pub successes: u64,
    pub collisions: u64,
    pub cw_size: u64,
}

#[derive(Debug, Hash, Eq, Clone, Copy, PartialEq)]
pub struct Node {
    id: usize,
    backoff: Backoff,
    cw: u64,
    prev_state: SlotState,
    num_success: u64,
    num_fail: u64,
}

impl Node {
    pub fn new(id: usize, cw_size: u64) -> Node {
        Node {
            id,
            backoff: Backoff::Undrawn,
            cw: cw_size,
            prev_state: SlotState::Idle,
            num_success: 0,
            num_fail: 0,
        }
    }

    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn get_backoff(&self) -> Backoff {
        self.backoff
    }

    pub fn get_cw(&self) -> u64 {
        self.cw
    }

    pub fn get_prev_state(&self) -> SlotState {
        self.prev_state
    }

    /// (successes, collisions)
    pub fn get_stats(&self) -> (u64, u64) {
        (self.num_success, self.num_fail)
    }

    pub fn summary(&self) -> NodeSummary {
        NodeSummary {
            id: self.id,
            successes: self.num_success,
            collisions: self.num_fail,
            cw_size: self.cw,
        }
    }

    /// Senses the channel for one slot. Only this node's own state is touched.
    pub fn observe<S: BackoffSource + ?Sized>(
        &mut self,
        current: SlotState,
        source: &mut S,
    ) -> Observation {
        match (current, self.prev_state) {
            (SlotState::Idle, SlotState::Idle) => {
                // Idle for a full slot: count down, drawing first if needed.
                let remaining = match self.backoff {
                    Backoff::Undrawn => source.draw(self.cw),
                    Backoff::Remaining(n) => n,
                };
                let remaining = remaining.saturating_sub(1);
                self.backoff = Backoff::Remaining(remaining);
                if remaining == 0 {
                    Observation::ReadyToTransmit
                } else {
                    Observation::NotReady
                }
            }
            (SlotState::Idle, _) => {
                // Channel only just went idle, settle for one slot.
                self.prev_state = SlotState::Idle;
                Observation::NotReady
            }
            (busy, _) => {
                self.prev_state = busy;
                Observation::NotReady
            }
        }
    }

    pub fn tx_success(&mut self) {
        self.num_success += 1;
        self.backoff = Backoff::Undrawn;
    }

    pub fn tx_collision(&mut self) {
        self.num_fail += 1;
        self.cw = self.cw.saturating_mul(2);
        self.backoff = Backoff::Undrawn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<u64>);

    impl BackoffSource for Scripted {
        fn draw(&mut self, cw_size: u64) -> u64 {
            let b = self.0.pop_front().unwrap_or(cw_size);
            assert!(b >= 1 && b <= cw_size);
            b
        }
    }

    fn scripted(draws: &[u64]) -> Scripted {
        Scripted(draws.iter().copied().collect())
    }

    #[test]
    fn counts_down_on_consecutive_idle_slots() {
        let mut node = Node::new(0, 8);
        let mut source = scripted(&[3]);
        assert_eq!(node.observe(SlotState::Idle, &mut source), Observation::NotReady);
        assert_eq!(node.get_backoff(), Backoff::Remaining(2));
        assert_eq!(node.observe(SlotState::Idle, &mut source), Observation::NotReady);
        assert_eq!(
            node.observe(SlotState::Idle, &mut source),
            Observation::ReadyToTransmit
        );
        assert_eq!(node.get_backoff(), Backoff::Remaining(0));
    }

    #[test]
    fn busy_slot_freezes_backoff() {
        let mut node = Node::new(0, 8);
        let mut source = scripted(&[5]);
        node.observe(SlotState::Idle, &mut source);
        assert_eq!(node.get_backoff(), Backoff::Remaining(4));

        node.observe(SlotState::Transmission, &mut source);
        node.observe(SlotState::Collision, &mut source);
        assert_eq!(node.get_backoff(), Backoff::Remaining(4));
        assert_eq!(node.get_prev_state(), SlotState::Collision);
    }

    #[test]
    fn settles_one_slot_after_channel_goes_idle() {
        let mut node = Node::new(0, 8);
        let mut source = scripted(&[5]);
        node.observe(SlotState::Idle, &mut source);
        node.observe(SlotState::Transmission, &mut source);

        // first idle slot after busy: no decrement
        assert_eq!(node.observe(SlotState::Idle, &mut source), Observation::NotReady);
        assert_eq!(node.get_backoff(), Backoff::Remaining(4));
        assert_eq!(node.get_prev_state(), SlotState::Idle);

        node.observe(SlotState::Idle, &mut source);
        assert_eq!(node.get_backoff(), Backoff::Remaining(3));
    }

    #[test]
    fn undrawn_backoff_is_not_drawn_while_settling() {
        let mut node = Node::new(0, 8);
        let mut source = scripted(&[2]);
        node.observe(SlotState::Collision, &mut source);
        node.observe(SlotState::Idle, &mut source);
        assert_eq!(node.get_backoff(), Backoff::Undrawn);
        node.observe(SlotState::Idle, &mut source);
        assert_eq!(node.get_backoff(), Backoff::Remaining(1));
    }

    #[test]
    fn window_of_one_is_ready_on_first_idle_slot() {
        let mut node = Node::new(0, 1);
        let mut source = scripted(&[]);
        assert_eq!(
            node.observe(SlotState::Idle, &mut source),
            Observation::ReadyToTransmit
        );
    }

    #[test]
    fn collisions_double_cw() {
        let mut node = Node::new(3, 16);
        for _ in 0..4 {
            node.tx_collision();
        }
        assert_eq!(node.get_cw(), 16 * 2u64.pow(4));
        node.tx_success();
        assert_eq!(node.get_cw(), 256);
        assert_eq!(node.get_stats(), (1, 4));
        assert_eq!(node.get_backoff(), Backoff::Undrawn);
    }

    #[test]
    fn cw_saturates_instead_of_overflowing() {
        let mut node = Node::new(0, u64::MAX / 2 + 1);
        node.tx_collision();
        node.tx_collision();
        assert_eq!(node.get_cw(), u64::MAX);
    }
}
