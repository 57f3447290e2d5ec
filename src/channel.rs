use serde::Serialize;
use std::fmt;

#[derive(Debug, Hash, Eq, Clone, Copy, PartialEq, Serialize)]
pub enum SlotState {
    Idle,
    Transmission,
    Collision,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotState::Idle => write!(f, "Idle"),
            SlotState::Transmission => write!(f, "Transmission"),
            SlotState::Collision => write!(f, "Collision"),
        }
    }
}

/// The slot timeline of the shared medium. Every slot starts idle and is only
/// ever written by the resolution of a backoff expiry.
pub struct Channel {
    slots: Vec<SlotState>,
}

impl Channel {
    pub fn new(len: usize) -> Channel {
        Channel {
            slots: vec![SlotState::Idle; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn get_state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).copied()
    }

    /// Marks `run_len` slots starting at `start` as busy, clipped to the end of
    /// the timeline. Returns the number of slots written.
    pub fn occupy(&mut self, start: usize, run_len: usize, state: SlotState) -> usize {
        let end = start.saturating_add(run_len).min(self.slots.len());
        if start >= end {
            return 0;
        }
        for slot in &mut self.slots[start..end] {
            *slot = state;
        }
        end - start
    }

    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }
}
