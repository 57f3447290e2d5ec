/// Length of the slot timeline. A run that has not converged by then fails.
pub const MAX_SLOT_SIZE: usize = 100_000;

pub const MAX_PKT_SIZE: usize = 100;
pub const MAX_NODE_COUNT: usize = 1000;
pub const MAX_CW_SIZE: u64 = 512;

/// Convergence is evaluated every this many slots.
pub const CHECKPOINT_INTERVAL: usize = 1000;

/// Two consecutive efficiency deltas below this stop the simulation.
pub const CONVERGENCE_THRESHOLD: f32 = 0.0005;

/// Log level (can be overridden with RUST_LOG)
pub const LOG_LEVEL: &str = "info";
