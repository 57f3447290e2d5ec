#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("simulation failed to converge within {slots} slots")]
    NonConvergence { slots: usize },

    #[error("{parameter} = {value} exceeds the maximum of {max}")]
    BoundExceeded {
        parameter: &'static str,
        value: u64,
        max: u64,
    },

    #[error("{parameter} must be positive")]
    ZeroParameter { parameter: &'static str },
}
