use thiserror::Error;

/// Error type for governor parameter validation issues
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Invalid configuration: {0}")]
    Parse(String),

    #[error("Voting period must be at least one block")]
    ZeroVotingPeriod,

    #[error("Quorum percent {0} exceeds 100")]
    QuorumOutOfRange(u64),
}
