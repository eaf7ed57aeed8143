// Governor configuration
// The voting window and quorum are explicit parameters rather than
// constants buried in the governor, so scenarios can confirm them.

pub mod validation;

pub use validation::ConfigValidationError;

use serde::{Deserialize, Serialize};

pub const DEFAULT_VOTING_DELAY: u64 = 1; // blocks between creation and voting start
pub const DEFAULT_VOTING_PERIOD: u64 = 45_818; // roughly one week of mainnet blocks
pub const DEFAULT_QUORUM_PERCENT: u64 = 5; // percent of token supply that must participate

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernorParams {
    pub voting_delay: u64,
    pub voting_period: u64,
    pub quorum_percent: u64,
}

impl Default for GovernorParams {
    fn default() -> Self {
        GovernorParams {
            voting_delay: DEFAULT_VOTING_DELAY,
            voting_period: DEFAULT_VOTING_PERIOD,
            quorum_percent: DEFAULT_QUORUM_PERCENT,
        }
    }
}

impl GovernorParams {
    /// Loads and validates parameters from a TOML document. Missing keys
    /// fall back to the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigValidationError> {
        let params: GovernorParams =
            toml::from_str(raw).map_err(|err| ConfigValidationError::Parse(err.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.voting_period == 0 {
            return Err(ConfigValidationError::ZeroVotingPeriod);
        }
        if self.quorum_percent > 100 {
            return Err(ConfigValidationError::QuorumOutOfRange(self.quorum_percent));
        }
        Ok(())
    }
}
