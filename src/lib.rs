pub mod chain;
pub mod config;
pub mod errors;
pub mod governance;
pub mod token;

// Re-export commonly used items
pub use chain::{Address, SimulatedChain};
pub use config::GovernorParams;
pub use errors::{GovernanceError, TokenError};
pub use governance::{Call, Governor, MintCall, ProposalState, VoteSupport};
pub use token::{MintableToken, VoteToken};
