pub mod mintable;
pub mod vote_token;

pub use mintable::MintableToken;
pub use vote_token::VoteToken;
