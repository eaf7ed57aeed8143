use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    MintNotAuthorized,
    UnknownTarget,
    InvalidCalldata,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::MintNotAuthorized => write!(f, "Token: mint caller is not the governor"),
            TokenError::UnknownTarget => write!(f, "Token: call target is not this token"),
            TokenError::InvalidCalldata => write!(f, "Token: calldata is not a valid mint call"),
        }
    }
}

impl std::error::Error for TokenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    TokenError(TokenError),
    // Display text is part of the observable contract; tests assert on it
    ProposalNotSuccessful,
    UnknownProposal,
    DuplicateProposal,
    EmptyProposal,
    VoteNotActive,
    AlreadyVoted,
    InvalidVoteType,
}

impl From<TokenError> for GovernanceError {
    fn from(err: TokenError) -> Self {
        GovernanceError::TokenError(err)
    }
}

impl fmt::Display for GovernanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GovernanceError::TokenError(err) => write!(f, "Token error: {}", err),
            GovernanceError::ProposalNotSuccessful => {
                write!(f, "Governor: proposal not successful")
            }
            GovernanceError::UnknownProposal => write!(f, "Governor: unknown proposal id"),
            GovernanceError::DuplicateProposal => write!(f, "Governor: proposal already exists"),
            GovernanceError::EmptyProposal => write!(f, "Governor: empty proposal"),
            GovernanceError::VoteNotActive => write!(f, "Governor: vote not currently active"),
            GovernanceError::AlreadyVoted => write!(f, "Governor: vote already cast"),
            GovernanceError::InvalidVoteType => write!(f, "Governor: invalid vote type"),
        }
    }
}

impl std::error::Error for GovernanceError {}
