use crate::chain::{Address, SimulatedChain};
use crate::config::GovernorParams;
use crate::errors::{GovernanceError, TokenError};
use crate::token::{MintableToken, VoteToken};
use bincode::{decode_from_slice, encode_to_vec, Decode, Encode};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

pub type ProposalId = [u8; 32];

/// Vote choice codes: 0 = against, 1 = for, 2 = abstain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteSupport {
    Against,
    For,
    Abstain,
}

impl VoteSupport {
    pub fn from_code(code: u8) -> Result<Self, GovernanceError> {
        match code {
            0 => Ok(VoteSupport::Against),
            1 => Ok(VoteSupport::For),
            2 => Ok(VoteSupport::Abstain),
            _ => Err(GovernanceError::InvalidVoteType),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            VoteSupport::Against => 0,
            VoteSupport::For => 1,
            VoteSupport::Abstain => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalState {
    Pending,
    Active,
    Succeeded,
    Defeated,
    Executed,
}

/// One call of a proposal payload.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Call {
    pub target: Address,
    pub value: u128,
    pub calldata: Vec<u8>,
}

/// Payload of a governor-authorized mint, carried as encoded calldata
/// inside a `Call`.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct MintCall {
    pub recipient: Address,
    pub amount: u128,
}

impl MintCall {
    pub fn encode(&self) -> Vec<u8> {
        encode_to_vec(self, bincode::config::standard()).unwrap_or_default()
    }

    pub fn decode(calldata: &[u8]) -> Result<Self, TokenError> {
        let (call, read) = decode_from_slice::<MintCall, _>(calldata, bincode::config::standard())
            .map_err(|_| TokenError::InvalidCalldata)?;
        if read != calldata.len() {
            return Err(TokenError::InvalidCalldata);
        }
        Ok(call)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VoteReceipt {
    pub support: VoteSupport,
    pub weight: u64,
}

pub struct Proposal {
    pub id: ProposalId,
    pub proposer: Address,
    pub calls: Vec<Call>,
    pub description_hash: [u8; 32],
    pub vote_start: u64,
    pub vote_end: u64,
    pub for_votes: u64,
    pub against_votes: u64,
    pub abstain_votes: u64,
    pub receipts: HashMap<Address, VoteReceipt>,
    pub executed: bool,
}

impl Proposal {
    /// Weight counted toward quorum. Abstain is excluded.
    pub fn participating_weight(&self) -> u64 {
        self.for_votes + self.against_votes
    }

    /// A proposal succeeds iff participating weight meets quorum and
    /// for-votes strictly exceed against-votes.
    pub fn succeeded(&self, quorum: u64) -> bool {
        self.participating_weight() >= quorum && self.for_votes > self.against_votes
    }
}

/// Token-weighted governor. Proposals are identified by a hash of their
/// calls and description, voting weight is read from the vote token at the
/// proposal's snapshot block, and execution dispatches mint calls to the
/// fungible token with the governor as caller.
pub struct Governor {
    address: Address,
    vote_token: Address,
    params: GovernorParams,
    proposals: HashMap<ProposalId, Proposal>,
}

impl Governor {
    pub fn new(chain: &mut SimulatedChain, vote_token: Address, params: GovernorParams) -> Self {
        Governor {
            address: chain.deploy(),
            vote_token,
            params,
            proposals: HashMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn params(&self) -> &GovernorParams {
        &self.params
    }

    pub fn hash_description(description: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(description.as_bytes());
        hasher.finalize().into()
    }

    /// Derives the proposal id from the call targets, values, calldatas,
    /// and the description hash.
    pub fn hash_proposal(calls: &[Call], description_hash: &[u8; 32]) -> ProposalId {
        let mut hasher = Sha256::new();
        for call in calls {
            hasher.update(call.target.as_bytes());
            hasher.update(call.value.to_be_bytes());
            hasher.update((call.calldata.len() as u64).to_be_bytes());
            hasher.update(&call.calldata);
        }
        hasher.update(description_hash);
        hasher.finalize().into()
    }

    /// Submits a proposal. Voting opens `voting_delay` blocks after the
    /// current block and stays open for `voting_period` blocks.
    pub fn propose(
        &mut self,
        chain: &SimulatedChain,
        proposer: Address,
        calls: Vec<Call>,
        description: &str,
    ) -> Result<ProposalId, GovernanceError> {
        if calls.is_empty() {
            return Err(GovernanceError::EmptyProposal);
        }

        let description_hash = Self::hash_description(description);
        let id = Self::hash_proposal(&calls, &description_hash);
        if self.proposals.contains_key(&id) {
            return Err(GovernanceError::DuplicateProposal);
        }

        let vote_start = chain.height() + self.params.voting_delay;
        let vote_end = vote_start + self.params.voting_period;

        self.proposals.insert(
            id,
            Proposal {
                id,
                proposer,
                calls,
                description_hash,
                vote_start,
                vote_end,
                for_votes: 0,
                against_votes: 0,
                abstain_votes: 0,
                receipts: HashMap::new(),
                executed: false,
            },
        );
        info!(
            "proposal created: id={} proposer={} vote_start={} vote_end={}",
            hex::encode(id),
            proposer,
            vote_start,
            vote_end
        );
        Ok(id)
    }

    /// Lifecycle state of a proposal at the chain's current height.
    pub fn state(
        &self,
        chain: &SimulatedChain,
        vote_token: &VoteToken,
        id: &ProposalId,
    ) -> Result<ProposalState, GovernanceError> {
        debug_assert_eq!(vote_token.address(), self.vote_token);
        let proposal = self
            .proposals
            .get(id)
            .ok_or(GovernanceError::UnknownProposal)?;

        if proposal.executed {
            return Ok(ProposalState::Executed);
        }
        let height = chain.height();
        if height < proposal.vote_start {
            return Ok(ProposalState::Pending);
        }
        if height < proposal.vote_end {
            return Ok(ProposalState::Active);
        }

        let quorum = self.quorum(vote_token, proposal.vote_start);
        if proposal.succeeded(quorum) {
            Ok(ProposalState::Succeeded)
        } else {
            Ok(ProposalState::Defeated)
        }
    }

    /// Minimum participating weight for a proposal snapshotted at `block`.
    pub fn quorum(&self, vote_token: &VoteToken, block: u64) -> u64 {
        vote_token.past_total_supply(block) * self.params.quorum_percent / 100
    }

    /// Casts a vote with the voter's weight at the proposal's snapshot
    /// block. One vote per holder per proposal.
    pub fn cast_vote(
        &mut self,
        chain: &SimulatedChain,
        vote_token: &VoteToken,
        voter: Address,
        id: &ProposalId,
        support_code: u8,
    ) -> Result<u64, GovernanceError> {
        let support = VoteSupport::from_code(support_code)?;
        if self.state(chain, vote_token, id)? != ProposalState::Active {
            return Err(GovernanceError::VoteNotActive);
        }

        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernanceError::UnknownProposal)?;
        if proposal.receipts.contains_key(&voter) {
            return Err(GovernanceError::AlreadyVoted);
        }

        let weight = vote_token.get_past_votes(&voter, proposal.vote_start);
        match support {
            VoteSupport::Against => proposal.against_votes += weight,
            VoteSupport::For => proposal.for_votes += weight,
            VoteSupport::Abstain => proposal.abstain_votes += weight,
        }
        proposal.receipts.insert(voter, VoteReceipt { support, weight });
        debug!(
            "vote cast: id={} voter={} support={} weight={}",
            hex::encode(id),
            voter,
            support.code(),
            weight
        );
        Ok(weight)
    }

    /// Executes a successful proposal, dispatching each mint call to the
    /// fungible token with the governor as caller. Any precondition
    /// failure leaves all token state untouched.
    pub fn execute(
        &mut self,
        chain: &SimulatedChain,
        vote_token: &VoteToken,
        token: &mut MintableToken,
        calls: &[Call],
        description_hash: &[u8; 32],
    ) -> Result<(), GovernanceError> {
        let id = Self::hash_proposal(calls, description_hash);
        if self.state(chain, vote_token, &id)? != ProposalState::Succeeded {
            return Err(GovernanceError::ProposalNotSuccessful);
        }

        // Validate every call before dispatching any; a failed execution
        // must leave token state untouched.
        let mut mints = Vec::with_capacity(calls.len());
        for call in calls {
            if call.target != token.address() {
                return Err(TokenError::UnknownTarget.into());
            }
            mints.push(MintCall::decode(&call.calldata)?);
        }
        for mint in mints {
            token.mint(self.address, mint.recipient, mint.amount)?;
        }

        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownProposal)?;
        proposal.executed = true;
        info!("proposal executed: id={}", hex::encode(id));
        Ok(())
    }
}
