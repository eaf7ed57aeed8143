use agora_core::chain::{Address, SimulatedChain};
use agora_core::config::GovernorParams;
use agora_core::errors::GovernanceError;
use agora_core::governance::{Call, Governor, MintCall, ProposalId};
use agora_core::token::{MintableToken, VoteToken};

pub const ONE_WEEK_IN_BLOCKS: u64 = 45_818;
pub const RECEIVER: &str = "0x29D7d1dd5B6f9C864d9db560D72a247c178aE86B";
pub const MINT_AMOUNT: u128 = 1_000 * 10u128.pow(18); // token has 18 decimals
pub const DESCRIPTION: &str = "Proposal 1: Mint 1000 AGT to address";

/// Deployed governance stack with one pending mint proposal, mirroring the
/// standard deploy -> distribute -> delegate -> propose sequence. Vote
/// supply is 100 units: deployer 94, addr1 1, addr2 2, addr3 3; quorum is
/// 5% so 5 participating units are required.
pub struct GovernanceFixture {
    pub chain: SimulatedChain,
    pub vote_token: VoteToken,
    pub governor: Governor,
    pub token: MintableToken,
    pub deployer: Address,
    pub addr1: Address,
    pub addr2: Address,
    pub addr3: Address,
    pub receiver: Address,
    pub calls: Vec<Call>,
    pub description_hash: [u8; 32],
    pub proposal_id: ProposalId,
}

impl GovernanceFixture {
    pub fn deploy() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut chain = SimulatedChain::new();
        let mut vote_token = VoteToken::new(&mut chain);
        let mut governor = Governor::new(
            &mut chain,
            vote_token.address(),
            GovernorParams::default(),
        );
        let token = MintableToken::new(&mut chain, governor.address());

        let deployer = chain.new_account();
        let addr1 = chain.new_account();
        let addr2 = chain.new_account();
        let addr3 = chain.new_account();
        let receiver = Address::from_hex(RECEIVER).expect("receiver address");

        mint_vote_units(&chain, &mut vote_token, deployer, 94);
        mint_vote_units(&chain, &mut vote_token, addr1, 1);
        mint_vote_units(&chain, &mut vote_token, addr2, 2);
        mint_vote_units(&chain, &mut vote_token, addr3, 3);

        // each voter is its own delegate
        vote_token.delegate(&chain, addr1, addr1);
        vote_token.delegate(&chain, addr2, addr2);
        vote_token.delegate(&chain, addr3, addr3);

        let calls = vec![Call {
            target: token.address(),
            value: 0,
            calldata: MintCall {
                recipient: receiver,
                amount: MINT_AMOUNT,
            }
            .encode(),
        }];
        let description_hash = Governor::hash_description(DESCRIPTION);
        let proposal_id = governor
            .propose(&chain, deployer, calls.clone(), DESCRIPTION)
            .expect("proposal creation");

        // one block has to pass before voting opens (voting delay)
        chain.mine_blocks(1);

        GovernanceFixture {
            chain,
            vote_token,
            governor,
            token,
            deployer,
            addr1,
            addr2,
            addr3,
            receiver,
            calls,
            description_hash,
            proposal_id,
        }
    }

    pub fn cast(&mut self, voter: Address, support: u8) -> Result<u64, GovernanceError> {
        self.governor
            .cast_vote(&self.chain, &self.vote_token, voter, &self.proposal_id, support)
    }

    pub fn execute(&mut self) -> Result<(), GovernanceError> {
        self.governor.execute(
            &self.chain,
            &self.vote_token,
            &mut self.token,
            &self.calls,
            &self.description_hash,
        )
    }

    pub fn receiver_balance(&self) -> u128 {
        self.token.balance_of(&self.receiver)
    }
}

fn mint_vote_units(
    chain: &SimulatedChain,
    vote_token: &mut VoteToken,
    to: Address,
    count: u64,
) {
    for _ in 0..count {
        vote_token.safe_mint(chain, to);
    }
}
