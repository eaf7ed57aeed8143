use crate::chain::{Address, SimulatedChain};
use log::debug;
use std::collections::HashMap;

/// Voting weight of an account as of a given block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub from_block: u64,
    pub votes: u64,
}

/// Non-fungible vote token. Each token is one unit of voting weight, and a
/// holder's weight only counts once it has been delegated (self-delegation
/// included). Weight history is checkpointed per delegate so the governor
/// can read voting power as of a proposal's snapshot block.
pub struct VoteToken {
    address: Address,
    next_token_id: u64,
    owners: HashMap<u64, Address>,
    balances: HashMap<Address, u64>,
    delegates: HashMap<Address, Address>,
    checkpoints: HashMap<Address, Vec<Checkpoint>>,
    supply_checkpoints: Vec<Checkpoint>,
}

impl VoteToken {
    pub fn new(chain: &mut SimulatedChain) -> Self {
        VoteToken {
            address: chain.deploy(),
            next_token_id: 0,
            owners: HashMap::new(),
            balances: HashMap::new(),
            delegates: HashMap::new(),
            checkpoints: HashMap::new(),
            supply_checkpoints: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Mints the next token id to `to`. If the recipient has already chosen
    /// a delegate, that delegate's weight is checkpointed at the current
    /// block.
    pub fn safe_mint(&mut self, chain: &SimulatedChain, to: Address) -> u64 {
        let token_id = self.next_token_id;
        self.next_token_id += 1;

        self.owners.insert(token_id, to);
        *self.balances.entry(to).or_insert(0) += 1;

        push_checkpoint(
            &mut self.supply_checkpoints,
            chain.height(),
            self.next_token_id,
        );

        let delegatee = self.delegates.get(&to).copied();
        self.move_votes(chain.height(), None, delegatee, 1);

        token_id
    }

    /// Assigns the holder's entire voting weight to `delegatee`. Moving a
    /// delegation shifts the weight from the previous delegate at the
    /// current block.
    pub fn delegate(&mut self, chain: &SimulatedChain, holder: Address, delegatee: Address) {
        let weight = self.balance_of(&holder);
        let previous = self.delegates.insert(holder, delegatee);
        debug!(
            "delegate: holder={} delegatee={} weight={}",
            holder, delegatee, weight
        );
        self.move_votes(chain.height(), previous, Some(delegatee), weight);
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn owner_of(&self, token_id: u64) -> Option<Address> {
        self.owners.get(&token_id).copied()
    }

    pub fn delegate_of(&self, holder: &Address) -> Option<Address> {
        self.delegates.get(holder).copied()
    }

    /// Voting weight of `account` as of `block`.
    pub fn get_past_votes(&self, account: &Address, block: u64) -> u64 {
        match self.checkpoints.get(account) {
            Some(history) => lookup_checkpoint(history, block),
            None => 0,
        }
    }

    /// Token supply as of `block`, the quorum denominator.
    pub fn past_total_supply(&self, block: u64) -> u64 {
        lookup_checkpoint(&self.supply_checkpoints, block)
    }

    pub fn total_supply(&self) -> u64 {
        self.next_token_id
    }

    fn move_votes(&mut self, block: u64, from: Option<Address>, to: Option<Address>, amount: u64) {
        if amount == 0 || from == to {
            return;
        }
        if let Some(src) = from {
            let current = self.latest_votes(&src);
            let history = self.checkpoints.entry(src).or_default();
            push_checkpoint(history, block, current.saturating_sub(amount));
        }
        if let Some(dst) = to {
            let current = self.latest_votes(&dst);
            let history = self.checkpoints.entry(dst).or_default();
            push_checkpoint(history, block, current + amount);
        }
    }

    fn latest_votes(&self, account: &Address) -> u64 {
        self.checkpoints
            .get(account)
            .and_then(|history| history.last())
            .map(|checkpoint| checkpoint.votes)
            .unwrap_or(0)
    }
}

fn push_checkpoint(history: &mut Vec<Checkpoint>, block: u64, votes: u64) {
    match history.last_mut() {
        Some(last) if last.from_block == block => last.votes = votes,
        _ => history.push(Checkpoint {
            from_block: block,
            votes,
        }),
    }
}

fn lookup_checkpoint(history: &[Checkpoint], block: u64) -> u64 {
    let idx = history.partition_point(|checkpoint| checkpoint.from_block <= block);
    if idx == 0 {
        0
    } else {
        history[idx - 1].votes
    }
}
