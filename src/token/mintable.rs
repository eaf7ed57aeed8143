use crate::chain::{Address, SimulatedChain};
use crate::errors::TokenError;
use log::debug;
use std::collections::HashMap;

pub const DECIMALS: u32 = 18;

/// Fungible token whose mint authority is a single fixed address, set at
/// deployment to the governor. Balances only ever change through `mint`
/// calls issued during successful proposal execution.
pub struct MintableToken {
    address: Address,
    minter: Address,
    balances: HashMap<Address, u128>,
    total_supply: u128,
}

impl MintableToken {
    pub fn new(chain: &mut SimulatedChain, minter: Address) -> Self {
        MintableToken {
            address: chain.deploy(),
            minter,
            balances: HashMap::new(),
            total_supply: 0,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn minter(&self) -> Address {
        self.minter
    }

    pub fn mint(&mut self, caller: Address, to: Address, amount: u128) -> Result<(), TokenError> {
        if caller != self.minter {
            return Err(TokenError::MintNotAuthorized);
        }
        *self.balances.entry(to).or_insert(0) += amount;
        self.total_supply += amount;
        debug!("mint: to={} amount={}", to, amount);
        Ok(())
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_requires_configured_minter() {
        let mut chain = SimulatedChain::new();
        let governor = chain.deploy();
        let stranger = chain.new_account();
        let receiver = chain.new_account();
        let mut token = MintableToken::new(&mut chain, governor);

        let err = token.mint(stranger, receiver, 100).unwrap_err();
        assert_eq!(err, TokenError::MintNotAuthorized);
        assert_eq!(token.balance_of(&receiver), 0);

        token.mint(governor, receiver, 100).expect("governor mints");
        assert_eq!(token.balance_of(&receiver), 100);
        assert_eq!(token.total_supply(), 100);
    }

    #[test]
    fn test_mint_accumulates() {
        let mut chain = SimulatedChain::new();
        let governor = chain.deploy();
        let receiver = chain.new_account();
        let mut token = MintableToken::new(&mut chain, governor);

        token.mint(governor, receiver, 1).unwrap();
        token.mint(governor, receiver, 2).unwrap();
        assert_eq!(token.balance_of(&receiver), 3);
    }
}
