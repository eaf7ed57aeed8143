use bincode::{Decode, Encode};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use std::fmt;

/// Seed for deterministic account derivation. Every fresh chain hands out
/// the same sequence of externally-owned addresses, so scenarios are
/// reproducible across runs.
const ACCOUNT_SEED: u64 = 0x41474f5241; // "AGORA"

pub const ADDRESS_LENGTH: usize = 20;

/// A 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parses a hex address, with or without a leading "0x".
    pub fn from_hex(s: &str) -> Result<Self, &'static str> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| "Address is not valid hex")?;
        let raw: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| "Address must be 20 bytes")?;
        Ok(Address(raw))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Deterministic in-memory ledger context. Time and ordering are simulated
/// through explicit block advancement; there is no wall clock and no
/// concurrency. Tests construct a fresh chain per scenario.
pub struct SimulatedChain {
    height: u64,
    next_contract: u64,
    rng: ChaCha20Rng,
}

impl SimulatedChain {
    pub fn new() -> Self {
        SimulatedChain {
            height: 1,
            next_contract: 0,
            rng: ChaCha20Rng::seed_from_u64(ACCOUNT_SEED),
        }
    }

    /// Current block number.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Advances the chain by `count` blocks, the local equivalent of the
    /// block-mining control command on a development node.
    pub fn mine_blocks(&mut self, count: u64) {
        self.height += count;
    }

    /// Derives the next externally-owned account address.
    pub fn new_account(&mut self) -> Address {
        let mut raw = [0u8; ADDRESS_LENGTH];
        self.rng.fill_bytes(&mut raw);
        Address(raw)
    }

    /// Allocates the next contract address.
    pub fn deploy(&mut self) -> Address {
        let index = self.next_contract;
        self.next_contract += 1;

        let mut hasher = Sha256::new();
        hasher.update(b"agora-contract");
        hasher.update(index.to_be_bytes());
        let digest = hasher.finalize();

        let mut raw = [0u8; ADDRESS_LENGTH];
        raw.copy_from_slice(&digest[..ADDRESS_LENGTH]);
        Address(raw)
    }
}

impl Default for SimulatedChain {
    fn default() -> Self {
        Self::new()
    }
}
