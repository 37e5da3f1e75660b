use ethers::types::{Address, H256};
use num_bigint::BigUint;

use crate::error::Result;
use crate::merkle_tree::utils::{amount_to_word, hash_leaf, parse_address, parse_amount};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    address: Address,
    amount: BigUint,
    amount_word: [u8; 32],
    metadata: Option<String>,
}

impl Entry {
    /// Fails with `AmountOutOfRange` if `amount` does not fit the 256-bit leaf slot.
    pub fn new(address: Address, amount: BigUint) -> Result<Self> {
        let amount_word = amount_to_word(&amount)?;

        Ok(Entry {
            address,
            amount,
            amount_word,
            metadata: None,
        })
    }

    /// Parses a hex address (any casing, optional `0x`) and a decimal or `0x`-hex amount.
    pub fn parse(address: &str, amount: &str) -> Result<Self> {
        Self::new(parse_address(address)?, parse_amount(amount)?)
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        let metadata = metadata.into();
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }

    // Getters
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn amount(&self) -> &BigUint {
        &self.amount
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }
}

/// An entry together with its position in ascending address order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedEntry {
    index: usize,
    entry: Entry,
}

impl IndexedEntry {
    pub fn new(index: usize, entry: Entry) -> Self {
        IndexedEntry { index, entry }
    }

    pub fn compute_leaf(&self) -> H256 {
        hash_leaf(self.index, &self.entry.address, &self.entry.amount_word)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn address(&self) -> &Address {
        self.entry.address()
    }

    pub fn amount(&self) -> &BigUint {
        self.entry.amount()
    }
}
