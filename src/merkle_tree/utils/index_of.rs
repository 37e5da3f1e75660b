use ethers::types::Address;

use crate::merkle_tree::IndexedEntry;

// `entries` are sorted by address, so the position is also the leaf index.
pub fn index_of(address: &Address, entries: &[IndexedEntry]) -> Option<usize> {
    entries
        .binary_search_by(|entry| entry.address().cmp(address))
        .ok()
        .map(|position| entries[position].index())
}
