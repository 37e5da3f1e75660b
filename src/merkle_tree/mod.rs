//! Sorted-pair keccak256 Merkle tree over `(index, address, amount)` leaves.
//!
//! Wire format:
//! - leaf = `keccak256(uint256 index ‖ address ‖ uint256 amount)`, 84 packed bytes,
//!   identical to Solidity `abi.encodePacked(index, account, amount)`.
//! - node = `keccak256(min(a, b) ‖ max(a, b))`, children compared as unsigned
//!   big-endian integers.
//! - an unpaired last element of a layer is promoted to the next layer unchanged.

mod entry;
mod tree;
mod utils;


use ethers::types::H256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    pub root_hash: H256,
    pub entry: IndexedEntry,
    pub sibling_hashes: Vec<H256>,
}

pub use entry::{Entry, IndexedEntry};
pub use tree::MerkleTree;
pub use utils::{
    amount_to_word, build_merkle_tree_from_leaves, checksum, fold_proof, hash_leaf, hash_pair,
    hex_biguint, parse_address, parse_amount, parse_balance_map, parse_csv_to_entries,
    parse_hash, sibling_path, to_hex_string, verify, verify_hex, verify_proof, verify_strict,
};
