pub mod distribution;
pub mod error;
pub mod merkle_tree;

pub use distribution::{
    build, check_aggregate_total, check_allocation_ceiling, Claim, Distribution,
};
pub use error::{DistributorError, Result};
pub use ethers::types::{Address, H256};
pub use merkle_tree::{
    verify, verify_hex, verify_strict, Entry, IndexedEntry, MerkleProof, MerkleTree,
};
