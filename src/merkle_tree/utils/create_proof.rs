use ethers::types::H256;

use crate::error::{DistributorError, Result};
use crate::merkle_tree::{IndexedEntry, MerkleProof};

pub fn create_proof(
    index: usize,
    entries: &[IndexedEntry],
    layers: &[Vec<H256>],
    root: &H256,
) -> Result<MerkleProof> {
    if index >= entries.len() {
        return Err(DistributorError::ProofIndexOutOfRange {
            index,
            leaves: entries.len(),
        });
    }

    Ok(MerkleProof {
        root_hash: *root,
        entry: entries[index].clone(),
        sibling_hashes: sibling_path(layers, index),
    })
}

/// Siblings met while climbing from leaf `index` to the root. Levels where the
/// ancestor was promoted without a partner contribute nothing.
pub fn sibling_path(layers: &[Vec<H256>], index: usize) -> Vec<H256> {
    let mut sibling_hashes = Vec::with_capacity(layers.len().saturating_sub(1));
    let mut current_index = index;

    for layer in layers.iter().take(layers.len().saturating_sub(1)) {
        if let Some(sibling) = layer.get(current_index ^ 1) {
            sibling_hashes.push(*sibling);
        }
        current_index /= 2;
    }

    sibling_hashes
}
