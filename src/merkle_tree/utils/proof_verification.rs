use ethers::types::{Address, H256};
use num_bigint::BigUint;

use super::hash::{hash_leaf, hash_pair};
use super::operation_helpers::{amount_to_word, checksum, parse_address, parse_amount, parse_hash};
use crate::error::{DistributorError, Result};
use crate::merkle_tree::MerkleProof;

pub fn fold_proof(leaf: H256, proof: &[H256]) -> H256 {
    proof
        .iter()
        .fold(leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Recomputes the root from one claim using public data only.
///
/// A proof that does not lead to `root` is `Ok(false)`. `Err` is reserved for
/// an amount that cannot be encoded in the leaf.
pub fn verify(
    index: usize,
    address: &Address,
    amount: &BigUint,
    proof: &[H256],
    root: &H256,
) -> Result<bool> {
    let leaf = hash_leaf(index, address, &amount_to_word(amount)?);
    Ok(fold_proof(leaf, proof) == *root)
}

/// [`verify`] over the textual form found in a published distribution.
pub fn verify_hex<S: AsRef<str>>(
    index: usize,
    address: &str,
    amount: &str,
    proof: &[S],
    root: &str,
) -> Result<bool> {
    let address = parse_address(address)?;
    let amount = parse_amount(amount)?;
    let proof = proof
        .iter()
        .map(|hash| parse_hash(hash.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let root = parse_hash(root)?;

    verify(index, &address, &amount, &proof, &root)
}

/// [`verify`], with a failed proof turned into `ProofVerificationFailure`.
pub fn verify_strict(
    index: usize,
    address: &Address,
    amount: &BigUint,
    proof: &[H256],
    root: &H256,
) -> Result<()> {
    if verify(index, address, amount, proof, root)? {
        Ok(())
    } else {
        Err(DistributorError::ProofVerificationFailure {
            address: checksum(address),
        })
    }
}

pub fn verify_proof(proof: &MerkleProof) -> bool {
    fold_proof(proof.entry.compute_leaf(), &proof.sibling_hashes) == proof.root_hash
}
