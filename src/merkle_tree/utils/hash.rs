use ethers::types::{Address, H256};
use ethers::utils::keccak256;

const WORD: usize = 32;
const LEAF_PREIMAGE_LEN: usize = WORD + 20 + WORD;

/// `keccak256(uint256 index ‖ address ‖ uint256 amount)` over the tightly packed encoding.
pub fn hash_leaf(index: usize, address: &Address, amount: &[u8; WORD]) -> H256 {
    let mut preimage = [0u8; LEAF_PREIMAGE_LEN];

    preimage[WORD - 8..WORD].copy_from_slice(&(index as u64).to_be_bytes());
    preimage[WORD..WORD + 20].copy_from_slice(address.as_bytes());
    preimage[WORD + 20..].copy_from_slice(amount);

    H256(keccak256(preimage))
}

/// Parent of two sibling hashes. The smaller hash always goes first, so the
/// result does not depend on which child sits on the left.
pub fn hash_pair(a: &H256, b: &H256) -> H256 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    let mut preimage = [0u8; 2 * WORD];
    preimage[..WORD].copy_from_slice(low.as_bytes());
    preimage[WORD..].copy_from_slice(high.as_bytes());

    H256(keccak256(preimage))
}
