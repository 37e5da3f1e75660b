use ark_std::{end_timer, start_timer};
use ethers::types::H256;

use crate::merkle_tree::utils::hash::hash_pair;
use crate::merkle_tree::IndexedEntry;

pub fn build_merkle_tree_from_entries(entries: &[IndexedEntry]) -> Vec<Vec<H256>> {
    let pf_time = start_timer!(|| "compute leaves");
    let leaves = entries.iter().map(IndexedEntry::compute_leaf).collect();
    end_timer!(pf_time);

    let pf_time = start_timer!(|| "compute middle levels");
    let layers = build_merkle_tree_from_leaves(leaves);
    end_timer!(pf_time);

    layers
}

/// Folds `leaves` pairwise into layers, `layers[0]` being the leaves and the
/// last layer holding the root alone. An unpaired last element is carried up
/// unchanged.
pub fn build_merkle_tree_from_leaves(leaves: Vec<H256>) -> Vec<Vec<H256>> {
    let mut layers = vec![leaves];

    loop {
        let current = &layers[layers.len() - 1];
        if current.len() <= 1 {
            break;
        }

        let next: Vec<H256> = current
            .chunks(2)
            .map(|pair| match *pair {
                [left, right] => hash_pair(&left, &right),
                [single] => single,
                _ => unreachable!("chunks(2) yields one or two hashes"),
            })
            .collect();

        layers.push(next);
    }

    layers
}
