use std::path::Path;

use ethers::types::{Address, H256};
use itertools::Itertools;
use num_bigint::BigUint;
use tracing::debug;

use crate::distribution::Distribution;
use crate::error::{DistributorError, Result};
use crate::merkle_tree::utils::{
    build_merkle_tree_from_entries, checksum, create_proof, index_of, parse_csv_to_entries,
    verify_proof,
};
use crate::merkle_tree::{Entry, IndexedEntry, MerkleProof};

pub struct MerkleTree {
    root: H256,
    layers: Vec<Vec<H256>>,
    depth: usize,
    entries: Vec<IndexedEntry>,
    total_amount: BigUint,
}

impl MerkleTree {
    /// Builds the tree over `entries`, which may arrive in any order.
    ///
    /// Entries are sorted by raw address bytes and indexed `0..n` in that order,
    /// so the same entry set always yields the same root and proofs.
    pub fn new(entries: Vec<Entry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(DistributorError::EmptyInput);
        }

        let mut entries = entries;
        entries.sort_by(|a, b| a.address().cmp(b.address()));

        if let Some((duplicate, _)) = entries
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.address() == b.address())
        {
            return Err(DistributorError::DuplicateEntry(checksum(duplicate.address())));
        }

        let entries: Vec<IndexedEntry> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| IndexedEntry::new(index, entry))
            .collect();

        let total_amount: BigUint = entries.iter().map(IndexedEntry::amount).sum();
        let layers = build_merkle_tree_from_entries(&entries);
        let depth = layers.len() - 1;
        let root = layers[depth][0];

        debug!(entries = entries.len(), depth, root = ?root, "built merkle tree");

        Ok(MerkleTree {
            root,
            layers,
            depth,
            entries,
            total_amount,
        })
    }

    /// Reads `address,amount[,metadata]` rows and builds the tree from them.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let entries = parse_csv_to_entries(path)?;
        Self::new(entries)
    }

    pub fn root(&self) -> &H256 {
        &self.root
    }

    /// Number of layers above the leaves; zero for a single-entry tree.
    pub fn depth(&self) -> &usize {
        &self.depth
    }

    pub fn leaves(&self) -> &[H256] {
        &self.layers[0]
    }

    pub fn layers(&self) -> &[Vec<H256>] {
        &self.layers
    }

    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    pub fn total_amount(&self) -> &BigUint {
        &self.total_amount
    }

    pub fn index_of(&self, address: &Address) -> Option<usize> {
        index_of(address, &self.entries)
    }

    pub fn generate_proof(&self, index: usize) -> Result<MerkleProof> {
        create_proof(index, &self.entries, &self.layers, &self.root)
    }

    pub fn verify_proof(&self, proof: &MerkleProof) -> bool {
        verify_proof(proof)
    }

    pub fn to_distribution(&self) -> Distribution {
        Distribution::from_tree(self)
    }
}
