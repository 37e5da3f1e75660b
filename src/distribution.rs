//! The published form of a tree: root, token total and one claim per address.

use ethers::types::{Address, H256};
use indexmap::IndexMap;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DistributorError, Result};
use crate::merkle_tree::{
    amount_to_word, build_merkle_tree_from_leaves, checksum, hash_leaf, hex_biguint,
    sibling_path, verify_strict, Entry, MerkleTree,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub index: usize,
    #[serde(with = "hex_biguint")]
    pub amount: BigUint,
    pub proof: Vec<H256>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(rename = "merkleRoot")]
    merkle_root: H256,
    #[serde(rename = "tokenTotal", with = "hex_biguint")]
    token_total: BigUint,
    #[serde(with = "checksummed_claims")]
    claims: IndexMap<Address, Claim>,
}

/// Builds the distribution for `entries`. Input order does not matter.
pub fn build(entries: Vec<Entry>) -> Result<Distribution> {
    Ok(MerkleTree::new(entries)?.to_distribution())
}

/// Passes when `actual == expected`, or when `actual` falls short of
/// `expected` by strictly less than `tolerance`. Over-allocation never passes.
fn reconcile_total(actual: &BigUint, expected: &BigUint, tolerance: &BigUint) -> Result<()> {
    if actual == expected || (actual < expected && actual + tolerance > *expected) {
        return Ok(());
    }

    Err(DistributorError::TotalMismatch {
        actual: actual.clone(),
        expected: expected.clone(),
        tolerance: tolerance.clone(),
    })
}

/// Reconciles the combined total of several distributions that split one pool.
pub fn check_aggregate_total(
    distributions: &[&Distribution],
    expected: &BigUint,
    tolerance: &BigUint,
) -> Result<()> {
    let total: BigUint = distributions.iter().map(|d| d.token_total()).sum();
    reconcile_total(&total, expected, tolerance)
}

/// Rejects an entry list that allocates more than `pool` before any hashing.
pub fn check_allocation_ceiling(entries: &[Entry], pool: &BigUint) -> Result<()> {
    let total: BigUint = entries.iter().map(Entry::amount).sum();
    if total > *pool {
        return Err(DistributorError::TotalMismatch {
            actual: total,
            expected: pool.clone(),
            tolerance: BigUint::default(),
        });
    }
    Ok(())
}

impl Distribution {
    pub fn from_tree(tree: &MerkleTree) -> Self {
        let claims = tree
            .entries()
            .iter()
            .map(|entry| {
                let claim = Claim {
                    index: entry.index(),
                    amount: entry.amount().clone(),
                    proof: sibling_path(tree.layers(), entry.index()),
                };
                (*entry.address(), claim)
            })
            .collect();

        Distribution {
            merkle_root: *tree.root(),
            token_total: tree.total_amount().clone(),
            claims,
        }
    }

    /// Builds, self-checks and reconciles against the pool the caller expects.
    /// Nothing is returned unless every check passes.
    pub fn build_verified(
        entries: Vec<Entry>,
        expected_total: &BigUint,
        tolerance: &BigUint,
    ) -> Result<Self> {
        let distribution = build(entries)?;
        distribution.verify_claims()?;
        distribution.check_total(expected_total, tolerance)?;

        info!(
            root = ?distribution.merkle_root,
            claims = distribution.len(),
            total = %distribution.token_total,
            "distribution verified"
        );

        Ok(distribution)
    }

    /// Re-checks a distribution using only its published data. The checks are:
    /// - claim indices are exactly `0..n`,
    /// - every proof leads to the root,
    /// - claim amounts sum to `tokenTotal`,
    /// - the leaves rebuilt from the claims fold to the same root.
    pub fn verify_claims(&self) -> Result<()> {
        if self.claims.is_empty() {
            return Err(DistributorError::EmptyInput);
        }

        let claims = self.claims.len();
        let mut leaves: Vec<Option<H256>> = vec![None; claims];

        for (address, claim) in &self.claims {
            let slot = leaves
                .get_mut(claim.index)
                .filter(|slot| slot.is_none())
                .ok_or_else(|| DistributorError::InvalidClaimIndex {
                    address: checksum(address),
                    index: claim.index,
                    claims,
                })?;

            verify_strict(
                claim.index,
                address,
                &claim.amount,
                &claim.proof,
                &self.merkle_root,
            )?;

            *slot = Some(hash_leaf(claim.index, address, &amount_to_word(&claim.amount)?));
        }

        let total: BigUint = self.claims.values().map(|claim| &claim.amount).sum();
        reconcile_total(&total, &self.token_total, &BigUint::default())?;

        let layers = build_merkle_tree_from_leaves(leaves.into_iter().flatten().collect());
        let rebuilt = layers[layers.len() - 1][0];
        if rebuilt != self.merkle_root {
            return Err(DistributorError::RootMismatch {
                expected: self.merkle_root,
                actual: rebuilt,
            });
        }

        debug!(claims, root = ?self.merkle_root, "all claims verified");
        Ok(())
    }

    pub fn check_total(&self, expected: &BigUint, tolerance: &BigUint) -> Result<()> {
        reconcile_total(&self.token_total, expected, tolerance)
    }

    pub fn merkle_root(&self) -> &H256 {
        &self.merkle_root
    }

    pub fn token_total(&self) -> &BigUint {
        &self.token_total
    }

    pub fn claims(&self) -> &IndexMap<Address, Claim> {
        &self.claims
    }

    pub fn claim(&self, address: &Address) -> Option<&Claim> {
        self.claims.get(address)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Claims keyed by EIP-55 checksummed address on the wire.
mod checksummed_claims {
    use ethers::types::Address;
    use indexmap::IndexMap;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Claim;
    use crate::merkle_tree::{checksum, parse_address};

    pub fn serialize<S: Serializer>(
        claims: &IndexMap<Address, Claim>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(claims.len()))?;
        for (address, claim) in claims {
            map.serialize_entry(&checksum(address), claim)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<Address, Claim>, D::Error> {
        let raw = IndexMap::<String, Claim>::deserialize(deserializer)?;
        let mut claims = IndexMap::with_capacity(raw.len());

        for (key, claim) in raw {
            let address = parse_address(&key).map_err(D::Error::custom)?;
            if claims.insert(address, claim).is_some() {
                return Err(D::Error::custom(format!("duplicate claim for address {key}")));
            }
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle_tree::{parse_address, parse_hash, verify};

    fn entry(address: &str, amount: u64) -> Entry {
        Entry::parse(address, &amount.to_string()).unwrap()
    }

    fn abc_entries() -> Vec<Entry> {
        vec![
            entry("0x3333333333333333333333333333333333333333", 300),
            entry("0x1111111111111111111111111111111111111111", 100),
            entry("0x2222222222222222222222222222222222222222", 200),
        ]
    }

    #[test]
    fn test_build_abc_scenario() {
        let distribution = build(abc_entries()).unwrap();

        let root =
            parse_hash("0xf6b0e97184559af1102165e9dca3785c71dc8269b0476b210d87279958f58f3e")
                .unwrap();
        assert_eq!(distribution.merkle_root(), &root);
        assert_eq!(distribution.token_total(), &BigUint::from(600u32));

        let b = parse_address("0x2222222222222222222222222222222222222222").unwrap();
        let claim_b = distribution.claim(&b).unwrap();
        assert_eq!(claim_b.index, 1);

        assert!(verify(1, &b, &BigUint::from(200u32), &claim_b.proof, &root).unwrap());
        assert!(!verify(1, &b, &BigUint::from(201u32), &claim_b.proof, &root).unwrap());

        // claims are listed in index order
        let indices: Vec<usize> = distribution.claims().values().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sum_conservation() {
        let distribution = build(abc_entries()).unwrap();
        let sum: BigUint = distribution.claims().values().map(|c| &c.amount).sum();
        assert_eq!(&sum, distribution.token_total());
    }

    #[test]
    fn test_verify_claims() {
        let distribution = build(abc_entries()).unwrap();
        distribution.verify_claims().unwrap();

        // tampered amount
        let mut tampered = distribution.clone();
        tampered.claims.get_index_mut(0).unwrap().1.amount += 1u32;
        assert!(matches!(
            tampered.verify_claims(),
            Err(DistributorError::ProofVerificationFailure { .. })
        ));

        // repeated index
        let mut repeated = distribution.clone();
        repeated.claims.get_index_mut(2).unwrap().1.index = 0;
        assert!(matches!(
            repeated.verify_claims(),
            Err(DistributorError::InvalidClaimIndex { index: 0, .. })
        ));

        // token total that disagrees with the claims
        let mut inflated = distribution;
        inflated.token_total += 1u32;
        assert!(matches!(
            inflated.verify_claims(),
            Err(DistributorError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_claims_detects_missing_claim() {
        // dropping a claim leaves its siblings valid but the rebuilt root differs
        let entries = vec![
            entry("0x1111111111111111111111111111111111111111", 100),
            entry("0x2222222222222222222222222222222222222222", 200),
        ];
        let mut distribution = build(entries).unwrap();
        distribution.claims.shift_remove_index(1);
        distribution.token_total = BigUint::from(100u32);

        assert!(matches!(
            distribution.verify_claims(),
            Err(DistributorError::RootMismatch { .. })
        ));
    }

    #[test]
    fn test_check_total_tolerance() {
        let distribution = build(abc_entries()).unwrap();
        let tolerance = BigUint::from(10u32);

        // exact
        distribution
            .check_total(&BigUint::from(600u32), &tolerance)
            .unwrap();
        // under-allocated within tolerance
        distribution
            .check_total(&BigUint::from(609u32), &tolerance)
            .unwrap();
        // under-allocated by exactly the tolerance
        assert!(distribution
            .check_total(&BigUint::from(610u32), &tolerance)
            .is_err());
        // over-allocation is never tolerated
        assert!(matches!(
            distribution.check_total(&BigUint::from(599u32), &tolerance),
            Err(DistributorError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_build_verified() {
        let pool = BigUint::from(601u32);
        let tolerance = BigUint::from(1000u32);
        let distribution = Distribution::build_verified(abc_entries(), &pool, &tolerance).unwrap();
        assert_eq!(distribution.len(), 3);

        let result = Distribution::build_verified(abc_entries(), &BigUint::from(5000u32), &tolerance);
        assert!(matches!(
            result,
            Err(DistributorError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_check_aggregate_total() {
        let first = build(abc_entries()).unwrap();
        let second = build(vec![entry("0x4444444444444444444444444444444444444444", 400)]).unwrap();
        let tolerance = BigUint::from(1000u32);

        check_aggregate_total(&[&first, &second], &BigUint::from(1000u32), &tolerance).unwrap();
        assert!(
            check_aggregate_total(&[&first, &second], &BigUint::from(999u32), &tolerance).is_err()
        );
    }

    #[test]
    fn test_check_allocation_ceiling() {
        let entries = abc_entries();
        check_allocation_ceiling(&entries, &BigUint::from(600u32)).unwrap();
        assert!(matches!(
            check_allocation_ceiling(&entries, &BigUint::from(599u32)),
            Err(DistributorError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_serialization_format() {
        let distribution = build(vec![
            entry("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd", 100),
            entry("0x1111111111111111111111111111111111111111", 0),
        ])
        .unwrap();

        let json: serde_json::Value = serde_json::to_value(&distribution).unwrap();

        let root = json["merkleRoot"].as_str().unwrap();
        assert!(root.starts_with("0x"));
        assert_eq!(root.len(), 66);
        assert_eq!(json["tokenTotal"], "0x64");

        let claim = &json["claims"]["0xABcdEFABcdEFabcdEfAbCdefabcdeFABcDEFabCD"];
        assert_eq!(claim["index"], 1);
        assert_eq!(claim["amount"], "0x64");
        assert_eq!(claim["proof"].as_array().unwrap().len(), 1);

        let zero = &json["claims"]["0x1111111111111111111111111111111111111111"];
        assert_eq!(zero["amount"], "0x00");

        let decoded: Distribution = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, distribution);
        decoded.verify_claims().unwrap();
    }

    #[test]
    fn test_deserialize_rejects_duplicate_claims() {
        let json = r#"{
            "merkleRoot": "0x0000000000000000000000000000000000000000000000000000000000000000",
            "tokenTotal": "0x02",
            "claims": {
                "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd": {"index": 0, "amount": "0x01", "proof": []},
                "0xABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABCD": {"index": 1, "amount": "0x01", "proof": []}
            }
        }"#;

        assert!(serde_json::from_str::<Distribution>(json).is_err());
    }
}
