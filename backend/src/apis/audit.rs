use std::path::{Path, PathBuf};

use ethers::types::H256;
use merkle_distributor::{check_aggregate_total, Distribution};
use num_bigint::BigUint;
use tracing::{error, info};

use crate::{load_from_file, Result};

#[derive(Debug)]
pub struct AuditedDistribution {
    pub path: PathBuf,
    pub merkle_root: H256,
    pub token_total: BigUint,
    pub claims: usize,
}

#[derive(Debug)]
pub struct AuditReport {
    pub distributions: Vec<AuditedDistribution>,
    pub aggregate_total: BigUint,
}

pub fn load_distribution<P: AsRef<Path>>(path: P) -> Result<Distribution> {
    load_from_file(path)
}

/// Checks published distributions the way a claimant would: every claim
/// against its root, each file's total, then, if `expected_total` is given,
/// the combined total of all files against the pool they split.
pub fn audit_files<P: AsRef<Path>>(
    paths: &[P],
    expected_total: Option<&BigUint>,
    tolerance: &BigUint,
) -> Result<AuditReport> {
    let mut loaded = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let distribution = load_distribution(path)?;

        if let Err(err) = distribution.verify_claims() {
            error!(path = %path.display(), %err, "distribution failed verification");
            return Err(err.into());
        }

        info!(
            path = %path.display(),
            root = ?distribution.merkle_root(),
            claims = distribution.len(),
            "distribution verified"
        );
        loaded.push((path.to_path_buf(), distribution));
    }

    let distributions: Vec<&Distribution> = loaded.iter().map(|(_, d)| d).collect();
    if let Some(expected_total) = expected_total {
        check_aggregate_total(&distributions, expected_total, tolerance)?;
    }
    let aggregate_total: BigUint = distributions.iter().map(|d| d.token_total()).sum();

    Ok(AuditReport {
        aggregate_total,
        distributions: loaded
            .into_iter()
            .map(|(path, distribution)| AuditedDistribution {
                path,
                merkle_root: *distribution.merkle_root(),
                token_total: distribution.token_total().clone(),
                claims: distribution.len(),
            })
            .collect(),
    })
}
