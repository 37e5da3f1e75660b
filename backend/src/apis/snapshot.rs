use std::fmt;
use std::path::Path;

use merkle_distributor::{check_allocation_ceiling, Distribution, Entry, MerkleTree};
use tracing::info;

use crate::apis::config::SnapshotConfig;
use crate::apis::input::load_entries;
use crate::{save_to_file, BackendError, Result};

/// One distribution run: entries in, verified distribution out.
///
/// Steps must be taken in order; calling one early fails with `InvalidState`.
pub struct Snapshot {
    config: SnapshotConfig,
    status: SnapshotStatus,
    entries: Option<Vec<Entry>>,
    distribution: Option<Distribution>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotStatus {
    Initialized,
    EntriesLoaded,
    TreeGenerated,
    Verified,
}

impl SnapshotStatus {
    fn as_str(&self) -> &'static str {
        match self {
            SnapshotStatus::Initialized => "initialized",
            SnapshotStatus::EntriesLoaded => "entries-loaded",
            SnapshotStatus::TreeGenerated => "tree-generated",
            SnapshotStatus::Verified => "verified",
        }
    }
}

impl fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Snapshot {
    pub fn new(config: SnapshotConfig) -> Self {
        Snapshot {
            config,
            status: SnapshotStatus::Initialized,
            entries: None,
            distribution: None,
        }
    }

    pub fn status(&self) -> SnapshotStatus {
        self.status
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        self.distribution.as_ref()
    }

    fn expect_status(&self, expected: SnapshotStatus) -> Result<()> {
        if self.status != expected {
            return Err(BackendError::InvalidState {
                expected: expected.as_str(),
                actual: self.status.as_str(),
            });
        }
        Ok(())
    }

    pub fn load_entries<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let entries = load_entries(path)?;
        self.set_entries(entries)
    }

    /// Takes an entry list gathered elsewhere. The allocation ceiling, if
    /// configured, is enforced here before anything is hashed.
    pub fn set_entries(&mut self, entries: Vec<Entry>) -> Result<()> {
        self.expect_status(SnapshotStatus::Initialized)?;

        if let Some(ceiling) = &self.config.allocation_ceiling {
            check_allocation_ceiling(&entries, ceiling)?;
        }

        self.entries = Some(entries);
        self.status = SnapshotStatus::EntriesLoaded;
        Ok(())
    }

    pub fn generate_tree(&mut self) -> Result<()> {
        self.expect_status(SnapshotStatus::EntriesLoaded)?;

        let entries = self.entries.take().unwrap_or_default();
        let tree = MerkleTree::new(entries)?;
        info!(
            root = ?tree.root(),
            depth = *tree.depth(),
            entries = tree.entries().len(),
            "merkle tree generated"
        );

        self.distribution = Some(tree.to_distribution());
        self.status = SnapshotStatus::TreeGenerated;
        Ok(())
    }

    /// Re-verifies every claim and, when an expected total is configured,
    /// reconciles the token total against it.
    pub fn verify(&mut self) -> Result<()> {
        self.expect_status(SnapshotStatus::TreeGenerated)?;

        let distribution = self
            .distribution
            .as_ref()
            .ok_or(BackendError::InvalidState {
                expected: SnapshotStatus::TreeGenerated.as_str(),
                actual: self.status.as_str(),
            })?;

        distribution.verify_claims()?;
        if let Some(expected_total) = &self.config.expected_total {
            distribution.check_total(expected_total, &self.config.tolerance)?;
        }

        info!(
            claims = distribution.len(),
            total = %distribution.token_total(),
            "distribution verified"
        );

        self.status = SnapshotStatus::Verified;
        Ok(())
    }

    /// Writes the distribution. Only a verified distribution is ever published.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.expect_status(SnapshotStatus::Verified)?;

        if let Some(distribution) = &self.distribution {
            save_to_file(&path, distribution)?;
            info!(path = %path.as_ref().display(), "distribution saved");
        }
        Ok(())
    }

    /// Load, build, verify and save in one go.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        config: SnapshotConfig,
        input: P,
        output: Q,
    ) -> Result<Distribution> {
        let mut snapshot = Snapshot::new(config);
        snapshot.load_entries(input)?;
        snapshot.generate_tree()?;
        snapshot.verify()?;
        snapshot.save(output)?;

        snapshot.distribution.ok_or(BackendError::InvalidState {
            expected: SnapshotStatus::Verified.as_str(),
            actual: SnapshotStatus::Initialized.as_str(),
        })
    }
}
