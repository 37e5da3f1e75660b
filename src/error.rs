use ethers::types::H256;
use num_bigint::BigUint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DistributorError>;

#[derive(Debug, Error)]
pub enum DistributorError {
    #[error("invalid address `{0}`: expected 40 hex characters with optional 0x prefix")]
    InvalidAddress(String),

    #[error("duplicate entry for address {0}")]
    DuplicateEntry(String),

    #[error("invalid amount `{0}`: expected a non-negative decimal or 0x-prefixed hex integer")]
    NegativeOrMalformedAmount(String),

    #[error("amount {0} does not fit in a 256-bit word")]
    AmountOutOfRange(BigUint),

    #[error("invalid hash `{0}`: expected 32 bytes of hex")]
    InvalidHash(String),

    #[error("cannot build a distribution from an empty entry list")]
    EmptyInput,

    #[error("index {index} is out of range for a tree with {leaves} leaves")]
    ProofIndexOutOfRange { index: usize, leaves: usize },

    #[error("claim for {address} has index {index}, expected a unique index below {claims}")]
    InvalidClaimIndex {
        address: String,
        index: usize,
        claims: usize,
    },

    #[error("proof verification failed for {address}")]
    ProofVerificationFailure { address: String },

    #[error("merkle root mismatch: claims rebuild to {actual:?}, distribution states {expected:?}")]
    RootMismatch { expected: H256, actual: H256 },

    #[error("total {actual} does not reconcile with expected {expected} (tolerance {tolerance})")]
    TotalMismatch {
        actual: BigUint,
        expected: BigUint,
        tolerance: BigUint,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
