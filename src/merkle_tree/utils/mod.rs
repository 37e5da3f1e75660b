mod balance_map;
mod build_tree;
mod create_proof;
mod csv_parser;
mod hash;
mod index_of;
mod operation_helpers;
mod proof_verification;

pub use balance_map::parse_balance_map;
pub use build_tree::{build_merkle_tree_from_entries, build_merkle_tree_from_leaves};
pub use create_proof::{create_proof, sibling_path};
pub use csv_parser::parse_csv_to_entries;
pub use hash::{hash_leaf, hash_pair};
pub use index_of::index_of;
pub use operation_helpers::*;
pub use proof_verification::{fold_proof, verify, verify_hex, verify_proof, verify_strict};
