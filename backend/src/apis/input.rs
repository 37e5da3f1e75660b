use std::path::Path;

use merkle_distributor::merkle_tree::{parse_balance_map, parse_csv_to_entries};
use merkle_distributor::Entry;
use tracing::debug;

use crate::Result;

/// Loads an entry list. `.csv` files are read as `address,amount[,metadata]`
/// rows, anything else as a JSON balance map in list or map form.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("csv"));

    let entries = if is_csv {
        parse_csv_to_entries(path)?
    } else {
        parse_balance_map(&std::fs::read_to_string(path)?)?
    };

    debug!(path = %path.display(), entries = entries.len(), "loaded entries");
    Ok(entries)
}
