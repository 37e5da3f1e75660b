use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::merkle_tree::Entry;

#[derive(Debug, Deserialize)]
struct CsvEntry {
    address: String,
    amount: String,
    #[serde(default)]
    metadata: Option<String>,
}

pub fn parse_csv_to_entries<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    for result in rdr.deserialize() {
        let record: CsvEntry = result?;
        let mut entry = Entry::parse(&record.address, &record.amount)?;
        if let Some(metadata) = record.metadata {
            entry = entry.with_metadata(metadata);
        }
        entries.push(entry);
    }

    Ok(entries)
}
