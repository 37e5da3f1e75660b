use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::merkle_tree::Entry;

/// The two shapes an entry list is published in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BalanceMap {
    List(Vec<BalanceEntry>),
    Map(IndexMap<String, AmountValue>),
}

#[derive(Debug, Deserialize)]
struct BalanceEntry {
    address: String,
    #[serde(alias = "amount")]
    earnings: AmountValue,
    #[serde(default, alias = "metadata")]
    reasons: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AmountValue {
    Text(String),
    Number(serde_json::Number),
}

impl AmountValue {
    fn as_text(&self) -> String {
        match self {
            AmountValue::Text(text) => text.clone(),
            AmountValue::Number(number) => number.to_string(),
        }
    }
}

/// Reads entries from either
/// `[{"address": .., "earnings": .., "reasons": ..}, ..]` or `{"<address>": "<amount>", ..}`.
///
/// Amounts may be decimal or `0x`-hex strings, or plain JSON integers.
/// Duplicates are left in place for the tree builder to reject.
pub fn parse_balance_map(json: &str) -> Result<Vec<Entry>> {
    match serde_json::from_str::<BalanceMap>(json)? {
        BalanceMap::List(items) => items
            .into_iter()
            .map(|item| -> Result<Entry> {
                let entry = Entry::parse(&item.address, &item.earnings.as_text())?;
                Ok(match item.reasons {
                    Some(reasons) => entry.with_metadata(reasons),
                    None => entry,
                })
            })
            .collect(),
        BalanceMap::Map(balances) => balances
            .iter()
            .map(|(address, amount)| Entry::parse(address, &amount.as_text()))
            .collect(),
    }
}
