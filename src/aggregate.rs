use std::collections::HashMap;
use std::io;

use serde_json::Value;

use crate::classify::classify_to_address;
use crate::config::AddressBook;
use crate::models::{AddressCount, Category, Record};

/// Single-pass accumulator for the "by to" breakdown.
#[derive(Debug, Default)]
pub struct ByToStats {
    relay: u64,
    weth_helper: u64,
    other: u64,
    other_tx_hashes: Vec<String>,
    // First-seen order; `address` keeps the casing of the first occurrence.
    other_to: Vec<AddressCount>,
    other_to_index: HashMap<String, usize>,
}

impl ByToStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, book: &AddressBook, record: &Record) {
        let to = record.get("to");
        match classify_to_address(book, to) {
            Category::Relay => self.relay += 1,
            Category::WethHelper => self.weth_helper += 1,
            Category::Other => {
                self.other += 1;
                if let Some(Value::String(hash)) = record.get("transactionHash") {
                    self.other_tx_hashes.push(hash.clone());
                }
                if let Some(Value::String(addr)) = to {
                    self.inc_other_to(addr);
                }
            }
        }
    }

    /// Drains `records` in order. A read error stops the pass.
    pub fn consume<I>(&mut self, book: &AddressBook, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = io::Result<Record>>,
    {
        for record in records {
            self.observe(book, &record?);
        }
        Ok(())
    }

    fn inc_other_to(&mut self, addr: &str) {
        let key = addr.to_lowercase();
        let idx = match self.other_to_index.get(&key) {
            Some(idx) => *idx,
            None => {
                self.other_to.push(AddressCount {
                    address: addr.to_string(),
                    count: 0,
                });
                let idx = self.other_to.len() - 1;
                self.other_to_index.insert(key, idx);
                idx
            }
        };
        self.other_to[idx].count += 1;
    }

    pub fn relay(&self) -> u64 {
        self.relay
    }

    pub fn weth_helper(&self) -> u64 {
        self.weth_helper
    }

    pub fn other(&self) -> u64 {
        self.other
    }

    pub fn total(&self) -> u64 {
        self.relay + self.weth_helper + self.other
    }

    pub fn other_tx_hashes(&self) -> &[String] {
        &self.other_tx_hashes
    }

    /// Distinct OTHER destinations with their counts, in first-seen order.
    pub fn other_to_frequencies(&self) -> &[AddressCount] {
        &self.other_to
    }

    /// Occurrences of `addr` among OTHER records, ignoring case.
    pub fn other_to_count(&self, addr: &str) -> u64 {
        self.other_to_index
            .get(&addr.to_lowercase())
            .map(|idx| self.other_to[*idx].count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ADDR_RAILGUN_RELAY, ADDR_WETH_HELPER};
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn run(records: Vec<Value>) -> ByToStats {
        let book = AddressBook::default();
        let mut stats = ByToStats::new();
        stats
            .consume(&book, records.into_iter().map(|v| Ok(record(v))))
            .unwrap();
        stats
    }

    #[test]
    fn counts_each_bucket() {
        let stats = run(vec![
            json!({"to": ADDR_RAILGUN_RELAY, "transactionHash": "0x01"}),
            json!({"to": ADDR_RAILGUN_RELAY.to_uppercase(), "transactionHash": "0x02"}),
            json!({"to": ADDR_WETH_HELPER, "transactionHash": "0x03"}),
            json!({"to": "0xdead", "transactionHash": "0x04"}),
            json!({"to": null, "transactionHash": "0x05"}),
        ]);
        assert_eq!(stats.relay(), 2);
        assert_eq!(stats.weth_helper(), 1);
        assert_eq!(stats.other(), 2);
        assert_eq!(stats.total(), 5);
        assert_eq!(stats.other_tx_hashes(), ["0x04", "0x05"]);
    }

    #[test]
    fn known_buckets_never_contribute_hashes() {
        let stats = run(vec![
            json!({"to": ADDR_RAILGUN_RELAY, "transactionHash": "0x01"}),
            json!({"to": ADDR_WETH_HELPER, "transactionHash": "0x02"}),
        ]);
        assert!(stats.other_tx_hashes().is_empty());
        assert!(stats.other_to_frequencies().is_empty());
    }

    #[test]
    fn dedups_case_insensitively_keeping_first_spelling() {
        let stats = run(vec![
            json!({"to": "0xAbC", "transactionHash": "0x1"}),
            json!({"to": "0xbeef", "transactionHash": "0x2"}),
            json!({"to": "0xABC", "transactionHash": "0x3"}),
            json!({"to": "0xabc", "transactionHash": "0x4"}),
        ]);
        assert_eq!(
            stats.other_to_frequencies(),
            [
                AddressCount {
                    address: "0xAbC".to_string(),
                    count: 3
                },
                AddressCount {
                    address: "0xbeef".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(stats.other_to_count("0XABC"), 3);
        assert_eq!(stats.other_to_count("0xmissing"), 0);
        assert_eq!(stats.other_tx_hashes(), ["0x1", "0x2", "0x3", "0x4"]);
    }

    #[test]
    fn non_string_fields_are_counted_but_not_listed() {
        let stats = run(vec![
            json!({"to": 7, "transactionHash": "0x1"}),
            json!({"to": "0xdead", "transactionHash": 99}),
            json!({"transactionHash": null}),
            json!({}),
        ]);
        assert_eq!(stats.other(), 4);
        assert_eq!(stats.other_tx_hashes(), ["0x1"]);
        assert_eq!(stats.other_to_frequencies().len(), 1);
        assert_eq!(stats.other_to_count("0xdead"), 1);
    }

    #[test]
    fn read_error_stops_the_pass() {
        let book = AddressBook::default();
        let mut stats = ByToStats::new();
        let records = vec![
            Ok(record(json!({"to": "0x1"}))),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad bytes")),
            Ok(record(json!({"to": "0x2"}))),
        ];
        assert!(stats.consume(&book, records).is_err());
        assert_eq!(stats.total(), 1);
    }
}
