//! Persistence boundary for the sale record set.
//!
//! The whole set is stored as one JSON array under a single key. Reading it
//! back never fails on content: a malformed blob loads as an empty set and
//! malformed entries are dropped, so only real I/O problems surface as errors.

mod memory;
mod sqlite;

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::warn;

use crate::sales::record::SaleRecord;
use crate::{ClientError, ClientResult};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub(crate) use sqlite::{connect, map_sqlite_error};

pub const SALES_KEY: &str = "salesData";

pub trait SalesStore {
    fn load(&self) -> ClientResult<Vec<SaleRecord>>;

    fn save(&mut self, records: &[SaleRecord]) -> ClientResult<()>;
}

pub(crate) fn decode_records(blob: &str) -> Vec<SaleRecord> {
    let entries = match serde_json::from_str::<Vec<Value>>(blob) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(%error, "stored sales data is malformed; starting from an empty set");
            return Vec::new();
        }
    };

    let mut seen_ids = BTreeSet::new();
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let record = match serde_json::from_value::<SaleRecord>(entry) {
            Ok(record) => record,
            Err(error) => {
                warn!(index, %error, "skipping unreadable stored sale");
                continue;
            }
        };
        if !record.is_well_formed() {
            warn!(index, id = record.id, "skipping stored sale with invalid fields");
            continue;
        }
        if !seen_ids.insert(record.id) {
            warn!(index, id = record.id, "skipping stored sale with duplicate id");
            continue;
        }
        records.push(record);
    }
    records
}

pub(crate) fn encode_records(records: &[SaleRecord]) -> ClientResult<String> {
    serde_json::to_string(records)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{decode_records, encode_records};

    #[test]
    fn malformed_blob_decodes_as_empty() {
        for blob in ["", "not json", "{\"id\":1}", "[1,2", "null"] {
            assert!(decode_records(blob).is_empty(), "decoded {blob}");
        }
    }

    #[test]
    fn unreadable_and_duplicate_entries_are_dropped() {
        let blob = r#"[
            {"id":1,"amount":1200,"category":"Electronics","quantity":2,"customerName":"John Doe","date":"2026-01-10"},
            {"id":1,"amount":5,"category":"Food","quantity":1,"customerName":"Dup","date":"2026-01-10"},
            {"id":2,"amount":"850","category":"Clothing","quantity":3,"customerName":"Jane Smith","date":"2026-01-09"},
            {"id":3,"amount":450,"category":"Food","quantity":5,"customerName":"Bob Johnson","date":"not-a-date"},
            {"id":4,"amount":-3,"category":"Food","quantity":1,"customerName":"Neg","date":"2026-01-09"},
            {"id":5,"amount":20,"category":"Garden","quantity":1,"customerName":"Gus","date":"2026-01-09"},
            {"id":6,"amount":75.25,"category":"Books","quantity":1,"customerName":"Ann Lee","date":"2026-01-08T13:15:00"}
        ]"#;

        let records = decode_records(blob);
        let ids = records.iter().map(|record| record.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 6]);
        assert_eq!(records[0].customer_name, "John Doe");
        assert_eq!(records[1].date.hour(), 13);
    }

    #[test]
    fn whitespace_names_survive_a_reload() {
        let blob = r#"[
            {"id":1,"amount":3,"category":"Food","quantity":1,"customerName":"   ","date":"2026-01-10"},
            {"id":2,"amount":4,"category":"Food","quantity":1,"customerName":" Ada","date":"2026-01-10"},
            {"id":3,"amount":5,"category":"Food","quantity":1,"customerName":"","date":"2026-01-10"}
        ]"#;

        let records = decode_records(blob);
        let names = records
            .iter()
            .map(|record| record.customer_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["   ", " Ada"]);
    }

    #[test]
    fn encoded_records_decode_to_the_same_set() {
        let blob = r#"[{"id":9,"amount":12.5,"category":"Other","quantity":4,"customerName":"Kim","date":"2026-04-01"}]"#;
        let records = decode_records(blob);
        assert_eq!(records.len(), 1);

        let encoded = encode_records(&records);
        assert!(encoded.is_ok());
        if let Ok(text) = encoded {
            assert_eq!(decode_records(&text), records);
        }
    }
}
