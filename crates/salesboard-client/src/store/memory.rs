use crate::ClientResult;
use crate::sales::record::SaleRecord;
use crate::store::{SalesStore, decode_records, encode_records};

/// Store that keeps the encoded blob in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blob(blob: &str) -> Self {
        Self {
            blob: Some(blob.to_string()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SalesStore for MemoryStore {
    fn load(&self) -> ClientResult<Vec<SaleRecord>> {
        Ok(self.blob.as_deref().map(decode_records).unwrap_or_default())
    }

    fn save(&mut self, records: &[SaleRecord]) -> ClientResult<()> {
        self.blob = Some(encode_records(records)?);
        Ok(())
    }
}
