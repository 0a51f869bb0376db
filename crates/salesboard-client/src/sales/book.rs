use chrono::{Local, NaiveDateTime, TimeZone};
use tracing::{debug, info};

use crate::ClientResult;
use crate::sales::record::{SaleDraft, SaleRecord};
use crate::store::SalesStore;

/// Owner of the record set: every successful mutation is saved before returning.
pub struct SalesBook<S: SalesStore> {
    store: S,
    records: Vec<SaleRecord>,
}

impl<S: SalesStore> SalesBook<S> {
    pub fn open(store: S) -> ClientResult<Self> {
        let records = store.load()?;
        debug!(count = records.len(), "opened sales book");
        Ok(Self { store, records })
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns `Ok(None)` without touching the store when the draft lacks a
    /// customer name or amount, or carries out-of-range values.
    pub fn add_record(
        &mut self,
        draft: SaleDraft,
        now: NaiveDateTime,
    ) -> ClientResult<Option<SaleRecord>> {
        let id = self.next_id(now);
        let Some(record) = draft.into_record(id, now) else {
            debug!("rejected sale draft");
            return Ok(None);
        };

        self.records.push(record.clone());
        if let Err(error) = self.store.save(&self.records) {
            self.records.pop();
            return Err(error);
        }
        info!(id = record.id, amount = record.amount, "recorded sale");
        Ok(Some(record))
    }

    /// Returns whether a record was removed; unknown ids are a no-op.
    pub fn delete_record(&mut self, id: i64) -> ClientResult<bool> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            debug!(id, "no sale to delete");
            return Ok(false);
        };

        let removed = self.records.remove(index);
        if let Err(error) = self.store.save(&self.records) {
            self.records.insert(index, removed);
            return Err(error);
        }
        info!(id, "deleted sale");
        Ok(true)
    }

    // Epoch milliseconds of `now` read as local time, bumped past every existing id.
    fn next_id(&self, now: NaiveDateTime) -> i64 {
        let candidate = epoch_millis(now);
        match self.records.iter().map(|record| record.id).max() {
            Some(max_id) if max_id >= candidate => max_id.saturating_add(1),
            _ => candidate,
        }
    }
}

// A wall-clock time skipped by a DST jump has no local instant; it falls back to UTC.
fn epoch_millis(now: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&now)
        .earliest()
        .map(|moment| moment.timestamp_millis())
        .unwrap_or_else(|| now.and_utc().timestamp_millis())
}
