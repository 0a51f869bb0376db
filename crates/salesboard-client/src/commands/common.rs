use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::ClientResult;
use crate::sales::book::SalesBook;
use crate::setup::initialize;
use crate::store::SqliteStore;

pub(crate) fn open_book(home_override: Option<&Path>) -> ClientResult<SalesBook<SqliteStore>> {
    let setup = initialize(home_override)?;
    let store = SqliteStore::open(&setup)?;
    SalesBook::open(store)
}

pub(crate) fn resolve_now(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| Local::now().naive_local())
}
