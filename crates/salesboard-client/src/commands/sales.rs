use std::path::Path;

use chrono::NaiveDateTime;

use crate::ClientResult;
use crate::commands::common::{open_book, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{SaleAddData, SaleDeleteData, SaleListData};
use crate::sales::record::SaleDraft;

#[derive(Debug, Default)]
pub struct SaleAddOptions<'a> {
    pub draft: SaleDraft,
    pub home_override: Option<&'a Path>,
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Default)]
pub struct SaleListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct SaleDeleteOptions<'a> {
    pub id: i64,
    pub home_override: Option<&'a Path>,
}

pub fn add(draft: SaleDraft) -> ClientResult<SuccessEnvelope> {
    add_with_options(SaleAddOptions {
        draft,
        ..SaleAddOptions::default()
    })
}

#[doc(hidden)]
pub fn add_with_options(options: SaleAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut book = open_book(options.home_override)?;
    let sale = book.add_record(options.draft, resolve_now(options.now))?;

    let message = match &sale {
        Some(record) => format!("Recorded sale {} for {}.", record.id, record.customer_name),
        None => "Sale was not recorded: a customer name and a non-negative amount are required."
            .to_string(),
    };
    let data = SaleAddData {
        recorded: sale.is_some(),
        sale,
        message,
        record_count: book.len(),
    };
    success("sale add", data)
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(SaleListOptions::default())
}

#[doc(hidden)]
pub fn list_with_options(options: SaleListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let book = open_book(options.home_override)?;
    let mut records = book.records().to_vec();
    records.sort_by(|left, right| {
        right
            .date
            .cmp(&left.date)
            .then_with(|| right.id.cmp(&left.id))
    });

    let data = SaleListData {
        record_count: records.len(),
        records,
    };
    success("sale list", data)
}

pub fn delete(id: i64) -> ClientResult<SuccessEnvelope> {
    delete_with_options(SaleDeleteOptions {
        id,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn delete_with_options(options: SaleDeleteOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut book = open_book(options.home_override)?;
    let deleted = book.delete_record(options.id)?;

    let data = SaleDeleteData {
        id: options.id,
        deleted,
        record_count: book.len(),
    };
    success("sale delete", data)
}
