use std::path::Path;

use chrono::NaiveDateTime;

use crate::ClientResult;
use crate::commands::common::{open_book, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashboardData;
use crate::sales::dashboard::build_dashboard;
use crate::sales::range::TimeRange;

#[derive(Debug, Default)]
pub struct DashboardRunOptions<'a> {
    pub range: TimeRange,
    pub home_override: Option<&'a Path>,
    pub now: Option<NaiveDateTime>,
}

pub fn run(range: TimeRange) -> ClientResult<SuccessEnvelope> {
    run_with_options(DashboardRunOptions {
        range,
        ..DashboardRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: DashboardRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let book = open_book(options.home_override)?;
    let dashboard = build_dashboard(book.records(), options.range, resolve_now(options.now));

    let data = DashboardData {
        source: "store".to_string(),
        record_count: book.len(),
        dashboard,
    };
    success("dashboard", data)
}
