use chrono::NaiveDateTime;

use crate::ClientResult;
use crate::commands::common::resolve_now;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashboardData;
use crate::sales::dashboard::build_dashboard;
use crate::sales::demo::demo_records;
use crate::sales::range::TimeRange;

#[derive(Debug, Default)]
pub struct DemoRunOptions {
    pub range: TimeRange,
    pub now: Option<NaiveDateTime>,
}

/// Dashboard over the bundled sample sales; the store is never opened.
pub fn run(range: TimeRange) -> ClientResult<SuccessEnvelope> {
    run_with_options(DemoRunOptions { range, now: None })
}

#[doc(hidden)]
pub fn run_with_options(options: DemoRunOptions) -> ClientResult<SuccessEnvelope> {
    let now = resolve_now(options.now);
    let records = demo_records(now.date());

    let data = DashboardData {
        source: "demo".to_string(),
        record_count: records.len(),
        dashboard: build_dashboard(&records, options.range, now),
    };
    success("demo", data)
}
