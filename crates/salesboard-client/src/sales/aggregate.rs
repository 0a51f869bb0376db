//! Pure aggregations over a snapshot of sale records.
//!
//! Every function borrows its input and returns freshly owned results, so a
//! caller can run them against any record set without coordinating state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::sales::range::TimeRange;
use crate::sales::record::{Category, SaleRecord};

pub const HOURS_PER_DAY: usize = 24;

/// Display colors assigned to categories by first-seen index.
pub const CATEGORY_PALETTE: [&str; 5] = ["#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub unique_customers: usize,
}

impl Totals {
    pub fn average_order_value(&self) -> f64 {
        if self.total_orders == 0 {
            return 0.0;
        }
        self.total_revenue / self.total_orders as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: usize,
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub total_amount: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Revenue,
    UniqueCustomers,
    TotalOrders,
    AverageOrderValue,
}

impl StatKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Revenue => "Total Revenue",
            Self::UniqueCustomers => "Unique Customers",
            Self::TotalOrders => "Total Orders",
            Self::AverageOrderValue => "Avg Order Value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub kind: StatKind,
    pub title: &'static str,
    pub value: f64,
    /// `None` for metrics whose period-over-period trend is not tracked.
    pub change_percent: Option<f64>,
    pub trend: Trend,
}

impl StatCard {
    fn tracked(kind: StatKind, value: f64, change_percent: f64) -> Self {
        let trend = if change_percent >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        };
        Self {
            kind,
            title: kind.title(),
            value,
            change_percent: Some(change_percent),
            trend,
        }
    }

    fn untracked(kind: StatKind, value: f64) -> Self {
        Self {
            kind,
            title: kind.title(),
            value,
            change_percent: None,
            trend: Trend::Neutral,
        }
    }
}

/// Records dated at or after `now - range`.
pub fn filter_by_range(
    records: &[SaleRecord],
    range: TimeRange,
    now: NaiveDateTime,
) -> Vec<SaleRecord> {
    let cutoff = now - range.span();
    records
        .iter()
        .filter(|record| record.date.timestamp() >= cutoff)
        .cloned()
        .collect()
}

/// Records in the window of equal length immediately before the current one.
///
/// The interval is half-open, `[cutoff - range, cutoff)`, so together with
/// [`filter_by_range`] every record from `cutoff - range` on lands in exactly
/// one of the two periods.
pub fn previous_period(
    records: &[SaleRecord],
    range: TimeRange,
    now: NaiveDateTime,
) -> Vec<SaleRecord> {
    let cutoff = now - range.span();
    let previous_cutoff = cutoff - range.span();
    records
        .iter()
        .filter(|record| {
            let timestamp = record.date.timestamp();
            timestamp >= previous_cutoff && timestamp < cutoff
        })
        .cloned()
        .collect()
}

pub fn compute_totals(filtered: &[SaleRecord]) -> Totals {
    let customers = filtered
        .iter()
        .map(|record| record.customer_name.as_str())
        .collect::<BTreeSet<&str>>();

    Totals {
        total_revenue: filtered.iter().map(|record| record.amount).sum(),
        total_orders: filtered.len(),
        unique_customers: customers.len(),
    }
}

/// Percent change rounded to one decimal place.
///
/// Returns 0 whenever `previous` is not positive; a zero result therefore
/// means either "no change" or "no baseline".
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 || !previous.is_finite() {
        return 0.0;
    }
    let raw = ((current - previous) / previous) * 100.0;
    // `+ 0.0` folds a rounded `-0.0` into `0.0`.
    (raw * 10.0).round() / 10.0 + 0.0
}

/// Per-day revenue, order and customer counts in ascending date order.
///
/// Amounts are summed per day, so the bucket revenues can differ from
/// [`compute_totals`] in the last floating-point digits; compare with a
/// tolerance rather than exactly.
pub fn group_by_day(filtered: &[SaleRecord]) -> Vec<DailyBucket> {
    #[derive(Default)]
    struct DayAccumulator<'a> {
        revenue: f64,
        orders: usize,
        customers: BTreeSet<&'a str>,
    }

    let mut days: BTreeMap<NaiveDate, DayAccumulator<'_>> = BTreeMap::new();
    for record in filtered {
        let entry = days.entry(record.date.day()).or_default();
        entry.revenue += record.amount;
        entry.orders += 1;
        entry.customers.insert(record.customer_name.as_str());
    }

    days.into_iter()
        .map(|(date, day)| DailyBucket {
            date,
            revenue: day.revenue,
            orders: day.orders,
            unique_customers: day.customers.len(),
        })
        .collect()
}

/// Per-category revenue in first-seen order.
pub fn group_by_category(filtered: &[SaleRecord]) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    for record in filtered {
        match buckets
            .iter_mut()
            .find(|bucket| bucket.category == record.category)
        {
            Some(bucket) => bucket.total_amount += record.amount,
            None => {
                let color = category_color(buckets.len());
                buckets.push(CategoryBucket {
                    category: record.category,
                    total_amount: record.amount,
                    color,
                });
            }
        }
    }
    buckets
}

pub const fn category_color(index: usize) -> &'static str {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// Sale counts per hour of day, zero-filled.
pub fn group_by_hour_of_day(filtered: &[SaleRecord]) -> [usize; HOURS_PER_DAY] {
    let mut hours = [0usize; HOURS_PER_DAY];
    for record in filtered {
        // `hour()` is always in 0..24.
        if let Some(slot) = hours.get_mut(record.date.hour() as usize) {
            *slot += 1;
        }
    }
    hours
}

pub fn build_stat_cards(totals: &Totals, previous: &Totals) -> [StatCard; 4] {
    let average = totals.average_order_value();
    [
        StatCard::tracked(
            StatKind::Revenue,
            totals.total_revenue,
            percent_change(totals.total_revenue, previous.total_revenue),
        ),
        StatCard::untracked(StatKind::UniqueCustomers, totals.unique_customers as f64),
        StatCard::tracked(
            StatKind::TotalOrders,
            totals.total_orders as f64,
            percent_change(totals.total_orders as f64, previous.total_orders as f64),
        ),
        StatCard::tracked(
            StatKind::AverageOrderValue,
            average,
            percent_change(average, previous.average_order_value()),
        ),
    ]
}
