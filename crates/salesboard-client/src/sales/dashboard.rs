use chrono::NaiveDateTime;
use serde::Serialize;

use crate::sales::aggregate::{
    CategoryBucket, DailyBucket, HOURS_PER_DAY, StatCard, Totals, build_stat_cards,
    compute_totals, filter_by_range, group_by_category, group_by_day, group_by_hour_of_day,
    percent_change, previous_period,
};
use crate::sales::range::TimeRange;
use crate::sales::record::SaleRecord;

/// Every derived series for one record snapshot and time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub range: TimeRange,
    pub range_days: i64,
    pub generated_at: NaiveDateTime,
    pub totals: Totals,
    pub previous_totals: Totals,
    pub revenue_change_percent: f64,
    pub orders_change_percent: f64,
    pub stat_cards: [StatCard; 4],
    pub daily: Vec<DailyBucket>,
    pub categories: Vec<CategoryBucket>,
    pub hourly: [usize; HOURS_PER_DAY],
}

pub fn build_dashboard(records: &[SaleRecord], range: TimeRange, now: NaiveDateTime) -> Dashboard {
    let filtered = filter_by_range(records, range, now);
    let previous = previous_period(records, range, now);

    let totals = compute_totals(&filtered);
    let previous_totals = compute_totals(&previous);

    Dashboard {
        range,
        range_days: range.days(),
        generated_at: now,
        revenue_change_percent: percent_change(
            totals.total_revenue,
            previous_totals.total_revenue,
        ),
        orders_change_percent: percent_change(
            totals.total_orders as f64,
            previous_totals.total_orders as f64,
        ),
        stat_cards: build_stat_cards(&totals, &previous_totals),
        daily: group_by_day(&filtered),
        categories: group_by_category(&filtered),
        hourly: group_by_hour_of_day(&filtered),
        totals,
        previous_totals,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::build_dashboard;
    use crate::sales::range::TimeRange;
    use crate::sales::record::{Category, SaleDate, SaleRecord};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 20)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .unwrap_or_default()
    }

    fn sale(id: i64, amount: f64, days_ago: i64) -> SaleRecord {
        SaleRecord {
            id,
            amount,
            category: Category::Food,
            quantity: 1,
            customer_name: format!("customer-{id}"),
            date: SaleDate::from_day(now().date() - Duration::days(days_ago)),
        }
    }

    #[test]
    fn dashboard_compares_against_previous_window() {
        let records = vec![sale(1, 150.0, 1), sale(2, 60.0, 10), sale(3, 40.0, 12)];
        let dashboard = build_dashboard(&records, TimeRange::Week, now());

        assert_eq!(dashboard.range_days, 7);
        assert_eq!(dashboard.totals.total_revenue, 150.0);
        assert_eq!(dashboard.previous_totals.total_revenue, 100.0);
        assert_eq!(dashboard.revenue_change_percent, 50.0);
        assert_eq!(dashboard.orders_change_percent, -50.0);
        assert_eq!(dashboard.daily.len(), 1);
        assert_eq!(dashboard.categories.len(), 1);
        assert_eq!(dashboard.hourly.iter().sum::<usize>(), 1);
    }

    #[test]
    fn empty_dashboard_serializes_zeroed_series() {
        let dashboard = build_dashboard(&[], TimeRange::Quarter, now());
        let value = serde_json::to_value(&dashboard);
        assert!(value.is_ok());
        if let Ok(json) = value {
            assert_eq!(json["range"], "quarter");
            assert_eq!(json["totals"]["total_orders"], 0);
            assert_eq!(json["totals"]["unique_customers"], 0);
            assert_eq!(json["hourly"].as_array().map(Vec::len), Some(24));
            assert_eq!(json["stat_cards"][1]["change_percent"], serde_json::Value::Null);
            assert_eq!(json["daily"].as_array().map(Vec::len), Some(0));
        }
    }
}
