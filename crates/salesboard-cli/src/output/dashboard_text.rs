use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, format_change, format_count, format_money, render_table_or_blocks,
    terminal_width,
};

const HOURLY_BAR_WIDTH: u64 = 20;

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let range = data
        .get("range")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("dashboard output requires range"))?;
    let range_days = data.get("range_days").and_then(Value::as_i64).unwrap_or(0);
    let is_demo = data.get("source").and_then(Value::as_str) == Some("demo");
    let width = terminal_width();

    let mut lines = vec![format!("Sales dashboard: last {range_days} days ({range})")];
    if is_demo {
        lines.push("Showing bundled sample sales. Your stored sales are untouched.".to_string());
    }
    lines.push(String::new());

    lines.push("Summary:".to_string());
    lines.extend(render_stat_cards(data, width));
    lines.push(String::new());

    let orders = data
        .pointer("/totals/total_orders")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if orders == 0 {
        lines.push(format!("No sales in the last {range_days} days."));
        lines.push(String::new());
        lines.push("Record a sale:".to_string());
        lines.push("  salesboard sale add --customer \"Jane Smith\" --amount 850".to_string());
        lines.push("Or try a wider window:".to_string());
        lines.push("  salesboard dashboard --range quarter".to_string());
        return Ok(lines.join("\n"));
    }

    lines.push("Daily activity:".to_string());
    lines.extend(render_daily(data, width));

    lines.push(String::new());
    lines.push("Revenue by category:".to_string());
    lines.extend(render_categories(data, width));

    lines.push(String::new());
    lines.push("Sales by hour of day:".to_string());
    lines.extend(render_hourly(data, width));

    Ok(lines.join("\n"))
}

fn render_stat_cards(data: &Value, width: usize) -> Vec<String> {
    let columns = [
        Column {
            name: "Metric",
            align: Align::Left,
        },
        Column {
            name: "Value",
            align: Align::Right,
        },
        Column {
            name: "Change",
            align: Align::Right,
        },
    ];
    let rows = array(data, "stat_cards")
        .iter()
        .map(|card| {
            let value = card.get("value").and_then(Value::as_f64).unwrap_or(0.0);
            let display = match card.get("kind").and_then(Value::as_str) {
                Some("revenue" | "average_order_value") => format_money(value),
                _ => format_count(value.round() as u64),
            };
            vec![
                text(card, "title"),
                display,
                format_change(card.get("change_percent").and_then(Value::as_f64)),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table_or_blocks(&columns, &rows, width, "Metric")
}

fn render_daily(data: &Value, width: usize) -> Vec<String> {
    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Revenue",
            align: Align::Right,
        },
        Column {
            name: "Orders",
            align: Align::Right,
        },
        Column {
            name: "Customers",
            align: Align::Right,
        },
    ];
    let rows = array(data, "daily")
        .iter()
        .map(|day| {
            vec![
                text(day, "date"),
                format_money(day.get("revenue").and_then(Value::as_f64).unwrap_or(0.0)),
                format_count(day.get("orders").and_then(Value::as_u64).unwrap_or(0)),
                format_count(
                    day.get("unique_customers")
                        .and_then(Value::as_u64)
                        .unwrap_or(0),
                ),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table_or_blocks(&columns, &rows, width, "Day")
}

fn render_categories(data: &Value, width: usize) -> Vec<String> {
    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Revenue",
            align: Align::Right,
        },
        Column {
            name: "Share",
            align: Align::Right,
        },
        Column {
            name: "Color",
            align: Align::Left,
        },
    ];
    let total = data
        .pointer("/totals/total_revenue")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let rows = array(data, "categories")
        .iter()
        .map(|bucket| {
            let amount = bucket
                .get("total_amount")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let share = if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            };
            vec![
                text(bucket, "category"),
                format_money(amount),
                format!("{share:.1}%"),
                text(bucket, "color"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table_or_blocks(&columns, &rows, width, "Category")
}

fn render_hourly(data: &Value, width: usize) -> Vec<String> {
    let counts = array(data, "hourly")
        .iter()
        .map(|count| count.as_u64().unwrap_or(0))
        .collect::<Vec<u64>>();
    let peak = counts.iter().copied().max().unwrap_or(0);

    let columns = [
        Column {
            name: "Hour",
            align: Align::Left,
        },
        Column {
            name: "Sales",
            align: Align::Right,
        },
        Column {
            name: "",
            align: Align::Left,
        },
    ];
    let rows = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(hour, count)| {
            let bar_len = (count * HOURLY_BAR_WIDTH).div_ceil(peak.max(1));
            vec![
                format!("{hour:02}:00"),
                format_count(*count),
                "#".repeat(bar_len as usize),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table_or_blocks(&columns, &rows, width, "Hour")
}

fn array<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use salesboard_client::sales::{TimeRange, build_dashboard, demo::demo_records};
    use serde_json::{Value, json};

    use super::render_dashboard;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 18)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn demo_data() -> Value {
        let dashboard = build_dashboard(&demo_records(now().date()), TimeRange::Week, now());
        let mut data = serde_json::to_value(dashboard).unwrap_or(Value::Null);
        if let Some(object) = data.as_object_mut() {
            object.insert("source".to_string(), json!("demo"));
            object.insert("record_count".to_string(), json!(3));
        }
        data
    }

    #[test]
    fn renders_every_dashboard_section() {
        let rendered = render_dashboard(&demo_data());
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Sales dashboard: last 7 days (week)"));
            assert!(text.contains("Showing bundled sample sales."));
            assert!(text.contains("Total Revenue"));
            assert!(text.contains("$2,500.00"));
            assert!(text.contains("Daily activity:"));
            assert!(text.contains("2026-03-16"));
            assert!(text.contains("Revenue by category:"));
            assert!(text.contains("Electronics"));
            assert!(text.contains("#3b82f6"));
            assert!(text.contains("Sales by hour of day:"));
            assert!(text.contains("00:00"));
        }
    }

    #[test]
    fn empty_window_suggests_next_steps() {
        let dashboard = build_dashboard(&[], TimeRange::Month, now());
        let data = serde_json::to_value(dashboard).unwrap_or(Value::Null);
        let rendered = render_dashboard(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Summary:"));
            assert!(text.contains("No sales in the last 30 days."));
            assert!(!text.contains("Daily activity:"));
        }
    }

    #[test]
    fn empty_window_still_reports_drop_from_previous_period() {
        let earlier = demo_records(now().date() - Duration::days(9));
        let dashboard = build_dashboard(&earlier, TimeRange::Week, now());
        let data = serde_json::to_value(dashboard).unwrap_or(Value::Null);
        let rendered = render_dashboard(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let summary_at = text.find("Summary:");
            let empty_at = text.find("No sales in the last 7 days.");
            assert!(summary_at.is_some());
            assert!(empty_at.is_some());
            assert!(summary_at < empty_at);
            assert!(text.contains("-100.0%"));
        }
    }

    #[test]
    fn missing_range_is_an_error() {
        assert!(render_dashboard(&json!({})).is_err());
    }
}
