use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, format_money, key_value_rows, render_table_or_blocks, terminal_width,
};

const SALE_COLUMNS: [Column<'static>; 6] = [
    Column {
        name: "Id",
        align: Align::Right,
    },
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Customer",
        align: Align::Left,
    },
    Column {
        name: "Category",
        align: Align::Left,
    },
    Column {
        name: "Qty",
        align: Align::Right,
    },
    Column {
        name: "Amount",
        align: Align::Right,
    },
];

pub fn render_sale_add(data: &Value) -> io::Result<String> {
    let recorded = data
        .get("recorded")
        .and_then(Value::as_bool)
        .ok_or_else(|| io::Error::other("sale add output requires recorded"))?;
    let message = value_str(data, "message");
    let record_count = value_u64(data, "record_count");

    let mut lines = vec![message, String::new()];
    if recorded && let Some(sale) = data.get("sale") {
        lines.extend(key_value_rows(
            &[
                ("Id", value_i64(sale, "id").to_string()),
                ("Customer", value_str(sale, "customerName")),
                ("Amount", format_money(value_f64(sale, "amount"))),
                ("Category", value_str(sale, "category")),
                ("Quantity", value_u64(sale, "quantity").to_string()),
                ("Date", value_str(sale, "date")),
            ],
            2,
        ));
        lines.push(String::new());
        lines.push(format!("You now have {record_count} recorded sale(s)."));
        lines.push("Run `salesboard dashboard` to see the updated metrics.".to_string());
    } else {
        lines.push("Nothing was saved. A sale needs a customer name and an amount.".to_string());
        lines.push("Run `salesboard sale add --help` for field rules.".to_string());
    }

    Ok(lines.join("\n"))
}

pub fn render_sale_list(data: &Value) -> io::Result<String> {
    let records = data
        .get("records")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("sale list output requires records"))?;

    if records.is_empty() {
        return Ok([
            "No sales recorded yet.".to_string(),
            String::new(),
            "Record one with:".to_string(),
            "  salesboard sale add --customer \"Jane Smith\" --amount 850".to_string(),
            "Or preview the dashboard with sample data:".to_string(),
            "  salesboard demo".to_string(),
        ]
        .join("\n"));
    }

    let rows = records
        .iter()
        .map(|record| {
            vec![
                value_i64(record, "id").to_string(),
                value_str(record, "date"),
                value_str(record, "customerName"),
                value_str(record, "category"),
                value_u64(record, "quantity").to_string(),
                format_money(value_f64(record, "amount")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Sales ({}):", records.len()), String::new()];
    lines.extend(render_table_or_blocks(
        &SALE_COLUMNS,
        &rows,
        terminal_width(),
        "Sale",
    ));
    Ok(lines.join("\n"))
}

pub fn render_sale_delete(data: &Value) -> io::Result<String> {
    let deleted = data
        .get("deleted")
        .and_then(Value::as_bool)
        .ok_or_else(|| io::Error::other("sale delete output requires deleted"))?;
    let id = value_i64(data, "id");
    let record_count = value_u64(data, "record_count");

    let lines = if deleted {
        vec![
            format!("Deleted sale {id}."),
            format!("{record_count} recorded sale(s) remain."),
        ]
    } else {
        vec![
            format!("No sale with id {id} was found. Nothing changed."),
            "Run `salesboard sale list` to see recorded ids.".to_string(),
        ]
    };
    Ok(lines.join("\n"))
}

fn value_str(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn value_i64(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn value_u64(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn value_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
