use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const DEFAULT_WIDTH: usize = 100;
const MIN_WIDTH: usize = 40;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_WIDTH);
    cmp::max(from_env, MIN_WIDTH)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Aligned table when every cell fits `max_width`; otherwise one labeled
/// key/value block per row.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let table_width =
        INDENT + widths.iter().sum::<usize>() + COLUMN_GAP * columns.len().saturating_sub(1);
    if table_width > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let mut output = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            output.push(String::new());
        }
        output.push(format!("{}{block_label} {}", " ".repeat(INDENT), index + 1));

        let entries = columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                let value = row.get(column_index).cloned().unwrap_or_default();
                (column.name, value)
            })
            .collect::<Vec<(&str, String)>>();
        output.extend(key_value_rows(&entries, INDENT * 2));
    }
    output
}

/// `$1,234.50` style amounts; negatives keep the sign before the symbol.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

pub fn format_count(count: u64) -> String {
    group_thousands(count)
}

/// Signed one-decimal percentage; untracked changes show as `+0%`.
pub fn format_change(change_percent: Option<f64>) -> String {
    match change_percent {
        Some(value) if value >= 0.0 => format!("+{value:.1}%"),
        Some(value) => format!("{value:.1}%"),
        None => "+0%".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{
        Align, Column, format_change, format_count, format_money, key_value_rows,
        render_table_or_blocks,
    };

    fn columns() -> [Column<'static>; 2] {
        [
            Column {
                name: "Customer",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ]
    }

    #[test]
    fn renders_aligned_table_when_it_fits() {
        let rows = vec![
            vec!["Jane Smith".to_string(), "$850.00".to_string()],
            vec!["Bo".to_string(), "$1,200.00".to_string()],
        ];
        let lines = render_table_or_blocks(&columns(), &rows, 80, "Sale");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  Customer       Amount");
        assert_eq!(lines[1], "  Jane Smith    $850.00");
        assert_eq!(lines[2], "  Bo          $1,200.00");
    }

    #[test]
    fn falls_back_to_blocks_when_too_wide() {
        let rows = vec![vec!["A very long customer name".to_string(), "$1.00".to_string()]];
        let lines = render_table_or_blocks(&columns(), &rows, 20, "Sale");
        assert_eq!(lines[0], "  Sale 1");
        assert_eq!(lines[1], "    Customer  A very long customer name");
        assert_eq!(lines[2], "    Amount    $1.00");
    }

    #[test]
    fn key_value_rows_pad_labels() {
        let lines = key_value_rows(&[("Id", "7".to_string()), ("Customer", "Ada".to_string())], 2);
        assert_eq!(lines, vec!["  Id        7", "  Customer  Ada"]);
    }

    #[test]
    fn money_and_counts_use_grouping() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(2500.0), "$2,500.00");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-12.5), "-$12.50");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
    }

    #[test]
    fn change_is_signed_with_one_decimal() {
        assert_eq!(format_change(Some(100.0)), "+100.0%");
        assert_eq!(format_change(Some(0.0)), "+0.0%");
        assert_eq!(format_change(Some(-33.3)), "-33.3%");
        assert_eq!(format_change(None), "+0%");
    }
}
