use chrono::{Duration, NaiveDate};

use crate::sales::record::{Category, SaleDate, SaleRecord};

/// Bundled sample sales relative to `today`.
pub fn demo_records(today: NaiveDate) -> Vec<SaleRecord> {
    vec![
        SaleRecord {
            id: 1,
            amount: 1200.0,
            category: Category::Electronics,
            quantity: 2,
            customer_name: "John Doe".to_string(),
            date: SaleDate::from_day(today - Duration::days(1)),
        },
        SaleRecord {
            id: 2,
            amount: 850.0,
            category: Category::Clothing,
            quantity: 3,
            customer_name: "Jane Smith".to_string(),
            date: SaleDate::from_day(today - Duration::days(2)),
        },
        SaleRecord {
            id: 3,
            amount: 450.0,
            category: Category::Food,
            quantity: 5,
            customer_name: "Bob Johnson".to_string(),
            date: SaleDate::from_day(today),
        },
    ]
}
