use serde::Serialize;

use crate::sales::dashboard::Dashboard;
use crate::sales::record::SaleRecord;

#[derive(Debug, Clone, Serialize)]
pub struct SaleAddData {
    pub recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale: Option<SaleRecord>,
    pub message: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleListData {
    pub records: Vec<SaleRecord>,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleDeleteData {
    pub id: i64,
    pub deleted: bool,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub source: String,
    pub record_count: usize,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}
