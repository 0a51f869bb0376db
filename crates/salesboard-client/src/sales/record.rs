use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Electronics,
    Clothing,
    Food,
    Books,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Electronics,
        Self::Clothing,
        Self::Food,
        Self::Books,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Food => "Food",
            Self::Books => "Books",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                "category must be one of: Electronics, Clothing, Food, Books, Other".to_string()
            })
    }
}

/// Local wall-clock moment of a sale.
///
/// Day-only values (`YYYY-MM-DD`) sit at midnight, so they bucket into hour 0.
/// Timestamps without an offset are taken as local time. Timestamps with `Z`
/// or an explicit offset are converted to local time, so they land in the
/// same hour bucket as a sale entered locally at that instant. Callers pass
/// "now" in the same local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaleDate(NaiveDateTime);

impl SaleDate {
    pub fn from_day(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }

    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if looks_like_iso_date(trimmed) {
            return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(Self::from_day);
        }

        if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(Self(zoned.with_timezone(&Local).naive_local()));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(Self)
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.0
    }

    pub fn day(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn is_day_only(&self) -> bool {
        self.0.time() == NaiveTime::MIN
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_day_only() {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
        }
    }
}

impl Serialize for SaleDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SaleDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid sale date `{raw}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: i64,
    pub amount: f64,
    pub category: Category,
    pub quantity: u32,
    pub customer_name: String,
    pub date: SaleDate,
}

impl SaleRecord {
    /// Field constraints a persisted record has to satisfy to be loaded.
    /// Names are kept exactly as entered; only an empty name is rejected.
    pub fn is_well_formed(&self) -> bool {
        self.amount.is_finite()
            && self.amount >= 0.0
            && self.quantity >= 1
            && !self.customer_name.is_empty()
    }
}

/// Unvalidated input for a new sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub customer_name: String,
    pub amount: Option<f64>,
    pub category: Category,
    pub quantity: u32,
    /// Falls back to the day of "now" when absent.
    pub date: Option<SaleDate>,
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            amount: None,
            category: Category::default(),
            quantity: 1,
            date: None,
        }
    }
}

impl SaleDraft {
    pub(crate) fn into_record(self, id: i64, now: NaiveDateTime) -> Option<SaleRecord> {
        if self.customer_name.is_empty() {
            return None;
        }
        let amount = self.amount?;

        let record = SaleRecord {
            id,
            amount,
            category: self.category,
            quantity: self.quantity,
            customer_name: self.customer_name,
            date: self
                .date
                .unwrap_or_else(|| SaleDate::from_day(now.date())),
        };
        record.is_well_formed().then_some(record)
    }
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    [0usize, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|index| bytes[*index].is_ascii_digit())
}
