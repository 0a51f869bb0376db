pub mod aggregate;
pub mod book;
pub mod dashboard;
pub mod demo;
pub mod range;
pub mod record;

pub use aggregate::{
    CATEGORY_PALETTE, CategoryBucket, DailyBucket, HOURS_PER_DAY, StatCard, StatKind, Totals,
    Trend, build_stat_cards, category_color, compute_totals, filter_by_range, group_by_category,
    group_by_day, group_by_hour_of_day, percent_change, previous_period,
};
pub use book::SalesBook;
pub use dashboard::{Dashboard, build_dashboard};
pub use range::TimeRange;
pub use record::{Category, SaleDate, SaleDraft, SaleRecord};
