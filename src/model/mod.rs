//! Types that represent the core data model, such as `SalesRecord` and the grouped summaries.
mod amount;
mod category;
mod record;
mod selection;
mod summary;

pub use amount::{si, Amount};
pub use category::{Category, Channel, Color, ALL_CATEGORIES};
pub use record::{parse_records, SalesRecord};
pub use selection::{Selection, ALL};
pub use summary::{
    CategorySummary, Metric, MonthSummary, Period, Summary, SupplierSummary, TimeSummary,
    YearSummary,
};
