use crate::model::SalesRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summed sales for a group of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    retail_sales: f64,
    warehouse_sales: f64,
    total_sales: f64,
}

impl Summary {
    pub fn new(retail_sales: f64, warehouse_sales: f64) -> Self {
        Self {
            retail_sales,
            warehouse_sales,
            total_sales: retail_sales + warehouse_sales,
        }
    }

    pub(crate) fn add(&mut self, record: &SalesRecord) {
        self.retail_sales += record.retail_sales();
        self.warehouse_sales += record.warehouse_sales();
        self.total_sales += record.total_sales();
    }

    pub fn retail_sales(&self) -> f64 {
        self.retail_sales
    }

    pub fn warehouse_sales(&self) -> f64 {
        self.warehouse_sales
    }

    pub fn total_sales(&self) -> f64 {
        self.total_sales
    }

    /// The value of the given metric.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Retail => self.retail_sales,
            Metric::Warehouse => self.warehouse_sales,
            Metric::Total => self.total_sales,
        }
    }
}

impl<'a> FromIterator<&'a SalesRecord> for Summary {
    fn from_iter<T: IntoIterator<Item = &'a SalesRecord>>(iter: T) -> Self {
        let mut summary = Summary::default();
        for record in iter {
            summary.add(record);
        }
        summary
    }
}

/// Which sales figure to rank and scale by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Retail,
    Warehouse,
    #[default]
    Total,
}

serde_plain::derive_display_from_serialize!(Metric);
serde_plain::derive_fromstr_from_deserialize!(Metric);

/// Sales for one item type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategorySummary {
    pub(crate) item_type: String,
    #[serde(flatten)]
    pub(crate) summary: Summary,
}

impl CategorySummary {
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Sales for one supplier.
///
/// `item_type` comes from the first record encountered for the supplier. When the supplier's
/// records carry more than one item type, `mixed_item_types` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SupplierSummary {
    pub(crate) supplier: String,
    pub(crate) item_type: String,
    pub(crate) mixed_item_types: bool,
    #[serde(flatten)]
    pub(crate) summary: Summary,
}

impl SupplierSummary {
    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn mixed_item_types(&self) -> bool {
        self.mixed_item_types
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Sales nested by year, then by month, both in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSummary {
    pub(crate) years: Vec<YearSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub(crate) year: i32,
    pub(crate) months: Vec<MonthSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub(crate) month: i32,
    #[serde(flatten)]
    pub(crate) summary: Summary,
}

impl TimeSummary {
    pub fn years(&self) -> &[YearSummary] {
        &self.years
    }

    /// Every (period, summary) pair, in nesting order.
    pub fn flatten(&self) -> impl Iterator<Item = (Period, &Summary)> + '_ {
        self.years.iter().flat_map(|y| {
            y.months
                .iter()
                .map(move |m| (Period::new(y.year, m.month), &m.summary))
        })
    }
}

impl YearSummary {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &[MonthSummary] {
        &self.months
    }
}

impl MonthSummary {
    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// A calendar month. Months outside `1..=12` roll over into the neighboring years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: i32,
}

impl Period {
    pub fn new(year: i32, month: i32) -> Self {
        Self { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    /// Months since year zero, with January as month zero.
    pub fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// The first day of the month, or `None` when it cannot be represented.
    pub fn date(&self) -> Option<NaiveDate> {
        let index = self.index();
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12) + 1).ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    }
}
