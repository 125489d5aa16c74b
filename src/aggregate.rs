//! Group-by-sum summaries over the loaded records.
//!
//! A `Dataset` is built once from the loaded records and is read-only afterwards. Every slide
//! renders from a shared reference to it. Groups keep the order in which their key was first
//! encountered in the records.

use crate::model::{
    CategorySummary, Metric, MonthSummary, Period, SalesRecord, Selection, Summary,
    SupplierSummary, TimeSummary, YearSummary,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use tracing::{debug, warn};

/// The loaded records together with the summaries derived from them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    by_category: Vec<CategorySummary>,
    by_time: TimeSummary,
    by_supplier: Vec<SupplierSummary>,
}

/// One point of the time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    pub period: Period,
    pub date: NaiveDate,
    pub value: f64,
}

/// Retail and warehouse totals for one item type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelTotals {
    pub item_type: String,
    pub retail: f64,
    pub warehouse: f64,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        let by_category = rollup(&records, |r| r.item_type().to_string())
            .into_iter()
            .map(|(item_type, summary)| CategorySummary { item_type, summary })
            .collect::<Vec<_>>();
        let by_time = time_summary(&records);
        let by_supplier = supplier_summary(&records);
        debug!(
            "Aggregated {} records into {} categories, {} years and {} suppliers",
            records.len(),
            by_category.len(),
            by_time.years().len(),
            by_supplier.len()
        );
        Self {
            records,
            by_category,
            by_time,
            by_supplier,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_category(&self) -> &[CategorySummary] {
        &self.by_category
    }

    pub fn by_time(&self) -> &TimeSummary {
        &self.by_time
    }

    pub fn by_supplier(&self) -> &[SupplierSummary] {
        &self.by_supplier
    }

    /// Sums over every record.
    pub fn grand_total(&self) -> Summary {
        self.records.iter().collect()
    }

    /// Distinct item types in first-encountered order.
    pub fn item_types(&self) -> Vec<&str> {
        self.by_category.iter().map(|c| c.item_type()).collect()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Category summaries ordered by descending total, ties in first-encountered order.
    pub fn categories_by_total(&self) -> Vec<&CategorySummary> {
        let mut ranked = self.by_category.iter().enumerate().collect::<Vec<_>>();
        ranked.sort_by(|(ia, a), (ib, b)| {
            b.summary()
                .total_sales()
                .total_cmp(&a.summary().total_sales())
                .then(ia.cmp(ib))
        });
        ranked.into_iter().map(|(_, c)| c).collect()
    }

    /// Total sales per month, ascending by date. Periods that fall on the same calendar month
    /// are summed into one point.
    ///
    /// Selecting every item type reads the precomputed time summary. Selecting one item type
    /// re-scans the records of that type.
    pub fn time_series(&self, item_type: &Selection<String>) -> Vec<TimePoint> {
        let periods: Vec<(Period, f64)> = match item_type {
            Selection::All => self
                .by_time
                .flatten()
                .map(|(period, summary)| (period, summary.total_sales()))
                .collect(),
            Selection::Only(only) => rollup(
                self.records.iter().filter(|r| r.item_type() == only.as_str()),
                |r| Period::new(r.year(), r.month()),
            )
            .into_iter()
            .map(|(period, summary)| (period, summary.total_sales()))
            .collect(),
        };

        let mut points: Vec<TimePoint> = Vec::with_capacity(periods.len());
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();
        for (period, value) in periods {
            match period.date() {
                // Rolled-over months land on the same date as the month they roll into.
                Some(date) => match index.get(&date) {
                    Some(&ix) => points[ix].value += value,
                    None => {
                        index.insert(date, points.len());
                        points.push(TimePoint {
                            period,
                            date,
                            value,
                        });
                    }
                },
                None => warn!(
                    "Skipping sales for year {} month {}, it is not a calendar month",
                    period.year(),
                    period.month()
                ),
            }
        }
        points.sort_by_key(|p| p.date);
        points
    }

    /// Retail and warehouse totals per item type for the selected year.
    pub fn channel_totals(&self, year: &Selection<i32>) -> Vec<ChannelTotals> {
        rollup(
            self.records.iter().filter(|r| year.admits(&r.year())),
            |r| r.item_type().to_string(),
        )
        .into_iter()
        .map(|(item_type, summary)| ChannelTotals {
            item_type,
            retail: summary.retail_sales(),
            warehouse: summary.warehouse_sales(),
        })
        .collect()
    }

    /// The `n` suppliers with the largest `metric`, ties in first-encountered order.
    pub fn top_suppliers(&self, metric: Metric, n: usize) -> Vec<&SupplierSummary> {
        let mut ranked = self.by_supplier.iter().enumerate().collect::<Vec<_>>();
        ranked.sort_by(|(ia, a), (ib, b)| {
            b.summary()
                .metric(metric)
                .total_cmp(&a.summary().metric(metric))
                .then(ia.cmp(ib))
        });
        ranked.into_iter().take(n).map(|(_, s)| s).collect()
    }
}

/// Groups `records` by `key` and sums each group. Groups are returned in the order their key was
/// first encountered.
fn rollup<'a, K, F>(records: impl IntoIterator<Item = &'a SalesRecord>, key: F) -> Vec<(K, Summary)>
where
    K: Eq + Hash + Clone,
    F: Fn(&SalesRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Summary)> = Vec::new();
    for record in records {
        let k = key(record);
        let ix = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Summary::default()));
            groups.len() - 1
        });
        groups[ix].1.add(record);
    }
    groups
}

fn time_summary(records: &[SalesRecord]) -> TimeSummary {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut by_year: Vec<(i32, Vec<&SalesRecord>)> = Vec::new();
    for record in records {
        let ix = *index.entry(record.year()).or_insert_with(|| {
            by_year.push((record.year(), Vec::new()));
            by_year.len() - 1
        });
        by_year[ix].1.push(record);
    }

    let years = by_year
        .into_iter()
        .map(|(year, year_records)| YearSummary {
            year,
            months: rollup(year_records, |r| r.month())
                .into_iter()
                .map(|(month, summary)| MonthSummary { month, summary })
                .collect(),
        })
        .collect();
    TimeSummary { years }
}

fn supplier_summary(records: &[SalesRecord]) -> Vec<SupplierSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut suppliers: Vec<SupplierSummary> = Vec::new();
    for record in records {
        let ix = *index.entry(record.supplier()).or_insert_with(|| {
            suppliers.push(SupplierSummary {
                supplier: record.supplier().to_string(),
                item_type: record.item_type().to_string(),
                mixed_item_types: false,
                summary: Summary::default(),
            });
            suppliers.len() - 1
        });
        let supplier = &mut suppliers[ix];
        if supplier.item_type != record.item_type() {
            supplier.mixed_item_types = true;
        }
        supplier.summary.add(record);
    }

    for supplier in suppliers.iter().filter(|s| s.mixed_item_types) {
        warn!(
            "Supplier '{}' sells more than one item type, showing it as '{}'",
            supplier.supplier, supplier.item_type
        );
    }
    suppliers
}
