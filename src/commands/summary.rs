use crate::aggregate::Dataset;
use crate::commands::Out;
use crate::model::{CategorySummary, Summary, SupplierSummary, TimeSummary};
use crate::source::{self, DataSource};
use crate::{Config, Result};
use serde::Serialize;

/// The three rollups of the data plus the totals over every record.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub source: String,
    pub records: usize,
    pub grand_total: Summary,
    pub by_category: Vec<CategorySummary>,
    pub by_time: TimeSummary,
    pub by_supplier: Vec<SupplierSummary>,
}

impl SummaryReport {
    pub fn new(source: impl Into<String>, data: &Dataset) -> Self {
        Self {
            source: source.into(),
            records: data.records().len(),
            grand_total: data.grand_total(),
            by_category: data.by_category().to_vec(),
            by_time: data.by_time().clone(),
            by_supplier: data.by_supplier().to_vec(),
        }
    }
}

/// Loads the configured source and summarizes it.
pub async fn summary(config: &Config) -> Result<Out<SummaryReport>> {
    let source = source::source(&config.source());
    summarize(source.as_ref()).await
}

pub(super) async fn summarize(source: &dyn DataSource) -> Result<Out<SummaryReport>> {
    let data = source::load(source).await?;
    let report = SummaryReport::new(source.describe(), &data);
    Ok(Out::new(
        format!(
            "Summarized {} records into {} categories and {} suppliers",
            report.records,
            report.by_category.len(),
            report.by_supplier.len()
        ),
        report,
    ))
}
