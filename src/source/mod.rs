//! Where the sales CSV comes from, and loading it into a `Dataset`.
//!
//! A source is a local file path or an `http`/`https` URL. Either way the whole resource is
//! fetched once, parsed, and aggregated.

mod file;
mod http;
mod memory;

use crate::aggregate::Dataset;
use crate::model::parse_records;
use crate::Result;
use anyhow::Context;
use tracing::{debug, info};
use url::Url;

pub use file::FileSource;
pub use http::HttpSource;
pub use memory::MemorySource;

/// Something that can produce the CSV text of the sales data.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// A human-readable location used in logs and errors.
    fn describe(&self) -> String;

    /// Fetches the full text of the resource.
    async fn fetch(&self) -> Result<String>;
}

/// Chooses a source for `location`: an `http` or `https` URL is fetched over the network,
/// anything else is read as a file path.
pub fn source(location: &str) -> Box<dyn DataSource> {
    match web_url(location) {
        Some(url) => Box::new(HttpSource::new(url)),
        None => Box::new(FileSource::new(location)),
    }
}

/// `location` as a URL, if it is an `http` or `https` one.
pub fn web_url(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Fetches, parses and aggregates the data behind `source`.
///
/// # Errors
/// - The resource cannot be fetched.
/// - The resource is not structurally valid CSV.
pub async fn load(source: &dyn DataSource) -> Result<Dataset> {
    let location = source.describe();
    debug!("Fetching sales data from {location}");
    let text = source
        .fetch()
        .await
        .with_context(|| format!("Unable to load sales data from {location}"))?;
    let records = parse_records(&text)
        .with_context(|| format!("Unable to parse sales data from {location}"))?;
    info!("Loaded {} sales records from {location}", records.len());
    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::SAMPLE_CSV;
    use tempfile::TempDir;

    #[test]
    fn test_source_selection() {
        assert!(source("https://example.com/sales.csv")
            .describe()
            .starts_with("https://example.com/"));
        assert_eq!("data/sales.csv", source("data/sales.csv").describe());
        assert_eq!(
            "Warehouse_and_Retail_Sales.csv",
            source("Warehouse_and_Retail_Sales.csv").describe()
        );
        // Non-web schemes are treated as paths.
        assert_eq!("c:/sales.csv", source("c:/sales.csv").describe());
    }

    #[tokio::test]
    async fn test_load_from_memory() {
        let data = load(&MemorySource::new(SAMPLE_CSV)).await.unwrap();
        assert_eq!(5, data.records().len());
        assert_eq!(vec!["WINE", "BEER", "LIQUOR"], data.item_types());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let source = source(path.to_str().unwrap());
        let data = load(source.as_ref()).await.unwrap();
        assert_eq!(5, data.records().len());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let source = source(path.to_str().unwrap());
        let err = load(source.as_ref()).await.unwrap_err();
        assert!(err.to_string().contains("Unable to load sales data"));
    }
}
