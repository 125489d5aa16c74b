use crate::commands::Out;
use crate::deck::Deck;
use crate::source::{self, DataSource};
use crate::{Config, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The files written by `render`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub output_dir: PathBuf,
    pub pages: Vec<PathBuf>,
}

/// Loads the configured source and writes the whole deck to the configured output directory.
pub async fn render(config: &Config) -> Result<Out<RenderReport>> {
    let source = source::source(&config.source());
    write_deck(source.as_ref(), config, &config.output_dir()).await
}

pub(super) async fn write_deck(
    source: &dyn DataSource,
    config: &Config,
    output_dir: &Path,
) -> Result<Out<RenderReport>> {
    let data = source::load(source).await?;
    let deck = Deck::new(&data, config.title(), config.render_options());
    let pages = deck.write(output_dir).await?;
    let report = RenderReport {
        output_dir: output_dir.to_path_buf(),
        pages,
    };
    Ok(Out::new(
        format!(
            "Wrote {} pages to {}, open {} to start",
            report.pages.len(),
            output_dir.display(),
            output_dir.join(crate::deck::INDEX_HTML).display()
        ),
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::test::SAMPLE_CSV;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_deck() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path().join("salesdeck.json"))
            .await
            .unwrap();
        let out_dir = dir.path().join("site");
        let out = write_deck(&MemorySource::new(SAMPLE_CSV), &config, &out_dir)
            .await
            .unwrap();
        let report = out.structure().unwrap();
        assert_eq!(12, report.pages.len());
        assert!(report.pages.iter().all(|p| p.is_file()));
        assert!(out_dir.join("slide-4-warehouse.html").is_file());
        assert!(out.message().starts_with("Wrote 12 pages"));
    }
}
