use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Writes a config file with default settings to `config_path`.
///
/// # Errors
/// - The file exists and `force` is false, or it cannot be written.
pub async fn init(config_path: &Path, force: bool) -> Result<Out<()>> {
    let config = Config::create(config_path, force)
        .await
        .context("Unable to create the config file")?;
    Ok(format!(
        "Wrote the default configuration to {}",
        config.config_path().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salesdeck.json");
        let out = init(&path, false).await.unwrap();
        assert!(out.message().contains("salesdeck.json"));
        assert!(path.is_file());
        assert!(init(&path, false).await.is_err());
        assert!(init(&path, true).await.is_ok());
    }
}
