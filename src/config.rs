//! Configuration file handling for salesdeck.
//!
//! The configuration file defaults to `salesdeck.json` in the working directory and holds the
//! data source location, the output directory for the rendered deck and a few presentation
//! settings. The file is optional: when it does not exist the defaults are used.

use crate::slides::RenderOptions;
use crate::source::web_url;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "salesdeck";
const CONFIG_VERSION: u8 = 1;
const DEFAULT_SOURCE: &str = "Warehouse_and_Retail_Sales.csv";
const DEFAULT_OUTPUT_DIR: &str = "deck";
const DEFAULT_TITLE: &str = "Warehouse and Retail Sales";

/// The `Config` object represents the configuration of the app. It is loaded from the config file
/// path and can then be adjusted by command line overrides.
#[derive(Debug, Clone)]
pub struct Config {
    config_path: PathBuf,
    config_file: ConfigFile,
    source: Option<String>,
    output_dir: Option<PathBuf>,
}

impl Config {
    /// Writes a config file with default settings to `path`.
    ///
    /// # Errors
    /// - The file already exists and `force` is false.
    /// - The file cannot be written.
    pub async fn create(path: impl Into<PathBuf>, force: bool) -> Result<Self> {
        let config_path = path.into();
        if config_path.exists() && !force {
            bail!(
                "The config file '{}' already exists, use --force to overwrite it",
                config_path.display()
            )
        }
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                utils::make_dir(parent).await?;
            }
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;
        Ok(Self::new(config_path, config_file))
    }

    /// Loads the config file at `path`, or the defaults when there is no file there.
    ///
    /// # Errors
    /// - The file exists but cannot be read, is not valid JSON, or is not a salesdeck config.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = path.into();
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            debug!(
                "No config file at '{}', using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        Ok(Self::new(config_path, config_file))
    }

    fn new(config_path: PathBuf, config_file: ConfigFile) -> Self {
        Self {
            config_path,
            config_file,
            source: None,
            output_dir: None,
        }
    }

    /// Overrides the data source from the config file, if `source` is given.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        if source.is_some() {
            self.source = source;
        }
        self
    }

    /// Overrides the output directory from the config file, if `output_dir` is given.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The path or URL of the sales CSV. A relative path from the config file is resolved against
    /// the directory holding the config file; a command line override is used as given.
    pub fn source(&self) -> String {
        if let Some(source) = &self.source {
            return source.clone();
        }
        let source = &self.config_file.source;
        if web_url(source).is_some() {
            return source.clone();
        }
        self.relative_to_config(Path::new(source))
            .to_string_lossy()
            .into_owned()
    }

    /// Where `render` writes the deck. Relative paths are resolved the same way as `source`.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self.relative_to_config(&self.config_file.output_dir),
        }
    }

    fn relative_to_config(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.parent() {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    pub fn title(&self) -> &str {
        &self.config_file.title
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            top_suppliers: self.config_file.top_suppliers,
            label_width: self.config_file.label_width,
        }
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "salesdeck",
///   "config_version": 1,
///   "source": "Warehouse_and_Retail_Sales.csv",
///   "output_dir": "deck",
///   "title": "Warehouse and Retail Sales",
///   "top_suppliers": 10,
///   "label_width": 30
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "salesdeck"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path or http(s) URL of the sales CSV
    #[serde(default = "default_source")]
    source: String,

    /// Directory the rendered deck is written to
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,

    /// Presentation title shown on every page
    #[serde(default = "default_title")]
    title: String,

    /// Number of suppliers ranked on the supplier slide
    #[serde(default = "default_top_suppliers")]
    top_suppliers: usize,

    /// Supplier names longer than this are shortened on the axis
    #[serde(default = "default_label_width")]
    label_width: usize,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_top_suppliers() -> usize {
    RenderOptions::default().top_suppliers
}

fn default_label_width() -> usize {
    RenderOptions::default().label_width
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            source: default_source(),
            output_dir: default_output_dir(),
            title: default_title(),
            top_suppliers: default_top_suppliers(),
            label_width: default_label_width(),
        }
    }
}

impl ConfigFile {
    /// Loads and validates a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings.
    async fn load(path: &Path) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.top_suppliers >= 1,
            "Invalid top_suppliers in config file: must be at least 1"
        );
        ensure!(
            config.label_width >= 1,
            "Invalid label_width in config file: must be at least 1"
        );

        Ok(config)
    }

    async fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }
}
