//! These structs provide the CLI interface for the salesdeck CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// salesdeck: Turn warehouse and retail sales data into an animated chart presentation.
///
/// The program reads a CSV of monthly sales by supplier and item, aggregates it by category, by
/// month and by supplier, and draws four slides: sales by category, sales over time, retail
/// against warehouse sales, and the top suppliers. Slides are written as SVG with SMIL animations
/// and linked together as plain HTML pages, so the presentation needs no scripting to run.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a config file with default settings.
    ///
    /// The file is written to the --config path. Edit it to point `source` at your sales CSV, which
    /// can be a local path or an http(s) URL.
    Init(InitArgs),
    /// Print the aggregated sales data as JSON.
    Summary(SummaryArgs),
    /// Render one slide and print it.
    Slide(SlideArgs),
    /// Write the whole presentation as linked HTML pages.
    Render(RenderArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The config file. It does not need to exist, defaults are used for anything missing.
    #[arg(long, global = true, env = "SALESDECK_CONFIG", default_value = "salesdeck.json")]
    config: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: PathBuf) -> Self {
        Self {
            log_level,
            config: config.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> &DisplayPath {
        &self.config
    }
}

/// (Not shown): Args for the `salesdeck init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// (Not shown): Args for the `salesdeck summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// Path or http(s) URL of the sales CSV, overriding the config file.
    #[arg(long)]
    source: Option<String>,
}

impl SummaryArgs {
    pub fn new(source: Option<String>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// The output format of a single slide.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// An SVG document.
    #[default]
    Svg,
    /// The scene description as JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(Format);
serde_plain::derive_fromstr_from_deserialize!(Format);

/// (Not shown): Args for the `salesdeck slide` command.
#[derive(Debug, Parser, Clone)]
pub struct SlideArgs {
    /// The slide number, 1 to 4.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
    number: u8,

    /// The selection shown on the slide. Slide 2 takes an item type, slide 3 a year, both also
    /// accept "all". Slide 4 takes retail, warehouse or total. Slide 1 takes no filter.
    #[arg(long)]
    filter: Option<String>,

    /// How to print the slide.
    #[arg(long, default_value_t = Format::Svg)]
    format: Format,

    /// Path or http(s) URL of the sales CSV, overriding the config file.
    #[arg(long)]
    source: Option<String>,
}

impl SlideArgs {
    pub fn new(
        number: u8,
        filter: Option<String>,
        format: Format,
        source: Option<String>,
    ) -> Self {
        Self {
            number,
            filter,
            format,
            source,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// (Not shown): Args for the `salesdeck render` command.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Path or http(s) URL of the sales CSV, overriding the config file.
    #[arg(long)]
    source: Option<String>,

    /// The directory to write the pages to, overriding the config file.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl RenderArgs {
    pub fn new(source: Option<String>, out: Option<PathBuf>) -> Self {
        Self { source, out }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slide() {
        let args = Args::parse_from([
            "salesdeck",
            "slide",
            "4",
            "--filter",
            "retail",
            "--format",
            "json",
        ]);
        match args.command() {
            Command::Slide(slide) => {
                assert_eq!(4, slide.number());
                assert_eq!(Some("retail"), slide.filter());
                assert_eq!(Format::Json, slide.format());
                assert_eq!(None, slide.source());
            }
            other => panic!("expected slide, got {other:?}"),
        }
    }

    #[test]
    fn test_slide_number_out_of_range() {
        assert!(Args::try_parse_from(["salesdeck", "slide", "5"]).is_err());
        assert!(Args::try_parse_from(["salesdeck", "slide", "0"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "salesdeck",
            "render",
            "--out",
            "site",
            "--config",
            "other.json",
            "--log-level",
            "debug",
        ]);
        assert_eq!(Path::new("other.json"), args.common().config().path());
        assert_eq!(LevelFilter::DEBUG, args.common().log_level());
        match args.command() {
            Command::Render(render) => assert_eq!(Some(Path::new("site")), render.out()),
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn test_format_display() {
        assert_eq!("svg", Format::Svg.to_string());
        assert_eq!(Format::Json, "json".parse::<Format>().unwrap());
    }
}
