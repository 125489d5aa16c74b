use clap::Parser;
use sales_deck::args::{Args, Command};
use sales_deck::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let config_path = args.common().config().path();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(config_path, init_args.force())
            .await?
            .print(),

        Command::Summary(summary_args) => {
            let config = Config::load(config_path)
                .await?
                .with_source(summary_args.source().map(String::from));
            commands::summary(&config).await?.print_json()?
        }

        Command::Slide(slide_args) => {
            let config = Config::load(config_path)
                .await?
                .with_source(slide_args.source().map(String::from));
            commands::slide(
                &config,
                slide_args.number(),
                slide_args.filter(),
                slide_args.format(),
            )
            .await?
            .print_display()
        }

        Command::Render(render_args) => {
            let config = Config::load(config_path)
                .await?
                .with_source(render_args.source().map(String::from))
                .with_output_dir(render_args.out().map(|p| p.to_path_buf()));
            commands::render(&config).await?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // The library target is named after the package, the binary is not.
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
