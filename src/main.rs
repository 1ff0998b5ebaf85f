use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::runtime::Builder;

use nursedir::{config, server, LogDiagnostics, QueryService, RecordStore};

/// serve a read-only nurse directory from a JSON document
#[derive(Parser, Debug)]
#[clap(name ="nursedir", author, version = env!("GIT_VERSION"), about, long_about = None)]
struct Options {
    /// enable debugging logs
    #[clap(short, long, action=ArgAction::Count)]
    debug: u8,

    /// config file path
    #[clap(short, long)]
    config_path: String,

    /// override the data file path from the config
    #[clap(long)]
    data_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    rt.block_on(app())
}

async fn app() -> Result<()> {
    let opts = Options::parse();
    simple_logger::SimpleLogger::new()
        .with_utc_timestamps()
        .with_level({
            match opts.debug {
                0 => log::LevelFilter::Info,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        })
        .init()?;

    let mut config = config::parse_config(&opts.config_path)
        .await
        .context("failed to parse config file")?;

    if let Some(data_path) = opts.data_path {
        config.data_path = data_path;
    }

    if !config.data_file_exists().await {
        log::warn!(
            "data file '{}' does not exist yet, the directory is empty until it does",
            config.data_path.display()
        );
    }

    let store = RecordStore::new(&config.data_path, LogDiagnostics);
    let app_state = Arc::new(config::AppState {
        service: QueryService::new(store, LogDiagnostics),
    });

    let app = server::router(app_state, Duration::from_secs(config.timeout_secs));

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .context("failed to bind address")?;

    log::info!(
        "🚀 Server started successfully at {}:{}",
        config.host,
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
        .context("failed to serve listener")?;

    Ok(())
}
