use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use calendar_clone::{
    api::{serve, AppState},
    holidays,
    storage::{config::LoggingConfig, Config, EventStore},
};

mod cli;
use cli::{parse_cli_options, run_seed_mode, CliMode, USAGE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = match parse_cli_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return Ok(());
        }
    };

    let mut config = match &options.config_path {
        Some(path) => Config::load_or_create_at(path),
        None => Config::load_or_create(),
    }
    .context("loading configuration")?;
    if let Some(port) = options.port {
        config.server.port = port;
    }

    let _guard = setup_logging(&config.logging);

    let store = EventStore::open(&config.database.path).context("opening event database")?;

    if options.mode == CliMode::Seed {
        return run_seed_mode(&store).context("seeding sample events");
    }

    let holiday_source =
        holidays::source_from_config(&config.holidays).context("building holiday client")?;
    let state = AppState::new(config, store, holiday_source);

    serve(state).await.context("running HTTP server")?;
    tracing::info!("calendar-clone stopped");
    Ok(())
}

fn setup_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if !config.file_output {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        tracing::info!("calendar-clone started");
        return None;
    }

    std::fs::create_dir_all(&config.directory).ok();

    let file_appender = tracing_appender::rolling::daily(&config.directory, "calendar-clone.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    tracing::info!("calendar-clone started");
    Some(guard)
}
