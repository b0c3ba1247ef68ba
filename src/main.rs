use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_catalog::{config::Config, services::validation::validate_stream};

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // stdout занят результатом, логи уходят в stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(
        environment = %config.app.environment,
        view = %config.schema.view,
        "Reading events from stdin"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = validate_stream(stdin.lock(), stdout.lock(), &config.schema)?;

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
