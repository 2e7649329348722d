use std::path::Path;
use std::sync::Arc;

use restcase::execute_suite;
use restcase::LocalProcessManager;
use restcase::ReqwestSender;
use restcase::Result;
use restcase::Settings;
use restcase::TracingReporter;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1);
    let settings = Settings::load(config_path.as_deref())?;

    // Initializing Logs
    let _guard = init_observability(&settings.suite.log_dir)?;

    // Suite abort still runs tearDown for every started case
    let cancel = CancellationToken::new();
    tokio::spawn(watch_shutdown_signals(cancel.clone()));

    let manager = Arc::new(LocalProcessManager::new(settings.http.connect_timeout()));
    let sender = Arc::new(ReqwestSender::new(&settings.http)?);
    let reporter = Arc::new(TracingReporter);

    info!("Starting suite from {}", settings.suite.case_path.display());
    let outcome = execute_suite(&settings, manager, sender, reporter, cancel).await?;

    let summary = outcome.summary;
    println!(
        "suite finished: {} total, {} passed, {} failed, {} skipped",
        summary.total, summary.passed, summary.failed, summary.skipped
    );
    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

async fn watch_shutdown_signals(cancel: CancellationToken) {
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGINT handler: {}", e);
            return;
        }
    };
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            return;
        }
    };

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT detected.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM detected.");
        },
    }
    cancel.cancel();
}

fn init_observability(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| restcase::Error::Fatal(format!("cannot create log dir: {}", e)))?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("restcase.log"))
        .map_err(|e| restcase::Error::Fatal(format!("cannot open log file: {}", e)))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
    let base_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(base_subscriber).init();

    Ok(guard)
}
