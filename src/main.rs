use anyhow::Result;
use netspeed::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = config::AppConfig::load()?;

    // stdout carries the display; logs go to stderr.
    let filter = EnvFilter::try_new(&app_config.logging.filter)
        .map_err(|e| anyhow::anyhow!("logging.filter: {}", e))?;
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let limits = app_config.query.limits();
    let monitor = tokio::task::spawn_blocking(move || {
        let repo = interface_repo::InterfaceRepo::new(interface_repo::default_source(), limits);
        sampler::Monitor::start(repo)
    })
    .await
    .map_err(|e| anyhow::anyhow!("adapter selection task join: {}", e))?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let mut worker_handle = worker::spawn(
        worker::WorkerDeps {
            monitor,
            presenter: presenter::TerminalPresenter::stdout(),
            shutdown_rx,
        },
        worker::WorkerConfig::default(),
    );

    tokio::select! {
        result = &mut worker_handle => {
            let ticks = result?;
            tracing::warn!(ticks, "Display loop stopped");
        }
        _ = async {
            #[cfg(unix)]
            {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = worker::wait_for_signal(tokio::signal::ctrl_c(), "ctrl_c") => {}
                            _ = sigterm.recv() => {}
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, signal = "sigterm", "could not listen for signal");
                        worker::wait_for_signal(tokio::signal::ctrl_c(), "ctrl_c").await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                worker::wait_for_signal(tokio::signal::ctrl_c(), "ctrl_c").await;
            }
        } => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = worker_handle.await;
        }
    }

    Ok(())
}
