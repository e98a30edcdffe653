// Sampling worker: one tick per interval, each tick sampled, formatted and presented.
// The OS query runs on the blocking pool; nothing puts a timeout on it, so a stalled
// query stalls the display.

use crate::format::format_rate;
use crate::interface_repo::InterfaceSource;
use crate::presenter::{Frame, Presenter};
use crate::sampler::{Monitor, TickReport};
use tokio::sync::oneshot;
use tokio::time::Duration;
use tracing::Instrument;

/// Fixed delay between the end of one tick and the start of the next.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Owned state and collaborators for the worker.
pub struct WorkerDeps<S, P> {
    pub monitor: Monitor<S>,
    pub presenter: P,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Worker timing.
pub struct WorkerConfig {
    /// Sleep between ticks. Not compensated for the time a tick takes, so real
    /// intervals run slightly long under load.
    pub sample_interval: Duration,
    /// Stop after this many ticks (None = until shutdown).
    pub max_ticks: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            sample_interval: SAMPLE_INTERVAL,
            max_ticks: None,
        }
    }
}

/// Resolves when `signal` fires. A signal whose handler could not be registered never
/// fires, so the display keeps running instead of shutting down at once.
pub async fn wait_for_signal<F>(signal: F, name: &'static str)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, signal = name, "could not listen for signal");
        std::future::pending::<()>().await;
    }
}

pub fn frame_for(report: &TickReport) -> Frame {
    Frame::new(
        report.adapter_count,
        format_rate(u64::from(report.sample.down)),
        format_rate(u64::from(report.sample.up)),
    )
}

/// Spawns the tick loop. The handle resolves to the number of ticks presented once
/// shutdown fires (or the sender is dropped), `max_ticks` is reached, or the presenter fails.
pub fn spawn<S, P>(deps: WorkerDeps<S, P>, config: WorkerConfig) -> tokio::task::JoinHandle<u64>
where
    S: InterfaceSource + 'static,
    P: Presenter + 'static,
{
    let WorkerDeps {
        mut monitor,
        mut presenter,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval,
        max_ticks,
    } = config;

    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        sample_interval_ms = sample_interval.as_millis() as u64
    );

    tokio::spawn(
        async move {
            let mut ticks: u64 = 0;
            loop {
                if max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
                tokio::select! {
                    _ = tokio::time::sleep(sample_interval) => {}
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                }

                let (returned, report) = match tokio::task::spawn_blocking(move || {
                    let report = monitor.tick();
                    (monitor, report)
                })
                .await
                {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!(error = %e, operation = "tick", "sampling task failed");
                        break;
                    }
                };
                monitor = returned;

                if let Err(e) = presenter.present(&frame_for(&report)) {
                    tracing::warn!(error = %e, operation = "present", "display write failed");
                    break;
                }
                ticks += 1;
            }
            ticks
        }
        .instrument(worker_span),
    )
}
