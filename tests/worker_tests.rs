// Worker: drive exactly N ticks on a paused clock, and stop on shutdown

mod common;

use common::*;
use netspeed::models::InterfaceClass;
use netspeed::presenter::Frame;
use netspeed::sampler::Monitor;
use netspeed::worker::{WorkerConfig, WorkerDeps, spawn};
use tokio::time::Duration;

fn scripted_monitor() -> Monitor<FakeSource> {
    let source = FakeSource::new()
        .with_inventory(vec![
            adapter("Eth0", InterfaceClass::Wired),
            adapter("Loopback", InterfaceClass::Other),
        ])
        .with_table(vec![eth("Eth0", 1000, 500)])
        .with_table(vec![eth("Eth0", 1400, 600)])
        .with_table(vec![eth("Eth0", 3448, 1624)])
        .with_table(vec![eth("Eth0", 3448, 1624)]);
    Monitor::start(repo(source))
}

#[tokio::test(start_paused = true)]
async fn worker_presents_exactly_max_ticks() {
    let presenter = RecordingPresenter::default();
    let (_shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            monitor: scripted_monitor(),
            presenter: presenter.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval: Duration::from_secs(1),
            max_ticks: Some(3),
        },
    );

    assert_eq!(handle.await.unwrap(), 3);
    assert_eq!(
        presenter.frames(),
        vec![
            Frame::new(1, "400 B", "100 B"),
            Frame::new(1, "2 KB", "1 KB"),
            Frame::new(1, "0 B", "0 B"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn worker_stops_on_shutdown() {
    let presenter = RecordingPresenter::default();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            monitor: scripted_monitor(),
            presenter: presenter.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval: Duration::from_secs(1),
            max_ticks: None,
        },
    );

    let _ = shutdown_tx.send(());
    let ticks = handle.await.unwrap();
    assert_eq!(ticks, 0);
    assert!(presenter.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn worker_keeps_running_through_query_failures() {
    let source = FakeSource::new()
        .with_inventory(vec![adapter("Eth0", InterfaceClass::Wired)])
        .push_table(Err(netspeed::query::QueryError::AllocationFailure(64)));
    let presenter = RecordingPresenter::default();
    let (_shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            monitor: Monitor::start(repo(source)),
            presenter: presenter.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval: Duration::from_millis(250),
            max_ticks: Some(4),
        },
    );

    assert_eq!(handle.await.unwrap(), 4);
    assert!(
        presenter
            .frames()
            .iter()
            .all(|frame| *frame == Frame::new(0, "0 B", "0 B"))
    );
}

#[tokio::test(start_paused = true)]
async fn signal_wait_resolves_when_signal_fires() {
    let waited = tokio::time::timeout(
        Duration::from_secs(5),
        netspeed::worker::wait_for_signal(async { Ok(()) }, "test"),
    )
    .await;
    assert!(waited.is_ok());
}

#[tokio::test(start_paused = true)]
async fn signal_registration_failure_never_resolves() {
    let failed = async { Err(std::io::Error::other("signal driver unavailable")) };
    let waited = tokio::time::timeout(
        Duration::from_secs(5),
        netspeed::worker::wait_for_signal(failed, "test"),
    )
    .await;
    assert!(waited.is_err(), "a failed signal registration must not look like a signal");
}
