//! Single-owner tick loop feeding the dashboard.
//!
//! One tokio task owns the [`Simulator`]; everything else sees immutable
//! [`DashboardSnapshot`]s through a watch channel. The task ticks on a fixed
//! period (first tick fires immediately, so the dashboard populates on
//! mount), handles manual refresh commands behind a busy flag, and stops on
//! shutdown without leaving partial state: each tick is atomic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};

use crate::config::Config;
use crate::logging::{self, obj, v_num, Domain, Level};
use crate::rng::UniformSource;
use crate::simulator::{PerformanceMetric, RealTimeSample, Simulator};

/// Immutable per-tick output published to consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub seq: u64,
    pub ts_ms: u64,
    pub sample: RealTimeSample,
    pub metrics: [PerformanceMetric; 4],
}

enum Command {
    Refresh,
}

/// Handle to a spawned dashboard loop.
pub struct DashboardHandle {
    snapshots: watch::Receiver<Option<DashboardSnapshot>>,
    cmd_tx: mpsc::Sender<Command>,
    refresh_busy: Arc<AtomicBool>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl DashboardHandle {
    /// Subscribe to published snapshots.
    pub fn snapshots(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.snapshots.clone()
    }

    /// Latest published snapshot, if any tick has run.
    pub fn latest(&self) -> Option<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Request a manual refresh. Returns `false` when one is already in
    /// flight: overlapping requests are rejected, not queued.
    pub fn request_refresh(&self) -> bool {
        if self.refresh_busy.swap(true, Ordering::SeqCst) {
            return false;
        }
        if self.cmd_tx.try_send(Command::Refresh).is_err() {
            self.refresh_busy.store(false, Ordering::SeqCst);
            return false;
        }
        true
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_busy.load(Ordering::SeqCst)
    }

    /// Signal shutdown and wait for the loop task to finish. Cancels an
    /// in-flight refresh delay.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the loop task that owns `simulator`.
pub fn spawn<R>(cfg: Config, simulator: Simulator<R>) -> DashboardHandle
where
    R: UniformSource + Send + 'static,
{
    let (snap_tx, snap_rx) = watch::channel(None);
    let (cmd_tx, cmd_rx) = mpsc::channel(1);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh_busy = Arc::new(AtomicBool::new(false));

    let task = tokio::spawn(run_loop(
        cfg,
        simulator,
        snap_tx,
        cmd_rx,
        shutdown_rx,
        refresh_busy.clone(),
    ));

    DashboardHandle {
        snapshots: snap_rx,
        cmd_tx,
        refresh_busy,
        shutdown_tx,
        task,
    }
}

async fn run_loop<R: UniformSource>(
    cfg: Config,
    mut simulator: Simulator<R>,
    snap_tx: watch::Sender<Option<DashboardSnapshot>>,
    mut cmd_rx: mpsc::Receiver<Command>,
    mut shutdown_rx: watch::Receiver<bool>,
    refresh_busy: Arc<AtomicBool>,
) {
    let mut ticker = interval(Duration::from_millis(cfg.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut seq: u64 = 0;

    logging::log(
        Level::Info,
        Domain::System,
        "loop_started",
        obj(&[
            ("tick_ms", v_num(cfg.tick_ms as f64)),
            ("refresh_delay_ms", v_num(cfg.refresh_delay_ms as f64)),
        ]),
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                seq += 1;
                publish(&mut simulator, &snap_tx, seq);
            }
            Some(Command::Refresh) = cmd_rx.recv() => {
                // Artificial round trip; races shutdown so teardown never
                // waits on it.
                let finished = tokio::select! {
                    _ = sleep(Duration::from_millis(cfg.refresh_delay_ms)) => true,
                    _ = shutdown_rx.changed() => false,
                };
                if finished {
                    seq += 1;
                    publish(&mut simulator, &snap_tx, seq);
                    logging::log_refresh("completed");
                }
                refresh_busy.store(false, Ordering::SeqCst);
                if !finished {
                    break;
                }
            }
            changed = shutdown_rx.changed() => {
                // A dropped handle counts as shutdown.
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    logging::log(
        Level::Info,
        Domain::System,
        "loop_stopped",
        obj(&[("ticks", v_num(seq as f64))]),
    );
}

fn publish<R: UniformSource>(
    simulator: &mut Simulator<R>,
    snap_tx: &watch::Sender<Option<DashboardSnapshot>>,
    seq: u64,
) {
    let (sample, metrics) = simulator.tick();
    logging::log_sample(seq, &sample);
    logging::log_metrics(seq, &metrics);
    let _ = snap_tx.send(Some(DashboardSnapshot {
        seq,
        ts_ms: logging::ts_epoch_ms(),
        sample,
        metrics,
    }));
}
