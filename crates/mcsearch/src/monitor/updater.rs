use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::{JoinHandle, JoinSet},
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{Instrument, debug, debug_span, error, info, instrument, warn};

use crate::{
    config::{MonitorConfig, TargetConfig},
    error::ProbeError,
    monitor::StatusStore,
    probe::probe_with,
};

/// Extra time granted on top of the probe timeout before stragglers are
/// aborted.
const JOIN_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Periodically probes every configured target and publishes the rendered
/// results, grouped, into a [`StatusStore`].
pub struct StatusUpdater {
    config: Arc<MonitorConfig>,
    store: Arc<StatusStore>,
    refreshed: watch::Sender<Option<RefreshReport>>,
}

impl StatusUpdater {
    pub fn new(config: Arc<MonitorConfig>, store: Arc<StatusStore>) -> Self {
        let (refreshed, _) = watch::channel(None);
        Self {
            config,
            store,
            refreshed,
        }
    }

    pub fn store(&self) -> &Arc<StatusStore> {
        &self.store
    }

    /// Notified with the report of every completed refresh.
    pub fn subscribe(&self) -> watch::Receiver<Option<RefreshReport>> {
        self.refreshed.subscribe()
    }

    /// Probes all targets concurrently and replaces the store's contents.
    #[instrument(name = "refresh", skip(self), fields(targets = self.config.targets.len()))]
    pub async fn refresh_once(&self) -> RefreshReport {
        let options = self.config.probe_options();
        let mut tasks = JoinSet::new();

        for (index, target) in self.config.targets.iter().enumerate() {
            let host = target.host.clone();
            let port = target.port;
            let options = options.clone();
            let span = debug_span!("refresh_target", name = %target.name, group = %target.group);
            tasks.spawn(
                async move { (index, probe_with(&host, port, &options).await) }.instrument(span),
            );
        }

        let mut results: Vec<Option<Result<String, ProbeError>>> =
            (0..self.config.targets.len()).map(|_| None).collect();
        let deadline = Instant::now() + self.config.timeout + JOIN_GRACE;

        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, result)))) => results[index] = Some(result),
                Ok(Some(Err(e))) => error!("Probe task failed: {}", e),
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        remaining = tasks.len(),
                        "Refresh deadline reached, aborting remaining probes"
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        let (groups, report) = compose_groups(&self.config.targets, results);
        self.store.replace(groups);
        self.refreshed.send_replace(Some(report));

        debug!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Refresh complete"
        );
        report
    }

    /// Spawns the refresh loop. The first refresh runs immediately.
    pub fn start(self) -> UpdaterHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                interval = ?self.config.interval,
                targets = self.config.targets.len(),
                "Status updater started"
            );

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = self.refresh_once() => {}
                }
            }

            debug!("Status updater stopped");
        });

        UpdaterHandle {
            _guard: token.clone().drop_guard(),
            token,
            task,
        }
    }
}

/// Controls a running [`StatusUpdater`]. Dropping the handle stops the loop.
pub struct UpdaterHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl UpdaterHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the loop, cancelling any refresh in flight, and waits for it.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            error!("Status updater task failed: {}", e);
        }
    }
}

/// Builds each group's text from per-target results, in configuration order.
///
/// Successful targets are numbered from 1 within their group; failed ones
/// are logged and left out.
fn compose_groups(
    targets: &[TargetConfig],
    results: Vec<Option<Result<String, ProbeError>>>,
) -> (HashMap<String, String>, RefreshReport) {
    let mut groups: HashMap<String, String> = HashMap::new();
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut report = RefreshReport::default();

    for (target, result) in targets.iter().zip(results) {
        let text = match result {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                warn!(
                    name = %target.name,
                    group = %target.group,
                    error_kind = e.kind(),
                    "Failed to probe {}:{}: {}", target.host, target.port, e
                );
                report.failed += 1;
                continue;
            }
            None => {
                warn!(
                    name = %target.name,
                    group = %target.group,
                    "No result for {}:{} before the refresh deadline", target.host, target.port
                );
                report.failed += 1;
                continue;
            }
        };

        let counter = counters.entry(target.group.as_str()).or_insert(0);
        *counter += 1;
        let line = format!("{}. [ {} ]{}", counter, target.name, text);

        groups
            .entry(target.group.clone())
            .and_modify(|existing| {
                existing.push('\n');
                existing.push_str(&line);
            })
            .or_insert_with(|| line.clone());
        report.succeeded += 1;
    }

    (groups, report)
}
