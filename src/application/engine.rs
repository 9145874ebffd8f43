use crate::application::alert_generator::AlertGenerator;
use crate::application::commands::UserCommand;
use crate::application::scoring::ScoringStage;
use crate::application::state::{DashboardState, Effect};
use crate::domain::errors::ExportError;
use crate::domain::ports::{RandomSource, SnapshotFeed};
use crate::infrastructure::export::SnapshotExporter;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

/// Everything the engine consumes, strictly in arrival order
#[derive(Debug)]
pub enum DashboardEvent {
    ClockTick(DateTime<Utc>),
    RefreshTick,
    Command(UserCommand),
    /// Command whose requester waits for the state it produced
    Apply {
        command: UserCommand,
        reply: oneshot::Sender<Arc<DashboardState>>,
    },
    /// Export with the outcome sent back to the requester
    Export {
        reply: oneshot::Sender<Result<PathBuf, ExportError>>,
    },
    Shutdown,
}

/// Outcome of one refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced,
    /// Feed failed or a record was malformed; previous set kept
    Rejected,
}

/// Single consumer of the dashboard event queue.
///
/// Owns the state; every snapshot replacement and alert append happens on
/// this task, so no lock guards them.
pub struct DashboardEngine {
    state: DashboardState,
    feed: Arc<dyn SnapshotFeed>,
    rng: Box<dyn RandomSource>,
    scoring: ScoringStage,
    alert_generator: AlertGenerator,
    exporter: SnapshotExporter,
    state_tx: watch::Sender<Arc<DashboardState>>,
}

impl DashboardEngine {
    pub fn new(
        state: DashboardState,
        feed: Arc<dyn SnapshotFeed>,
        rng: Box<dyn RandomSource>,
        scoring: ScoringStage,
        alert_generator: AlertGenerator,
        exporter: SnapshotExporter,
    ) -> (Self, watch::Receiver<Arc<DashboardState>>) {
        let (state_tx, state_rx) = watch::channel(Arc::new(state.clone()));
        (
            Self {
                state,
                feed,
                rng,
                scoring,
                alert_generator,
                exporter,
                state_tx,
            },
            state_rx,
        )
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Load the first snapshot, then consume events until shutdown or until
    /// every sender is gone.
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<DashboardEvent>) {
        info!("DashboardEngine: started");
        self.refresh().await;
        self.publish();

        while let Some(event) = event_rx.recv().await {
            let keep_running = self.handle(event).await;
            self.publish();
            if !keep_running {
                break;
            }
        }
        info!("DashboardEngine: stopped");
    }

    /// Apply one event. Returns `false` once the engine should stop.
    pub async fn handle(&mut self, event: DashboardEvent) -> bool {
        match event {
            DashboardEvent::ClockTick(now) => self.state.clock_tick(now),
            DashboardEvent::RefreshTick => {
                if self.state.auto_refresh() {
                    self.refresh_tick().await;
                } else {
                    debug!("DashboardEngine: auto-refresh paused, tick ignored");
                }
            }
            DashboardEvent::Command(command) => return self.apply(command).await,
            DashboardEvent::Apply { command, reply } => {
                let keep_running = self.apply(command).await;
                if reply.send(Arc::new(self.state.clone())).is_err() {
                    warn!("DashboardEngine: command requester went away");
                }
                return keep_running;
            }
            DashboardEvent::Export { reply } => {
                let result = self.export().inspect_err(|e| {
                    error!("DashboardEngine: export failed: {}", e);
                });
                if reply.send(result).is_err() {
                    warn!("DashboardEngine: export requester went away");
                }
            }
            DashboardEvent::Shutdown => return false,
        }
        true
    }

    async fn apply(&mut self, command: UserCommand) -> bool {
        match self.state.apply(command) {
            Some(Effect::Refresh) => {
                self.refresh().await;
            }
            Some(Effect::Export) => {
                if let Err(e) = self.export() {
                    error!("DashboardEngine: export failed: {}", e);
                }
            }
            Some(Effect::Shutdown) => return false,
            None => {}
        }
        true
    }

    /// Timer-driven refresh: swap in a new set, then run the alert generator
    /// once against it. Manual and startup loads skip the alert step.
    pub async fn refresh_tick(&mut self) -> RefreshOutcome {
        let outcome = self.refresh().await;
        if outcome == RefreshOutcome::Replaced {
            self.maybe_alert();
        }
        outcome
    }

    /// Fetch, score and swap in a new snapshot set.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let batch = match self.feed.fetch().await {
            Ok(batch) => batch,
            Err(e) => {
                error!("DashboardEngine: snapshot feed failed: {:#}", e);
                return RefreshOutcome::Rejected;
            }
        };

        let scored = match self.scoring.score_batch(&batch, self.rng.as_mut()) {
            Ok(scored) => scored,
            Err(e) => {
                error!(
                    "DashboardEngine: refresh rejected, keeping snapshot #{}: {}",
                    self.state.snapshot_sequence(),
                    e
                );
                return RefreshOutcome::Rejected;
            }
        };

        self.state.replace_snapshot(scored, Utc::now());
        debug!(
            "DashboardEngine: snapshot #{} with {} assets",
            self.state.snapshot_sequence(),
            self.state.assets().len()
        );
        RefreshOutcome::Replaced
    }

    fn maybe_alert(&mut self) {
        let alert = self.alert_generator.maybe_generate(
            self.state.assets(),
            self.rng.as_mut(),
            self.state.next_alert_id(),
            Utc::now(),
        );
        if let Some(alert) = alert {
            info!("Alert: {}", alert.message);
            self.state.push_alert(alert);
        }
    }

    /// Write the current set to disk. Leaves the in-memory state untouched.
    pub fn export(&self) -> Result<PathBuf, ExportError> {
        self.exporter
            .export(self.state.assets(), Utc::now().date_naive())
    }

    fn publish(&self) {
        self.state_tx.send_replace(Arc::new(self.state.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{Market, RawAssetFields, SessionActivityMode, SessionSchedule};
    use crate::infrastructure::simulation::{RngSource, ScriptedSource, SimulatedFeed};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    struct FailingFeed;

    #[async_trait]
    impl SnapshotFeed for FailingFeed {
        async fn fetch(&self) -> Result<Vec<RawAssetFields>> {
            Err(anyhow!("upstream unavailable"))
        }
    }

    fn engine_with(feed: Arc<dyn SnapshotFeed>, rng: Box<dyn RandomSource>) -> DashboardEngine {
        engine_with_auto(feed, rng, true)
    }

    fn engine_with_auto(
        feed: Arc<dyn SnapshotFeed>,
        rng: Box<dyn RandomSource>,
        auto_refresh: bool,
    ) -> DashboardEngine {
        let state = DashboardState::new(
            auto_refresh,
            Market::Stocks,
            SessionSchedule::kill_zones(SessionActivityMode::Static),
            Utc::now(),
        );
        let (engine, _rx) = DashboardEngine::new(
            state,
            feed,
            rng,
            ScoringStage::default(),
            AlertGenerator::default(),
            SnapshotExporter::new(std::env::temp_dir()),
        );
        engine
    }

    fn simulated(seed: u64) -> Arc<dyn SnapshotFeed> {
        Arc::new(SimulatedFeed::with_default_universe(Box::new(RngSource::seeded(seed))))
    }

    #[tokio::test]
    async fn test_refresh_tick_replaces_set_and_alerts() {
        // 0.9 passes the alert gate on every draw
        let mut engine = engine_with(simulated(1), Box::new(ScriptedSource::constant(0.9)));

        engine.handle(DashboardEvent::RefreshTick).await;
        assert_eq!(engine.state().assets().len(), 21);
        assert_eq!(engine.state().snapshot_sequence(), 1);
        assert_eq!(engine.state().alerts().latest().map(|a| a.id), Some(1));
    }

    #[tokio::test]
    async fn test_manual_refresh_never_alerts() {
        let mut engine = engine_with_auto(
            simulated(2),
            Box::new(ScriptedSource::constant(0.9)),
            false,
        );

        assert_eq!(engine.refresh().await, RefreshOutcome::Replaced);
        engine.handle(DashboardEvent::Command(UserCommand::Refresh)).await;
        engine.handle(DashboardEvent::RefreshTick).await;

        assert_eq!(engine.state().snapshot_sequence(), 2);
        assert!(engine.state().alerts().is_empty());

        // Resuming auto-refresh brings the alert step back
        engine
            .handle(DashboardEvent::Command(UserCommand::SetAutoRefresh(true)))
            .await;
        engine.handle(DashboardEvent::RefreshTick).await;
        assert_eq!(engine.state().alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_feed_failure_keeps_previous_set() {
        let mut engine = engine_with(Arc::new(FailingFeed), Box::new(RngSource::seeded(3)));
        assert_eq!(engine.refresh().await, RefreshOutcome::Rejected);
        assert_eq!(engine.state().snapshot_sequence(), 0);
        assert!(engine.state().alerts().is_empty());
    }

    #[tokio::test]
    async fn test_paused_refresh_ticks_are_ignored() {
        let mut engine = engine_with(simulated(5), Box::new(RngSource::seeded(5)));
        engine.refresh().await;
        let frozen = engine.state().assets_handle();

        engine
            .handle(DashboardEvent::Command(UserCommand::SetAutoRefresh(false)))
            .await;
        for _ in 0..10 {
            assert!(engine.handle(DashboardEvent::RefreshTick).await);
        }
        assert!(Arc::ptr_eq(&frozen, &engine.state().assets_handle()));

        // Manual refresh is not gated
        engine.handle(DashboardEvent::Command(UserCommand::Refresh)).await;
        assert_eq!(engine.state().snapshot_sequence(), 2);
    }

    #[tokio::test]
    async fn test_apply_replies_with_resulting_state() {
        let mut engine = engine_with(simulated(4), Box::new(RngSource::seeded(4)));
        engine.refresh().await;
        // A clock tick queued ahead of the command must not satisfy the reply
        engine.handle(DashboardEvent::ClockTick(Utc::now())).await;

        let (reply, rx) = oneshot::channel();
        assert!(
            engine
                .handle(DashboardEvent::Apply {
                    command: UserCommand::Search("nvda".to_string()),
                    reply,
                })
                .await
        );
        let applied = rx.await.unwrap();
        assert_eq!(applied.criteria().search_text, "nvda");
        assert_eq!(applied.visible_assets().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_engine() {
        let mut engine = engine_with(simulated(9), Box::new(RngSource::seeded(9)));
        assert!(!engine.handle(DashboardEvent::Command(UserCommand::Quit)).await);
        assert!(!engine.handle(DashboardEvent::Shutdown).await);
    }
}
