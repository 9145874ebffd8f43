use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::application::alert_generator::AlertGenerator;
use crate::application::commands::UserCommand;
use crate::application::engine::{DashboardEngine, DashboardEvent};
use crate::application::scoring::ScoringStage;
use crate::application::state::DashboardState;
use crate::config::Config;
use crate::domain::market::SessionSchedule;
use crate::domain::ports::{RandomSource, SnapshotFeed};
use crate::infrastructure::export::SnapshotExporter;
use crate::infrastructure::simulation::{SimulatedFeed, random_source};

/// Bound of the dashboard event queue
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Running dashboard: the event sender, the published state, and the tasks
/// that produce them.
pub struct SystemHandle {
    pub event_tx: mpsc::Sender<DashboardEvent>,
    pub state_rx: watch::Receiver<Arc<DashboardState>>,
    engine_task: JoinHandle<()>,
    ticker_tasks: Vec<JoinHandle<()>>,
}

impl SystemHandle {
    /// Latest published state
    pub fn state(&self) -> Arc<DashboardState> {
        self.state_rx.borrow().clone()
    }

    pub async fn send(&self, command: UserCommand) -> Result<()> {
        self.event_tx
            .send(DashboardEvent::Command(command))
            .await
            .context("Dashboard engine is not running")
    }

    /// Send a command and wait for the state it produced
    pub async fn apply(&self, command: UserCommand) -> Result<Arc<DashboardState>> {
        let (reply, rx) = oneshot::channel();
        self.event_tx
            .send(DashboardEvent::Apply { command, reply })
            .await
            .context("Dashboard engine is not running")?;
        rx.await.context("Dashboard engine dropped the command")
    }

    /// Export the current set and wait for the written path
    pub async fn export(&self) -> Result<PathBuf> {
        let (reply, rx) = oneshot::channel();
        self.event_tx
            .send(DashboardEvent::Export { reply })
            .await
            .context("Dashboard engine is not running")?;
        let path = rx.await.context("Dashboard engine dropped the export request")??;
        Ok(path)
    }

    /// Whether the engine has stopped (e.g. after a quit command)
    pub fn is_finished(&self) -> bool {
        self.engine_task.is_finished()
    }

    /// Stop the tickers, ask the engine to finish, and wait for it.
    pub async fn shutdown(self) -> Result<()> {
        info!("Initiating Graceful Shutdown Sequence...");
        for task in &self.ticker_tasks {
            task.abort();
        }
        if self.event_tx.send(DashboardEvent::Shutdown).await.is_err() {
            warn!("SystemHandle: engine already stopped");
        }
        self.engine_task.await.context("Dashboard engine task panicked")?;
        info!("Graceful Shutdown Complete.");
        Ok(())
    }
}

pub struct Application {
    pub config: Config,
    feed: Arc<dyn SnapshotFeed>,
    rng: Box<dyn RandomSource>,
}

impl Application {
    /// Build with the simulated 21-stock feed
    pub fn build(config: Config) -> Result<Self> {
        info!(
            "Building MarketLens Application (Market: {}, Seed: {:?})...",
            config.market, config.simulation_seed
        );

        // Feed and scorer draw from separate streams so a seed replays both
        let feed = SimulatedFeed::with_default_universe(random_source(config.simulation_seed));
        let rng = random_source(config.simulation_seed.map(|seed| seed.wrapping_add(1)));

        Ok(Self::with_feed(config, Arc::new(feed), rng))
    }

    /// Build around any snapshot feed and random source
    pub fn with_feed(
        config: Config,
        feed: Arc<dyn SnapshotFeed>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self { config, feed, rng }
    }

    pub fn start(self) -> SystemHandle {
        info!("Starting Dashboard Engine...");
        let config = self.config;

        let state = DashboardState::new(
            config.auto_refresh,
            config.market,
            SessionSchedule::kill_zones(config.session_mode),
            Utc::now(),
        );
        let (engine, state_rx) = DashboardEngine::new(
            state,
            self.feed,
            self.rng,
            ScoringStage::default(),
            AlertGenerator::new(config.alert_threshold),
            SnapshotExporter::new(config.export_dir.clone()),
        );

        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let engine_task = tokio::spawn(engine.run(event_rx));

        let ticker_tasks = vec![
            spawn_ticker(config.clock_interval, event_tx.clone(), || {
                DashboardEvent::ClockTick(Utc::now())
            }),
            spawn_ticker(config.refresh_interval, event_tx.clone(), || {
                DashboardEvent::RefreshTick
            }),
        ];
        info!(
            "Tickers started: clock every {:?}, refresh every {:?} (auto-refresh {})",
            config.clock_interval,
            config.refresh_interval,
            if config.auto_refresh { "on" } else { "off" }
        );

        SystemHandle {
            event_tx,
            state_rx,
            engine_task,
            ticker_tasks,
        }
    }
}

/// Post `make_event()` every `period` until the engine stops listening.
fn spawn_ticker<F>(
    period: Duration,
    event_tx: mpsc::Sender<DashboardEvent>,
    make_event: F,
) -> JoinHandle<()>
where
    F: Fn() -> DashboardEvent + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            if event_tx.send(make_event()).await.is_err() {
                break;
            }
        }
    })
}
