//! Dashboard application state.
//!
//! One explicit struct owns everything the dashboard shows. Commands and
//! ticks are transitions on it; filtered, sorted and aggregate views are
//! recomputed from the current snapshot set on every read.

use crate::application::commands::UserCommand;
use crate::domain::alerts::{AlertEvent, AlertLog};
use crate::domain::filters::{FilterCriteria, filter_assets};
use crate::domain::market::{AssetSnapshot, Market, SessionSchedule, SessionStatus};
use crate::domain::market_stats::{MarketStats, TOP_MOVERS_COUNT, TopMovers, top_movers};
use crate::domain::sort::{SortKey, sort_assets};
use crate::domain::watchlist::Watchlist;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Side effect requested by a transition. The engine performs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Refresh,
    Export,
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    assets: Arc<Vec<AssetSnapshot>>,
    snapshot_sequence: u64,
    last_refresh: Option<DateTime<Utc>>,
    criteria: FilterCriteria,
    sort_key: SortKey,
    alerts: AlertLog,
    next_alert_id: u64,
    watchlist: Watchlist,
    expanded: Option<String>,
    auto_refresh: bool,
    market: Market,
    sessions: SessionSchedule,
    current_time: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(
        auto_refresh: bool,
        market: Market,
        sessions: SessionSchedule,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            assets: Arc::new(Vec::new()),
            snapshot_sequence: 0,
            last_refresh: None,
            criteria: FilterCriteria::default(),
            sort_key: SortKey::default(),
            alerts: AlertLog::new(),
            next_alert_id: 1,
            watchlist: Watchlist::new(),
            expanded: None,
            auto_refresh,
            market,
            sessions,
            current_time: now,
        }
    }

    // ===== Transitions =====

    /// Apply one user command. Never fails: bad input is rejected at parse time.
    pub fn apply(&mut self, command: UserCommand) -> Option<Effect> {
        debug!("DashboardState: applying {:?}", command);
        match command {
            UserCommand::SelectMarket(market) => self.market = market,
            UserCommand::SelectSector(sector) => self.criteria = self.criteria.with_sector(sector),
            UserCommand::SelectRisk(risk) => self.criteria = self.criteria.with_risk(risk),
            UserCommand::Search(text) => self.criteria = self.criteria.with_search(text),
            UserCommand::SortBy(key) => self.sort_key = key,
            UserCommand::ToggleWatch(symbol) => {
                let watched = self.watchlist.toggle(&symbol);
                info!(
                    "Watchlist: {} {}",
                    symbol,
                    if watched { "added" } else { "removed" }
                );
            }
            UserCommand::ToggleExpand(symbol) => {
                self.expanded = match self.expanded.take() {
                    Some(current) if current == symbol => None,
                    _ => Some(symbol),
                };
            }
            UserCommand::SetAutoRefresh(enabled) => {
                if self.auto_refresh != enabled {
                    info!(
                        "DashboardState: auto-refresh {}",
                        if enabled { "enabled" } else { "paused" }
                    );
                }
                self.auto_refresh = enabled;
            }
            UserCommand::ClearAlerts => self.alerts.clear(),
            UserCommand::Refresh => return Some(Effect::Refresh),
            UserCommand::Export => return Some(Effect::Export),
            UserCommand::Quit => return Some(Effect::Shutdown),
        }
        None
    }

    /// Clock tick: only the displayed time moves.
    pub fn clock_tick(&mut self, now: DateTime<Utc>) {
        self.current_time = now;
    }

    /// Swap in a freshly scored set. The previous set is dropped wholesale.
    pub fn replace_snapshot(&mut self, assets: Vec<AssetSnapshot>, now: DateTime<Utc>) {
        self.assets = Arc::new(assets);
        self.snapshot_sequence += 1;
        self.last_refresh = Some(now);
    }

    /// Id for the next alert. Ids are never reused, even after a clear.
    pub fn next_alert_id(&self) -> u64 {
        self.next_alert_id
    }

    pub fn push_alert(&mut self, alert: AlertEvent) {
        self.next_alert_id = self.next_alert_id.max(alert.id + 1);
        self.alerts.push(alert);
    }

    // ===== Accessors =====

    pub fn assets(&self) -> &[AssetSnapshot] {
        &self.assets
    }

    /// Shared handle on the current set, for exports taken off the engine task
    pub fn assets_handle(&self) -> Arc<Vec<AssetSnapshot>> {
        Arc::clone(&self.assets)
    }

    pub fn snapshot_sequence(&self) -> u64 {
        self.snapshot_sequence
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn expanded_symbol(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn market(&self) -> Market {
        self.market
    }

    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    pub fn sessions(&self) -> &SessionSchedule {
        &self.sessions
    }

    // ===== Derived views =====

    /// Filter chain then sort stage over the current set
    pub fn visible_assets(&self) -> Vec<&AssetSnapshot> {
        sort_assets(filter_assets(&self.assets, &self.criteria), self.sort_key)
    }

    /// Gainers and losers over the full set, ignoring filters
    pub fn top_movers(&self) -> TopMovers<'_> {
        top_movers(&self.assets, TOP_MOVERS_COUNT)
    }

    pub fn market_stats(&self) -> MarketStats {
        MarketStats::compute(&self.assets)
    }

    /// Watched symbols present in the current set, in feed rank order
    pub fn watchlist_assets(&self) -> Vec<&AssetSnapshot> {
        self.assets
            .iter()
            .filter(|a| self.watchlist.contains(&a.symbol))
            .collect()
    }

    /// The expanded asset, if its symbol is still in the current set
    pub fn expanded_asset(&self) -> Option<&AssetSnapshot> {
        let symbol = self.expanded.as_deref()?;
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    pub fn session_statuses(&self) -> Vec<SessionStatus> {
        self.sessions.statuses_at(self.current_time)
    }
}
