use crate::application::state::DashboardState;
use crate::domain::alerts::AlertSeverity;
use crate::domain::market::{AssetSnapshot, RiskBand, Signal, Trend};
use crate::interfaces::formatting::group_thousands;
use rust_decimal::Decimal;

/// Display polarity; the renderer decides how to show it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    fn of_change(change: Decimal) -> Self {
        if change > Decimal::ZERO {
            Tone::Positive
        } else if change < Decimal::ZERO {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

pub struct HeaderMetrics {
    pub market: String,
    pub clock: String,
    pub auto_refresh: bool,
    pub last_refresh: Option<String>,
    pub filter_summary: String,
    pub sort_label: String,
    pub visible_count: usize,
    pub total_count: usize,
}

pub struct AssetRow {
    pub rank: usize,
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: String,
    pub change: String,
    pub change_tone: Tone,
    pub volume: String,
    pub volume_profile: String,
    pub total_score: String,
    pub ai_score: String,
    pub risk_score: String,
    pub risk_band: RiskBand,
    pub signal: Signal,
    pub trend: Trend,
    pub watched: bool,
    pub expanded: bool,
}

pub struct AssetDetail {
    pub symbol: String,
    pub name: String,
    pub scores: Vec<(&'static str, String)>,
    pub insights: Vec<(&'static str, String)>,
}

pub struct MoverRow {
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub tone: Tone,
}

pub struct StatsMetrics {
    pub total_assets: usize,
    pub strong_signals: usize,
    pub advancing: usize,
    pub declining: usize,
    pub unchanged: usize,
    pub average_total_score: String,
    pub average_risk_score: String,
    pub total_volume: String,
    pub average_change: String,
    pub active_sessions: Vec<String>,
}

pub struct BannerMetrics {
    pub message: String,
    pub severity: AlertSeverity,
    pub time: String,
    /// Alerts currently held in the log, banner included
    pub log_len: usize,
}

pub struct SessionRow {
    pub name: String,
    pub hours: String,
    pub active: bool,
    pub priority: u8,
    pub volatility: String,
    pub volume: String,
}

pub struct DashboardViewModel;

impl DashboardViewModel {
    pub fn get_header(state: &DashboardState) -> HeaderMetrics {
        let criteria = state.criteria();
        let search = if criteria.search_text.is_empty() {
            String::new()
        } else {
            format!(", search \"{}\"", criteria.search_text)
        };

        HeaderMetrics {
            market: state.market().to_string(),
            clock: state.current_time().format("%H:%M:%S UTC").to_string(),
            auto_refresh: state.auto_refresh(),
            last_refresh: state
                .last_refresh()
                .map(|t| t.format("%H:%M:%S").to_string()),
            filter_summary: format!(
                "sector {}, risk {}{}",
                criteria.sector, criteria.risk, search
            ),
            sort_label: state.sort_key().to_string(),
            visible_count: state.visible_assets().len(),
            total_count: state.assets().len(),
        }
    }

    /// Filtered and sorted table rows. Empty is a valid result.
    pub fn get_rows(state: &DashboardState) -> Vec<AssetRow> {
        let expanded = state.expanded_symbol();
        state
            .visible_assets()
            .into_iter()
            .map(|asset| AssetRow {
                rank: asset.rank,
                symbol: asset.symbol.clone(),
                name: asset.name.clone(),
                sector: asset.sector.to_string(),
                price: format_price(asset.price),
                change: format_change(asset.change_percent),
                change_tone: Tone::of_change(asset.change_percent),
                volume: group_thousands(asset.volume),
                volume_profile: asset.volume_profile.to_string(),
                total_score: format!("{:.1}", asset.total_score),
                ai_score: format!("{:.1}", asset.ai_score),
                risk_score: format!("{:.1}", asset.risk_score),
                risk_band: asset.risk_band(),
                signal: asset.signal,
                trend: asset.trend,
                watched: state.watchlist().contains(&asset.symbol),
                expanded: expanded == Some(asset.symbol.as_str()),
            })
            .collect()
    }

    pub fn get_detail(state: &DashboardState) -> Option<AssetDetail> {
        state.expanded_asset().map(Self::detail_for)
    }

    fn detail_for(asset: &AssetSnapshot) -> AssetDetail {
        let insights = &asset.insights;
        AssetDetail {
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            scores: vec![
                ("Total", format!("{:.1}", asset.total_score)),
                ("AI", format!("{:.1}", asset.ai_score)),
                ("ICT", format!("{:.1}", asset.ict_score)),
                ("Sentiment", format!("{:.1}", asset.sentiment_score)),
                ("Risk", format!("{:.1} ({})", asset.risk_score, asset.risk_band())),
            ],
            insights: vec![
                ("Next Optimal", insights.next_optimal.clone()),
                ("Institutional Flow", insights.institutional_flow.clone()),
                ("Dark Pool", insights.dark_pool_activity.clone()),
                ("Short Interest", insights.short_interest.clone()),
                ("Options Flow", insights.options_flow.clone()),
                ("Earnings", insights.earnings_date.clone()),
                ("Whale Activity", insights.whale_activity.clone()),
                ("Market Cap", insights.market_cap.clone()),
                ("P/E", insights.pe_ratio.clone()),
                ("Dividend Yield", insights.dividend_yield.clone()),
            ],
        }
    }

    /// (gainers, losers) over the full set
    pub fn get_top_movers(state: &DashboardState) -> (Vec<MoverRow>, Vec<MoverRow>) {
        let movers = state.top_movers();
        let rows = |assets: Vec<&AssetSnapshot>| -> Vec<MoverRow> {
            assets
                .into_iter()
                .map(|a| MoverRow {
                    symbol: a.symbol.clone(),
                    price: format_price(a.price),
                    change: format_change(a.change_percent),
                    tone: Tone::of_change(a.change_percent),
                })
                .collect()
        };
        (rows(movers.gainers), rows(movers.losers))
    }

    pub fn get_stats(state: &DashboardState) -> StatsMetrics {
        let stats = state.market_stats();
        StatsMetrics {
            total_assets: stats.total_assets,
            strong_signals: stats.strong_signals,
            advancing: stats.advancing,
            declining: stats.declining,
            unchanged: stats.unchanged,
            average_total_score: format!("{:.1}", stats.average_total_score),
            average_risk_score: format!("{:.1}", stats.average_risk_score),
            total_volume: group_thousands(stats.total_volume),
            average_change: format_change(stats.average_change_percent),
            active_sessions: state.sessions().active_names(state.current_time()),
        }
    }

    pub fn get_banner(state: &DashboardState) -> Option<BannerMetrics> {
        state.alerts().latest().map(|alert| BannerMetrics {
            message: alert.message.clone(),
            severity: alert.severity,
            time: alert.timestamp.format("%H:%M:%S").to_string(),
            log_len: state.alerts().len(),
        })
    }

    pub fn get_watchlist(state: &DashboardState) -> Vec<MoverRow> {
        state
            .watchlist_assets()
            .into_iter()
            .map(|a| MoverRow {
                symbol: a.symbol.clone(),
                price: format_price(a.price),
                change: format_change(a.change_percent),
                tone: Tone::of_change(a.change_percent),
            })
            .collect()
    }

    pub fn get_sessions(state: &DashboardState) -> Vec<SessionRow> {
        state
            .session_statuses()
            .into_iter()
            .map(|status| SessionRow {
                hours: status.window.time_label(),
                name: status.window.name,
                active: status.active,
                priority: status.window.priority,
                volatility: status.window.volatility.to_string(),
                volume: status.window.volume.to_string(),
            })
            .collect()
    }
}

fn format_price(price: Decimal) -> String {
    format!("${:.2}", price)
}

fn format_change(change: Decimal) -> String {
    let sign = if change > Decimal::ZERO { "+" } else { "" };
    format!("{}{:.2}%", sign, change)
}
