//! Plain-text dashboard renderer for the terminal binary.

use crate::application::state::DashboardState;
use crate::domain::alerts::AlertSeverity;
use crate::interfaces::view_models::dashboard_view_model::{DashboardViewModel, MoverRow, Tone};
use std::fmt::Write;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub const HELP: &str = "Commands: sector <name|all> | risk <low|medium|high|all> | search [text] | \
sort <total|ai|risk|volume|change|rank> | watch <SYM> | expand <SYM> | market <name> | \
auto <on|off> | refresh | clear | export | quit";

#[derive(Debug, Clone, Copy)]
pub struct ConsoleRenderer {
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, state: &DashboardState) -> String {
        // Writing into a String cannot fail
        let mut out = String::new();
        let _ = self.write_dashboard(&mut out, state);
        out
    }

    fn write_dashboard(&self, out: &mut String, state: &DashboardState) -> std::fmt::Result {
        let header = DashboardViewModel::get_header(state);
        writeln!(
            out,
            "{} | {} | auto-refresh {} | last refresh {}",
            self.bold(&format!("MarketLens {}", header.market)),
            header.clock,
            if header.auto_refresh { "ON" } else { "PAUSED" },
            header.last_refresh.as_deref().unwrap_or("never"),
        )?;

        if let Some(banner) = DashboardViewModel::get_banner(state) {
            let style = match banner.severity {
                AlertSeverity::Info => GREEN,
                AlertSeverity::Warning => YELLOW,
            };
            writeln!(
                out,
                "{} [{}] ({} in log)",
                self.paint(&format!("! {}", banner.message), style),
                banner.time,
                banner.log_len
            )?;
        }

        writeln!(
            out,
            "Filters: {} | Sort: {} | Showing {}/{}",
            header.filter_summary, header.sort_label, header.visible_count, header.total_count
        )?;
        writeln!(
            out,
            "{:>3} {:<1} {:<6} {:<20} {:<18} {:>10} {:>8} {:>12} {:<9} {:>6} {:>6} {:>5} {:<10} {:<8}",
            "#", "", "SYM", "NAME", "SECTOR", "PRICE", "CHG", "VOLUME", "VOL.PROF", "TOTAL", "AI", "RISK",
            "SIGNAL", "TREND"
        )?;

        let rows = DashboardViewModel::get_rows(state);
        if rows.is_empty() {
            writeln!(out, "    (no assets match the current filters)")?;
        }
        for row in &rows {
            writeln!(
                out,
                "{:>3} {:<1} {:<6} {:<20} {:<18} {:>10} {} {:>12} {:<9} {:>6} {:>6} {:>5} {:<10} {:<8}",
                row.rank,
                if row.watched { "*" } else { " " },
                row.symbol,
                truncate(&row.name, 20),
                truncate(&row.sector, 18),
                row.price,
                self.tone(&format!("{:>8}", row.change), row.change_tone),
                row.volume,
                row.volume_profile,
                row.total_score,
                row.ai_score,
                row.risk_score,
                row.signal.to_string(),
                row.trend.to_string(),
            )?;
        }

        if let Some(detail) = DashboardViewModel::get_detail(state) {
            writeln!(out, "\n{} - {}", self.bold(&detail.symbol), detail.name)?;
            let scores: Vec<String> = detail
                .scores
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect();
            writeln!(out, "  {}", scores.join(" | "))?;
            for (label, value) in &detail.insights {
                writeln!(out, "  {:<20} {}", label, value)?;
            }
        }

        let (gainers, losers) = DashboardViewModel::get_top_movers(state);
        writeln!(out, "\nTop gainers: {}", self.movers(&gainers))?;
        writeln!(out, "Top losers:  {}", self.movers(&losers))?;

        let watchlist = DashboardViewModel::get_watchlist(state);
        if !watchlist.is_empty() {
            writeln!(out, "Watchlist:   {}", self.movers(&watchlist))?;
        }

        let stats = DashboardViewModel::get_stats(state);
        writeln!(
            out,
            "Stats: {} assets, {} strong signals, {} up / {} down / {} flat, avg score {}, avg risk {}, avg change {}, volume {}",
            stats.total_assets,
            stats.strong_signals,
            stats.advancing,
            stats.declining,
            stats.unchanged,
            stats.average_total_score,
            stats.average_risk_score,
            stats.average_change,
            stats.total_volume,
        )?;

        let sessions: Vec<String> = DashboardViewModel::get_sessions(state)
            .into_iter()
            .map(|s| {
                let label = format!(
                    "{} {} P{} vol {}/{}",
                    s.name, s.hours, s.priority, s.volatility, s.volume
                );
                if s.active {
                    self.paint(&format!("[ACTIVE] {}", label), GREEN)
                } else {
                    label
                }
            })
            .collect();
        writeln!(out, "Sessions: {}", sessions.join(" | "))?;
        Ok(())
    }

    fn movers(&self, rows: &[MoverRow]) -> String {
        rows.iter()
            .map(|m| format!("{} {}", m.symbol, self.tone(&m.change, m.tone)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn tone(&self, text: &str, tone: Tone) -> String {
        match tone {
            Tone::Positive => self.paint(text, GREEN),
            Tone::Negative => self.paint(text, RED),
            Tone::Neutral => text.to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, BOLD)
    }

    fn paint(&self, text: &str, style: &str) -> String {
        if self.color {
            format!("{}{}{}", style, text, RESET)
        } else {
            text.to_string()
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}
