use crate::domain::errors::CommandError;
use crate::domain::filters::{RiskFilter, SectorFilter};
use crate::domain::market::Market;
use crate::domain::sort::SortKey;
use std::str::FromStr;

/// User-facing controls, applied to the dashboard state in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SelectMarket(Market),
    SelectSector(SectorFilter),
    SelectRisk(RiskFilter),
    Search(String),
    SortBy(SortKey),
    ToggleWatch(String),
    /// Expand the symbol's detail row, or collapse it if already expanded
    ToggleExpand(String),
    SetAutoRefresh(bool),
    Refresh,
    ClearAlerts,
    Export,
    Quit,
}

/// Parse one line of console input.
///
/// `search` with no argument clears the search text. Symbols are upper-cased.
pub fn parse_command(input: &str) -> Result<UserCommand, CommandError> {
    let input = input.trim();
    let parts: Vec<&str> = input.split_whitespace().collect();

    match parts.as_slice() {
        [] => Err(CommandError::Empty),
        ["quit"] | ["exit"] | ["q"] => Ok(UserCommand::Quit),
        ["refresh"] | ["r"] => Ok(UserCommand::Refresh),
        ["clear"] => Ok(UserCommand::ClearAlerts),
        ["export"] => Ok(UserCommand::Export),
        ["search"] => Ok(UserCommand::Search(String::new())),
        ["search", ..] => {
            // Keep inner spacing: "search bank of" searches for "bank of"
            let text = input["search".len()..].trim();
            Ok(UserCommand::Search(text.to_string()))
        }
        ["sector", rest @ ..] if !rest.is_empty() => {
            let value = rest.join(" ");
            SectorFilter::from_str(&value)
                .map(UserCommand::SelectSector)
                .map_err(|_| invalid("sector", &value))
        }
        ["risk", value] => RiskFilter::from_str(value)
            .map(UserCommand::SelectRisk)
            .map_err(|_| invalid("risk", value)),
        ["sort", value] => SortKey::from_str(value)
            .map(UserCommand::SortBy)
            .map_err(|_| invalid("sort", value)),
        ["market", value] => Market::from_str(value)
            .map(UserCommand::SelectMarket)
            .map_err(|_| invalid("market", value)),
        ["watch", symbol] => Ok(UserCommand::ToggleWatch(symbol.to_uppercase())),
        ["expand", symbol] => Ok(UserCommand::ToggleExpand(symbol.to_uppercase())),
        ["auto", value] => match value.to_lowercase().as_str() {
            "on" | "true" | "1" => Ok(UserCommand::SetAutoRefresh(true)),
            "off" | "false" | "0" => Ok(UserCommand::SetAutoRefresh(false)),
            _ => Err(invalid("auto", value)),
        },
        _ => Err(CommandError::Unknown(input.to_string())),
    }
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}
