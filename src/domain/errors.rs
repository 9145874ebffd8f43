use std::path::PathBuf;
use thiserror::Error;

/// A raw feed record that cannot be turned into a scored asset.
///
/// Any of these rejects the whole refresh batch; the dashboard keeps
/// showing the last good snapshot set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataFormatError {
    #[error("Missing value for field '{field}' (record #{position})")]
    EmptyField { position: usize, field: &'static str },

    #[error("Invalid number for {symbol}.{field}: '{value}'")]
    InvalidNumber {
        symbol: String,
        field: &'static str,
        value: String,
    },

    #[error("Non-finite value for {symbol}.{field}")]
    NonFinite { symbol: String, field: &'static str },

    #[error("Non-positive price for {symbol}: {value}")]
    NonPositivePrice { symbol: String, value: String },

    #[error("Unknown sector for {symbol}: '{value}'")]
    UnknownSector { symbol: String, value: String },

    #[error("Unknown volume profile for {symbol}: '{value}'")]
    UnknownVolumeProfile { symbol: String, value: String },

    #[error("Duplicate symbol in snapshot batch: {symbol}")]
    DuplicateSymbol { symbol: String },
}

/// Errors raised while writing the JSON export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize snapshot set: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A user command line that does not parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: '{0}'. Try 'sort ai', 'watch NVDA', 'refresh' or 'quit'.")]
    Unknown(String),

    #[error("Invalid argument for '{command}': '{value}'")]
    InvalidArgument { command: &'static str, value: String },
}
