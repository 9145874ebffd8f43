use crate::domain::errors::ExportError;
use crate::domain::market::AssetSnapshot;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes point-in-time JSON exports of the scored asset set.
pub struct SnapshotExporter {
    directory: PathBuf,
}

impl SnapshotExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `trading-data-<YYYY-MM-DD>.json`
    pub fn file_name(date: NaiveDate) -> String {
        format!("trading-data-{}.json", date.format("%Y-%m-%d"))
    }

    pub fn export(&self, assets: &[AssetSnapshot], date: NaiveDate) -> Result<PathBuf, ExportError> {
        let content = serde_json::to_string_pretty(assets)?;
        let path = self.directory.join(Self::file_name(date));

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|source| ExportError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Exported {} assets to {:?}", assets.len(), path);
        Ok(path)
    }
}
