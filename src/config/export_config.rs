use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportEnvConfig {
    pub directory: PathBuf,
}

impl ExportEnvConfig {
    pub fn from_env() -> Self {
        Self {
            directory: env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
