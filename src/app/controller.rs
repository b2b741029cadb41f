use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::TomlConfigStore;
use crate::domain::{AppConfig, DomainError};
use crate::infrastructure::init_logging;
use crate::ports::ConfigStore;

/// Bootstraps configuration and logging and hands out the paths the
/// rest of the application works from.
pub struct AppController {
    config: AppConfig,
    config_store: Arc<TomlConfigStore>,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    pub fn new() -> Result<Self, DomainError> {
        let config_store = Arc::new(TomlConfigStore::new()?);
        let config = config_store.load()?;

        let log_guard = init_logging(
            &config_store.logs_dir(),
            &config.logging.level,
            config.logging.file_logging,
        )?;

        info!("Murmur starting up");

        Ok(Self {
            config,
            config_store,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn data_dir(&self) -> std::path::PathBuf {
        self.config_store.data_dir()
    }
}
