use std::sync::Arc;

use thesis_config::ThesisConfig;
use thesis_db::notify::TracingNotifier;
use thesis_db::service::ThesisService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ThesisService,
    pub config: ThesisConfig,
}

impl AppContext {
    /// Open the configured database. Notifications are written to the log;
    /// delivery belongs to whatever embeds the service.
    pub async fn init(config: ThesisConfig) -> anyhow::Result<Self> {
        tracing::debug!(path = %config.database.path, "opening thesis database");
        let service = ThesisService::open(&config, Arc::new(TracingNotifier)).await?;
        Ok(Self { service, config })
    }
}
