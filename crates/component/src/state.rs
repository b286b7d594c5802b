use std::sync::Arc;

use channelpush_db::DbPool;

use crate::config::ComponentConfig;

/// Shared component state handed to every IQ handler.
///
/// Cheaply cloneable; the pool is internally reference-counted. Handlers
/// themselves are stateless across requests.
#[derive(Clone)]
pub struct Component {
    /// Database connection pool.
    pub pool: DbPool,
    /// Component configuration.
    pub config: Arc<ComponentConfig>,
}

impl Component {
    pub fn new(pool: DbPool, config: ComponentConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Connect to the configured database, run pending migrations, and
    /// assemble the component state.
    pub async fn connect(config: ComponentConfig) -> Result<Self, sqlx::Error> {
        let pool = channelpush_db::create_pool(&config.database_url).await?;
        channelpush_db::MIGRATOR.run(&pool).await?;
        tracing::info!(domain = %config.domain, "Notification-settings component ready");
        Ok(Self::new(pool, config))
    }
}
