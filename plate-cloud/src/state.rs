//! Application state for plate-cloud

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Secret for staff bearer tokens
    pub staff_jwt_secret: String,
    /// Dashboard recent-orders size
    pub recent_orders_limit: i64,
}

impl AppState {
    /// Connect to PostgreSQL and apply pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(&config.database_url)
            .await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            staff_jwt_secret: config.staff_jwt_secret.clone(),
            recent_orders_limit: config.recent_orders_limit,
        }
    }
}
