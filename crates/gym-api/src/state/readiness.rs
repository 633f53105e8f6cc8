//! Readiness checks against the backing stores

use async_trait::async_trait;
use gym_cache::RedisPool;
use gym_db::PgPool;
use tracing::warn;

/// Dependency health as seen by `/health/ready`
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Whether the database answers a trivial query
    async fn database(&self) -> bool;

    /// Whether Redis answers a PING
    async fn cache(&self) -> bool;
}

/// Probe backed by the real PostgreSQL and Redis pools
#[derive(Clone)]
pub struct InfraProbe {
    pool: PgPool,
    redis: RedisPool,
}

impl InfraProbe {
    pub fn new(pool: PgPool, redis: RedisPool) -> Self {
        Self { pool, redis }
    }
}

#[async_trait]
impl ReadinessProbe for InfraProbe {
    async fn database(&self) -> bool {
        match gym_db::ping(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Database readiness check failed");
                false
            }
        }
    }

    async fn cache(&self) -> bool {
        match self.redis.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Redis readiness check failed");
                false
            }
        }
    }
}
