use chrono::Utc;
use poem_openapi::{OpenApi, Tags, payload::Json};
use sea_orm::DatabaseConnection;

use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi {
    db: DatabaseConnection,
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

impl HealthApi {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Reports the service status and whether the database answers a ping
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let (status, database) = match self.db.ping().await {
            Ok(()) => ("healthy", "ok"),
            Err(e) => {
                tracing::error!("Health check database ping failed: {}", e);
                ("degraded", "unavailable")
            }
        };

        Json(HealthResponse {
            status: status.to_string(),
            database: database.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
