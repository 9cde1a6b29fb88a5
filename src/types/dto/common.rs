use poem_openapi::Object;
use serde::Deserialize;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Database reachability ("ok" or "unavailable")
    pub database: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Body of every delete form. The record is only deleted when `confirm`
/// is ticked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteForm {
    pub confirm: String,
}

impl DeleteForm {
    pub fn confirmed(&self) -> bool {
        !self.confirm.trim().is_empty()
    }
}

/// Escalation form on the application error page
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorReportForm {
    /// Path of the request that failed
    pub failed_path: String,
    pub description: String,
}
