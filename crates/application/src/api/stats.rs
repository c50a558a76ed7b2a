//! Dashboard statistics and activity log endpoints.

use greentek_domain::{ActivityLog, DashboardStats};

use super::ListEnvelope;
use crate::client::{ApiCall, ApiClient};
use crate::error::ApiResult;

impl ApiClient {
    /// Fetches the dashboard counters.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.request(ApiCall::get("/stats/")).await
    }

    /// Fetches the admin activity log.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn activity_logs(&self) -> ApiResult<Vec<ActivityLog>> {
        let envelope: ListEnvelope<ActivityLog> =
            self.request(ApiCall::get("/activity-logs/")).await?;
        Ok(envelope.into_vec())
    }
}
