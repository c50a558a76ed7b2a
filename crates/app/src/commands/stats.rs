//! Dashboard statistics commands.

use greentek_application::ApiClient;

use super::{print_json, CliError};

/// Prints the dashboard counters.
pub async fn dashboard(client: &ApiClient) -> Result<(), CliError> {
    print_json(&client.dashboard_stats().await?)
}

/// Prints the admin activity log.
pub async fn activity(client: &ApiClient) -> Result<(), CliError> {
    print_json(&client.activity_logs().await?)
}
