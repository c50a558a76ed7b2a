//! Site settings commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use greentek_application::ApiClient;

use super::{print_json, read_json_file, CliError};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// List raw settings rows (requires a session)
    List,
    /// Show the public settings as a nested document
    Public,
    /// Bulk-update settings from a nested JSON document
    Update {
        /// Path to the document JSON
        file: PathBuf,
    },
}

/// Execute settings commands
pub async fn execute(client: &ApiClient, args: &SettingsArgs) -> Result<(), CliError> {
    match &args.command {
        SettingsCommand::List => print_json(&client.settings().list().await?),
        SettingsCommand::Public => print_json(&client.settings().public_document().await?),
        SettingsCommand::Update { file } => {
            let document: serde_json::Value = read_json_file(file)?;
            let result = client.settings().bulk_update(&document).await?;
            println!("{}", result.message);
            Ok(())
        }
    }
}
