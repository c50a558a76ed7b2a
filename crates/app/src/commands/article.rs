//! Article management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use greentek_application::ApiClient;
use greentek_domain::ArticleDraft;

use super::{print_json, read_json_file, CliError};

/// Arguments for article commands
#[derive(Debug, Args)]
pub struct ArticleArgs {
    /// Article subcommand
    #[command(subcommand)]
    pub command: ArticleCommand,
}

/// Article subcommands
#[derive(Debug, Subcommand)]
pub enum ArticleCommand {
    /// List articles
    List,
    /// Show one article
    Show {
        /// Article id
        id: String,
    },
    /// Create an article from a JSON draft file
    Create {
        /// Path to the draft JSON
        file: PathBuf,
    },
    /// Replace an article from a JSON draft file
    Update {
        /// Article id
        id: String,
        /// Path to the draft JSON
        file: PathBuf,
    },
    /// Delete an article
    Delete {
        /// Article id
        id: String,
    },
}

/// Execute article commands
pub async fn execute(client: &ApiClient, args: &ArticleArgs) -> Result<(), CliError> {
    match &args.command {
        ArticleCommand::List => print_json(&client.articles().list().await?),
        ArticleCommand::Show { id } => print_json(&client.articles().get(id).await?),
        ArticleCommand::Create { file } => {
            let draft: ArticleDraft = read_json_file(file)?;
            print_json(&client.articles().create(&draft).await?)
        }
        ArticleCommand::Update { id, file } => {
            let draft: ArticleDraft = read_json_file(file)?;
            print_json(&client.articles().update(id, &draft).await?)
        }
        ArticleCommand::Delete { id } => {
            client.articles().delete(id).await?;
            println!("Deleted article {id}");
            Ok(())
        }
    }
}
