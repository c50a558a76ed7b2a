//! Product management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use greentek_application::ApiClient;
use greentek_domain::ProductDraft;

use super::{print_json, read_json_file, CliError};

/// Arguments for product commands
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product subcommand
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Product subcommands
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products
    List {
        /// Include inactive products (requires a session)
        #[arg(long)]
        all: bool,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Create a product from a JSON draft file
    Create {
        /// Path to the draft JSON
        file: PathBuf,
    },
    /// Replace a product from a JSON draft file
    Update {
        /// Product id
        id: String,
        /// Path to the draft JSON
        file: PathBuf,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

/// Execute product commands
pub async fn execute(client: &ApiClient, args: &ProductArgs) -> Result<(), CliError> {
    match &args.command {
        ProductCommand::List { all } => {
            let products = if *all {
                client.products().list().await?
            } else {
                client.products().list_active().await?
            };
            print_json(&products)
        }
        ProductCommand::Show { id } => print_json(&client.products().get(id).await?),
        ProductCommand::Create { file } => {
            let draft: ProductDraft = read_json_file(file)?;
            print_json(&client.products().create(&draft).await?)
        }
        ProductCommand::Update { id, file } => {
            let draft: ProductDraft = read_json_file(file)?;
            print_json(&client.products().update(id, &draft).await?)
        }
        ProductCommand::Delete { id } => {
            client.products().delete(id).await?;
            println!("Deleted product {id}");
            Ok(())
        }
    }
}
