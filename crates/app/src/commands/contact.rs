//! Contact inbox commands.

use clap::{Args, Subcommand};

use greentek_application::ApiClient;
use greentek_domain::ContactReply;

use super::{print_json, CliError};

/// Arguments for contact commands
#[derive(Debug, Args)]
pub struct ContactArgs {
    /// Contact subcommand
    #[command(subcommand)]
    pub command: ContactCommand,
}

/// Contact subcommands
#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// List contact messages
    List,
    /// Show one contact message
    Show {
        /// Contact id
        id: String,
    },
    /// Record an admin reply
    Reply {
        /// Contact id
        id: String,
        /// Reply text
        message: String,
    },
    /// Delete a contact message
    Delete {
        /// Contact id
        id: String,
    },
}

/// Execute contact commands
pub async fn execute(client: &ApiClient, args: &ContactArgs) -> Result<(), CliError> {
    match &args.command {
        ContactCommand::List => print_json(&client.contacts().list().await?),
        ContactCommand::Show { id } => print_json(&client.contacts().get(id).await?),
        ContactCommand::Reply { id, message } => {
            let reply = ContactReply {
                admin_reply: message.clone(),
            };
            print_json(&client.contacts().reply(id, &reply).await?)
        }
        ContactCommand::Delete { id } => {
            client.contacts().delete(id).await?;
            println!("Deleted contact {id}");
            Ok(())
        }
    }
}
