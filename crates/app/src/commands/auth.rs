//! Login and logout commands.

use clap::Args;
use dialoguer::{Input, Password};

use greentek_application::ApiClient;

use super::CliError;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username; prompted for when omitted
    #[arg(short, long)]
    pub username: Option<String>,
}

/// Prompts for credentials, logs in, and stores the token pair.
pub async fn login(client: &ApiClient, args: &LoginArgs) -> Result<(), CliError> {
    let username = match &args.username {
        Some(username) => username.clone(),
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    client.login(&username, &password).await?;
    println!("Logged in as {username}");
    Ok(())
}

/// Discards the stored tokens.
pub async fn logout(client: &ApiClient) -> Result<(), CliError> {
    client.logout().await;
    println!("Logged out");
    Ok(())
}
