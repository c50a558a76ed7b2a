//! CLI command definitions and dispatch.

pub mod article;
pub mod auth;
pub mod contact;
pub mod product;
pub mod settings;
pub mod stats;
pub mod upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use greentek_application::{ApiClient, ClientConfig};
use greentek_infrastructure::{FileTokenStorage, ReqwestTransport, SystemClock};

/// Errors bubbled up to the CLI entry point.
pub type CliError = Box<dyn std::error::Error>;

/// Greentek Admin - back-office CLI for the Greentek site API
#[derive(Debug, Parser)]
#[command(name = "greentek-admin", version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(
        long,
        env = "GREENTEK_API_URL",
        default_value = "http://127.0.0.1:8000/api"
    )]
    pub api_url: String,

    /// Token file location (defaults to the user config directory)
    #[arg(long, env = "GREENTEK_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session tokens
    Login(auth::LoginArgs),
    /// Discard the stored session tokens
    Logout,
    /// Product management
    Product(product::ProductArgs),
    /// Article management
    Article(article::ArticleArgs),
    /// Contact inbox management
    Contact(contact::ContactArgs),
    /// Site settings
    Settings(settings::SettingsArgs),
    /// Dashboard statistics
    Stats,
    /// Admin activity log
    Logs,
    /// Upload a media file
    Upload(upload::UploadArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), CliError> {
        let client = self.build_client()?;
        match &self.command {
            Commands::Login(args) => auth::login(&client, args).await,
            Commands::Logout => auth::logout(&client).await,
            Commands::Product(args) => product::execute(&client, args).await,
            Commands::Article(args) => article::execute(&client, args).await,
            Commands::Contact(args) => contact::execute(&client, args).await,
            Commands::Settings(args) => settings::execute(&client, args).await,
            Commands::Stats => stats::dashboard(&client).await,
            Commands::Logs => stats::activity(&client).await,
            Commands::Upload(args) => upload::execute(&client, args).await,
        }
    }

    /// Wires the client to the reqwest transport, the system clock,
    /// and file-backed token storage.
    fn build_client(&self) -> Result<ApiClient, CliError> {
        let config = ClientConfig::new(self.api_url.clone());
        let transport = ReqwestTransport::new(&config.user_agent)?;
        let token_path = match &self.token_file {
            Some(path) => path.clone(),
            None => FileTokenStorage::default_path()
                .ok_or("cannot determine a config directory; pass --token-file")?,
        };
        let storage = FileTokenStorage::new(token_path);

        let client = ApiClient::new(
            config,
            Arc::new(transport),
            Arc::new(storage),
            Arc::new(SystemClock::new()),
        )?;
        client.on_session_expired(|| {
            eprintln!("Session expired - run `greentek-admin login` to sign in again");
        });
        Ok(client)
    }
}

/// Helper: print a value as stable pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    print!("{}", greentek_infrastructure::to_json_stable(value)?);
    Ok(())
}

/// Helper: parse a JSON file into a payload type.
pub(crate) fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let bytes = std::fs::read(path)?;
    Ok(greentek_infrastructure::from_json_bytes(&bytes)?)
}
