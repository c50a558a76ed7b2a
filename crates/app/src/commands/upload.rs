//! Media upload command.

use std::path::PathBuf;

use clap::Args;

use greentek_application::ApiClient;

use super::{print_json, CliError};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,

    /// Upload kind reported to the backend
    #[arg(long, default_value = "image")]
    pub kind: String,
}

/// Uploads a file and prints the server's response.
pub async fn execute(client: &ApiClient, args: &UploadArgs) -> Result<(), CliError> {
    let bytes = std::fs::read(&args.file)?;
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or("file name is not valid UTF-8")?;

    let response = client.upload(file_name, bytes, &args.kind).await?;
    print_json(&response)
}
