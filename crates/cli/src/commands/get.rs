//! get command - Download an object
//!
//! Fetches the current visible version, or an exact revision with
//! `--version-id` (which works even when a delete marker hides the
//! object). The local file is written atomically.

use std::path::PathBuf;

use clap::Args;
use ov_core::{DownloadOptions, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Download an object to a local file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Source (alias/bucket/key)
    pub source: String,

    /// Local destination path
    pub file: PathBuf,

    /// Download this exact version instead of the current one
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    bucket: String,
    key: String,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match ov_core::parse_remote_object(&args.source) {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let client = match super::connect(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut options = DownloadOptions::new();
    if let Some(v) = &args.version_id {
        options = options.version_id(v);
    }

    match client
        .download_file(&path.bucket, &path.key, &args.file, &options)
        .await
    {
        Ok(()) => {
            if formatter.is_json() {
                let output = GetOutput {
                    bucket: path.bucket,
                    key: path.key,
                    file: args.file.display().to_string(),
                    version_id: args.version_id,
                };
                formatter.json(&output);
            } else {
                let source = formatter.style_name(&format!("{}/{}", path.bucket, path.key));
                formatter.success(&format!(
                    "Downloaded {source} to {}",
                    args.file.display()
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Download failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
