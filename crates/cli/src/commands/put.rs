//! put command - Upload a local file
//!
//! Uploads a file under the given key and reports the version id the
//! store assigned, when the bucket is versioned.

use std::path::PathBuf;

use clap::Args;
use ov_core::{ObjectStore as _, UploadOptions};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload a local file to the store
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Destination (alias/bucket/key)
    pub target: String,

    /// Content type to store (guessed from the extension when omitted)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Cache-Control header to store with the object
    #[arg(long)]
    pub cache_control: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    bucket: String,
    key: String,
    size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match ov_core::parse_remote_object(&args.target) {
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

    let mut options = UploadOptions::new();
    if let Some(ct) = &args.content_type {
        options = options.content_type(ct);
    }
    if let Some(cc) = &args.cache_control {
        options = options.cache_control(cc);
    }

    match client
        .upload_file(&args.file, &path.bucket, &path.key, &options)
        .await
    {
        Ok(receipt) => {
            if formatter.is_json() {
                let output = PutOutput {
                    bucket: receipt.bucket,
                    key: receipt.key,
                    size_bytes: receipt.size_bytes,
                    etag: receipt.etag,
                    version_id: receipt.version_id,
                };
                formatter.json(&output);
            } else {
                let target = formatter.style_name(&format!("{}/{}", receipt.bucket, receipt.key));
                match &receipt.version_id {
                    Some(v) => formatter.success(&format!(
                        "Uploaded {} to {target} (version {})",
                        args.file.display(),
                        formatter.style_date(v)
                    )),
                    None => formatter.success(&format!(
                        "Uploaded {} to {target}",
                        args.file.display()
                    )),
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Upload failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
