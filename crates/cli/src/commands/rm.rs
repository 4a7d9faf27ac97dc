//! rm command - Delete an object or a specific version
//!
//! Without `--version-id`, a versioning-enabled bucket gets a delete
//! marker and prior versions stay retrievable; an unversioned bucket
//! loses the object permanently. With `--version-id`, exactly that
//! version is removed for good — passing a delete marker's id restores
//! the object's visibility.

use clap::Args;
use ov_core::{DeleteOptions, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete an object or one of its versions
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Target (alias/bucket/key)
    pub target: String,

    /// Permanently delete this exact version
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    bucket: String,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
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

    let mut options = DeleteOptions::new();
    if let Some(v) = &args.version_id {
        options = options.version_id(v);
    }

    match client
        .delete_object(&path.bucket, &path.key, &options)
        .await
    {
        Ok(()) => {
            if formatter.is_json() {
                let output = RmOutput {
                    bucket: path.bucket,
                    key: path.key,
                    version_id: args.version_id,
                };
                formatter.json(&output);
            } else {
                let target = formatter.style_name(&format!("{}/{}", path.bucket, path.key));
                match &args.version_id {
                    Some(v) => formatter.success(&format!(
                        "Deleted version {} of {target}",
                        formatter.style_date(v)
                    )),
                    None => formatter.success(&format!("Deleted {target}")),
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Delete failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
