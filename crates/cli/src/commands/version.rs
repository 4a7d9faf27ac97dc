//! version command - Manage bucket versioning
//!
//! Enable, suspend, or inspect versioning for a bucket, and list object
//! versions. Suspension is not "off": versions created while enabled
//! persist, and only the never-configured state has no version
//! metadata at all.

use clap::{Args, Subcommand};
use ov_core::{ListOptions, ObjectStore as _, VersioningState};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Manage bucket versioning
#[derive(Args, Debug)]
pub struct VersionArgs {
    #[command(subcommand)]
    pub command: VersionCommands,
}

#[derive(Subcommand, Debug)]
pub enum VersionCommands {
    /// Enable versioning for a bucket
    Enable(BucketArg),

    /// Suspend versioning for a bucket (existing versions persist)
    Suspend(BucketArg),

    /// Show versioning status for a bucket
    Info(BucketArg),

    /// List object versions, delete markers included
    List(ListVersionsArgs),
}

#[derive(Args, Debug)]
pub struct BucketArg {
    /// Path to the bucket (alias/bucket)
    pub path: String,
}

#[derive(Args, Debug)]
pub struct ListVersionsArgs {
    /// Path to list versions for (alias/bucket[/prefix])
    pub path: String,

    /// Maximum number of versions to show
    #[arg(short = 'n', long, default_value = "100")]
    pub max: i32,
}

#[derive(Debug, Serialize)]
struct VersioningStatus {
    bucket: String,
    configured: bool,
    status: String,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    key: String,
    version_id: String,
    is_latest: bool,
    is_delete_marker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
}

/// Execute the version command
pub async fn execute(args: VersionArgs, output_config: OutputConfig) -> ExitCode {
    match args.command {
        VersionCommands::Enable(arg) => set_state(arg, true, output_config).await,
        VersionCommands::Suspend(arg) => set_state(arg, false, output_config).await,
        VersionCommands::Info(arg) => execute_info(arg, output_config).await,
        VersionCommands::List(args) => execute_list(args, output_config).await,
    }
}

async fn set_state(args: BucketArg, enable: bool, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_bucket_path(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match super::connect(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.set_versioning(&path.bucket, enable).await {
        Ok(()) => {
            let state = if enable {
                VersioningState::Enabled
            } else {
                VersioningState::Suspended
            };
            if formatter.is_json() {
                let output = VersioningStatus {
                    bucket: path.bucket.clone(),
                    configured: true,
                    status: state.to_string(),
                };
                formatter.json(&output);
            } else {
                let verb = if enable { "enabled" } else { "suspended" };
                formatter.success(&format!(
                    "Versioning {verb} for bucket '{}'",
                    formatter.style_name(&path.bucket)
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to update versioning: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

async fn execute_info(args: BucketArg, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_bucket_path(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match super::connect(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.get_versioning(&path.bucket).await {
        Ok(state) => {
            let status_str = match state {
                Some(s) => s.to_string(),
                None => "Not configured".to_string(),
            };
            if formatter.is_json() {
                let output = VersioningStatus {
                    bucket: path.bucket.clone(),
                    configured: state.is_some(),
                    status: status_str,
                };
                formatter.json(&output);
            } else {
                formatter.println(&format!("Bucket: {}", path.bucket));
                formatter.println(&format!("Versioning: {status_str}"));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to get versioning status: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

async fn execute_list(args: ListVersionsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match ov_core::parse_remote(&args.path) {
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

    let mut options = ListOptions::new().max_keys(args.max);
    if !path.key.is_empty() {
        options = options.prefix(&path.key);
    }

    match client.list_object_versions(&path.bucket, &options).await {
        Ok(versions) => {
            if formatter.is_json() {
                let output: Vec<VersionInfo> = versions
                    .into_iter()
                    .map(|v| VersionInfo {
                        key: v.key,
                        version_id: v.version_id,
                        is_latest: v.is_latest,
                        is_delete_marker: v.is_delete_marker,
                        last_modified: v.last_modified.map(|t| t.to_string()),
                        size_bytes: v.size_bytes,
                        size_human: v
                            .size_bytes
                            .map(|s| humansize::format_size(s as u64, humansize::BINARY)),
                    })
                    .collect();
                formatter.json(&output);
            } else if versions.is_empty() {
                formatter.println("No versions found.");
            } else {
                for v in &versions {
                    let marker = if v.is_delete_marker {
                        formatter.style_marker("[DELETE]")
                    } else {
                        String::new()
                    };
                    let latest = if v.is_latest { "*" } else { " " };
                    let size = v
                        .size_bytes
                        .map(|s| humansize::format_size(s as u64, humansize::BINARY))
                        .unwrap_or_default();

                    formatter.println(&format!(
                        "{latest} {:<40} {:>14} {:>10} {marker}",
                        v.key,
                        v.version_id.chars().take(12).collect::<String>(),
                        size
                    ));
                }
                formatter.println(&format!("\nTotal: {} version(s)", versions.len()));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list versions: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

fn parse_bucket_path(
    path: &str,
    formatter: &Formatter,
) -> Result<ov_core::RemotePath, ExitCode> {
    match ov_core::parse_remote(path) {
        Ok(p) if p.is_bucket() => Ok(p),
        Ok(_) => {
            formatter.error(&format!(
                "Expected a bucket path (alias/bucket), got '{path}'"
            ));
            Err(ExitCode::UsageError)
        }
        Err(e) => {
            formatter.error(&e.to_string());
            Err(ExitCode::UsageError)
        }
    }
}
