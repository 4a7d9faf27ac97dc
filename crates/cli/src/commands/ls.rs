//! ls command - List buckets or objects
//!
//! With a bare alias, lists the account's buckets; with
//! `alias/bucket[/prefix]`, lists objects under the prefix.

use clap::Args;
use ov_core::{ListOptions, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List buckets or objects
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Alias or path to list (alias or alias/bucket[/prefix])
    pub path: String,

    /// Maximum number of entries to show
    #[arg(short = 'n', long)]
    pub max: Option<i32>,
}

#[derive(Debug, Serialize)]
struct BucketEntry {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
}

#[derive(Debug, Serialize)]
struct ObjectEntry {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    // A bare alias (no slash) lists buckets
    if !args.path.contains('/') {
        return list_buckets(&args.path, &formatter).await;
    }

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

    let mut options = ListOptions::new();
    if !path.key.is_empty() {
        options = options.prefix(&path.key);
    }
    if let Some(max) = args.max {
        options = options.max_keys(max);
    }

    match client.list_objects(&path.bucket, &options).await {
        Ok(objects) => {
            if formatter.is_json() {
                let output: Vec<ObjectEntry> = objects
                    .into_iter()
                    .map(|o| ObjectEntry {
                        key: o.key,
                        size_bytes: o.size_bytes,
                        size_human: o
                            .size_bytes
                            .map(|s| humansize::format_size(s as u64, humansize::BINARY)),
                        last_modified: o.last_modified.map(|t| t.to_string()),
                    })
                    .collect();
                formatter.json(&output);
            } else if objects.is_empty() {
                formatter.println("No objects found.");
            } else {
                for o in &objects {
                    let size = o
                        .size_bytes
                        .map(|s| humansize::format_size(s as u64, humansize::BINARY))
                        .unwrap_or_default();
                    let date = o
                        .last_modified
                        .map(|t| t.to_string())
                        .unwrap_or_default();
                    formatter.println(&format!(
                        "{} {:>10} {}",
                        formatter.style_date(&format!("{date:<24}")),
                        formatter.style_size(&size),
                        o.key
                    ));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list objects: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

async fn list_buckets(alias: &str, formatter: &Formatter) -> ExitCode {
    let client = match super::connect(alias, formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.list_buckets().await {
        Ok(buckets) => {
            if formatter.is_json() {
                let output: Vec<BucketEntry> = buckets
                    .into_iter()
                    .map(|b| BucketEntry {
                        name: b.name,
                        created: b.created.map(|t| t.to_string()),
                    })
                    .collect();
                formatter.json(&output);
            } else if buckets.is_empty() {
                formatter.println("No buckets found.");
            } else {
                for b in &buckets {
                    let date = b.created.map(|t| t.to_string()).unwrap_or_default();
                    formatter.println(&format!(
                        "{} {}",
                        formatter.style_date(&format!("{date:<24}")),
                        formatter.style_name(&b.name)
                    ));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
