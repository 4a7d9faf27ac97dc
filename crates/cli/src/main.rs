//! ov - versioned object storage client
//!
//! A command-line client for S3-compatible stores with first-class
//! support for bucket versioning: uploads report version ids, deletes
//! distinguish markers from permanent removals, and downloads can
//! target any revision.

mod commands;
mod exit_code;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputConfig;

#[derive(Parser, Debug)]
#[command(
    name = "ov",
    version,
    about = "Versioned object storage client",
    long_about = "Manage S3-compatible object storage with full versioning support:\n\
                  upload, download, and delete objects or specific versions, and\n\
                  control per-bucket versioning state."
)]
struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage storage service aliases
    Alias {
        #[command(subcommand)]
        command: commands::alias::AliasCommands,
    },

    /// List buckets or objects
    Ls(commands::ls::LsArgs),

    /// Upload a local file
    Put(commands::put::PutArgs),

    /// Download an object
    Get(commands::get::GetArgs),

    /// Delete an object or one of its versions
    Rm(commands::rm::RmArgs),

    /// Manage bucket versioning
    Version(commands::version::VersionArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("OV_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output_config = OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    let exit_code = match cli.command {
        Commands::Alias { command } => commands::alias::execute(command, output_config).await,
        Commands::Ls(args) => commands::ls::execute(args, output_config).await,
        Commands::Put(args) => commands::put::execute(args, output_config).await,
        Commands::Get(args) => commands::get::execute(args, output_config).await,
        Commands::Rm(args) => commands::rm::execute(args, output_config).await,
        Commands::Version(args) => commands::version::execute(args, output_config).await,
    };

    std::process::exit(exit_code.code());
}
