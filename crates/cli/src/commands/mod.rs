//! CLI subcommands

pub mod alias;
pub mod get;
pub mod ls;
pub mod put;
pub mod rm;
pub mod version;

use ov_core::AliasManager;
use ov_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Resolve an alias and build a client for it
///
/// Prints the failure and returns the exit code so command bodies can
/// bail with `?`-like brevity.
pub(crate) async fn connect(alias_name: &str, formatter: &Formatter) -> Result<S3Client, ExitCode> {
    let alias_manager = match AliasManager::new() {
        Ok(am) => am,
        Err(e) => {
            formatter.error(&format!("Failed to load aliases: {e}"));
            return Err(ExitCode::GeneralError);
        }
    };

    let alias = match alias_manager.get(alias_name) {
        Ok(a) => a,
        Err(_) => {
            formatter.error(&format!("Alias '{alias_name}' not found"));
            return Err(ExitCode::NotFound);
        }
    };

    match S3Client::new(alias).await {
        Ok(c) => Ok(c),
        Err(e) => {
            formatter.error(&format!("Failed to create client: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}
