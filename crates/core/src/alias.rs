//! Alias management
//!
//! An alias is a named connection profile for an S3-compatible
//! endpoint: URL, credentials, region, addressing style, and an
//! optional trust-certificate bundle for proxied TLS connections.
//! Aliases are persisted as TOML under the user config directory
//! (override with `OV_CONFIG_DIR`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const ALIAS_FILE: &str = "aliases.toml";

/// A named storage endpoint profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    #[serde(skip)]
    pub name: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket addressing style: "auto", "path", or "dns"
    #[serde(default = "default_bucket_lookup")]
    pub bucket_lookup: String,
    /// Allow TLS connections with an unverifiable peer
    #[serde(default)]
    pub insecure: bool,
    /// PEM bundle of extra trusted roots, for endpoints reached through
    /// a TLS-intercepting proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<PathBuf>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket_lookup() -> String {
    "auto".to_string()
}

impl Alias {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: default_region(),
            bucket_lookup: default_bucket_lookup(),
            insecure: false,
            ca_bundle: None,
        }
    }

    /// Validate the profile before it is saved or used
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_argument("alias name cannot be empty"));
        }
        url::Url::parse(&self.endpoint)
            .map_err(|e| Error::invalid_argument(format!("invalid endpoint URL: {e}")))?;
        if !matches!(self.bucket_lookup.as_str(), "auto" | "path" | "dns") {
            return Err(Error::invalid_argument(
                "bucket lookup must be 'auto', 'path', or 'dns'",
            ));
        }
        if let Some(bundle) = &self.ca_bundle
            && !bundle.is_file()
        {
            return Err(Error::invalid_argument(format!(
                "CA bundle not found: {}",
                bundle.display()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, Alias>,
}

/// Loads, stores, and persists aliases
#[derive(Debug)]
pub struct AliasManager {
    config_dir: PathBuf,
}

impl AliasManager {
    /// Manager rooted at `OV_CONFIG_DIR` or the platform config dir
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os("OV_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("cannot determine config directory".to_string()))?
                .join("ov"),
        };
        Ok(Self { config_dir })
    }

    /// Manager rooted at an explicit directory (used by tests)
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    fn alias_path(&self) -> PathBuf {
        self.config_dir.join(ALIAS_FILE)
    }

    fn load(&self) -> Result<AliasFile> {
        let path = self.alias_path();
        if !path.exists() {
            return Ok(AliasFile::default());
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut file: AliasFile = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
        for (name, alias) in file.aliases.iter_mut() {
            alias.name = name.clone();
        }
        Ok(file)
    }

    fn save(&self, file: &AliasFile) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)
            .map_err(|e| Error::Config(format!("cannot create config directory: {e}")))?;
        let contents = toml::to_string_pretty(file)
            .map_err(|e| Error::Config(format!("cannot serialize aliases: {e}")))?;
        std::fs::write(self.alias_path(), contents)
            .map_err(|e| Error::Config(format!("cannot write alias file: {e}")))?;
        tracing::debug!(path = %self.alias_path().display(), "saved aliases");
        Ok(())
    }

    /// Add or replace an alias
    pub fn set(&self, alias: Alias) -> Result<()> {
        alias.validate()?;
        let mut file = self.load()?;
        file.aliases.insert(alias.name.clone(), alias);
        self.save(&file)
    }

    /// Look up an alias by name
    pub fn get(&self, name: &str) -> Result<Alias> {
        self.load()?
            .aliases
            .get(name)
            .cloned()
            .ok_or_else(|| Error::AliasNotFound(name.to_string()))
    }

    /// All configured aliases, sorted by name
    pub fn list(&self) -> Result<Vec<Alias>> {
        Ok(self.load()?.aliases.into_values().collect())
    }

    /// Remove an alias by name
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut file = self.load()?;
        if file.aliases.remove(name).is_none() {
            return Err(Error::AliasNotFound(name.to_string()));
        }
        self.save(&file)
    }

    /// Directory holding the alias file
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
