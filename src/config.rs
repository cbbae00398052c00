use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_derive::Deserialize;
use thiserror::Error;

/// The `ipv6` value asking for the current public IPv6 address to be looked up.
pub const AUTO_IPV6: &str = "auto";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine the user configuration directory")]
    NoConfigDir,

    #[error("unable to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("`token_command` must name a program to run")]
    EmptyTokenCommand,
}

/// Settings of a single `[domains.<name>]` table. Every key is optional.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DomainSettings {
    /// Ask Duck DNS to clear the records instead of setting them.
    pub clear: bool,

    /// IPv4 address to set. Left empty, Duck DNS falls back to the address
    /// the request came from.
    pub ip: Box<str>,

    /// A literal IPv6 address, [`AUTO_IPV6`], or empty to leave it unset.
    pub ipv6: Box<str>,
}

impl DomainSettings {
    pub fn is_auto_ipv6(&self) -> bool {
        &*self.ipv6 == AUTO_IPV6
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Command line whose standard output is the Duck DNS token.
    pub token_command: Vec<Box<str>>,

    pub domains: BTreeMap<Box<str>, DomainSettings>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&text, path)
    }

    /// Parses a configuration document that did not come from a file.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new("<memory>"))
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Config>(text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        if config.token_command.is_empty() {
            return Err(ConfigError::EmptyTokenCommand);
        }

        Ok(config)
    }
}

/// `config.toml` inside the platform's per-user configuration directory.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}
