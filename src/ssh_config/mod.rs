// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SSH configuration loading and evaluation
//!
//! This module reads OpenSSH-style client (`ssh_config`) and server
//! (`sshd_config`) configuration files and resolves them into a [`Config`]
//! following OpenSSH precedence rules: the first value of an option wins,
//! list options such as `IdentityFile` accumulate, `Host` and `Match` blocks
//! apply conditionally, percent tokens are expanded and `Include` splices in
//! further files.

use std::path::{Path, PathBuf};

use anyhow::Context;

// Internal modules
mod error;
mod include;
mod loader;
mod match_directive;
mod options;
mod parser;
mod path;
mod pattern;
mod provider;
mod tokens;
mod types;

// Re-export public types
pub use error::{ConfigParseError, ParseErrorKind};
pub use options::{MergePolicy, OptionSpec, ValueKind, CLIENT_OPTIONS, SERVER_OPTIONS};
pub use path::{default_client_paths, default_server_paths};
pub use provider::{ConfigFileReader, LocalIdentity, SystemFileReader, SystemIdentity};
pub use types::{AddressFamily, ConfigValue, LimitValue, RekeyLimit};

use loader::ParseContext;
use match_directive::IdentityContext;

const COMPRESSION_ENABLED: &str = "zlib@openssh.com,zlib,none";
const COMPRESSION_DISABLED: &str = "none,zlib@openssh.com,zlib";

/// Resolved configuration options
///
/// A `Config` is produced by a single load call and never changes
/// afterwards. Options are kept in the order they were first applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: Vec<(&'static str, ConfigValue)>,
}

impl Config {
    /// Look up an option by keyword (case-insensitive)
    ///
    /// An option set to `none` returns [`ConfigValue::None`]; an option that
    /// was never set returns `None`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    /// Look up an option, falling back to `default` if it was never set
    pub fn get_or<'a>(&'a self, key: &str, default: &'a ConfigValue) -> &'a ConfigValue {
        self.get(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_int)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(ConfigValue::as_list)
    }

    /// Compression algorithms in preference order
    ///
    /// Derived from the `Compression` option. When it was never set the
    /// caller's `default` is returned.
    pub fn get_compression_algorithms(&self, default: Option<&str>) -> Option<String> {
        match self.get_bool("Compression") {
            Some(true) => Some(COMPRESSION_ENABLED.to_string()),
            Some(false) => Some(COMPRESSION_DISABLED.to_string()),
            None => default.map(str::to_string),
        }
    }

    /// Options in the order they were applied
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigValue)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which configuration files a load should read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigPaths {
    /// Read nothing and produce an empty configuration
    Disabled,
    /// Read whichever of the standard locations exist
    #[default]
    Discover,
    /// Read exactly these files, in order
    Files(Vec<PathBuf>),
}

impl From<PathBuf> for ConfigPaths {
    fn from(path: PathBuf) -> Self {
        ConfigPaths::Files(vec![path])
    }
}

impl From<&Path> for ConfigPaths {
    fn from(path: &Path) -> Self {
        ConfigPaths::Files(vec![path.to_path_buf()])
    }
}

impl From<&PathBuf> for ConfigPaths {
    fn from(path: &PathBuf) -> Self {
        ConfigPaths::Files(vec![path.clone()])
    }
}

impl From<&str> for ConfigPaths {
    fn from(path: &str) -> Self {
        ConfigPaths::Files(vec![PathBuf::from(path)])
    }
}

impl<T: Into<PathBuf>> From<Vec<T>> for ConfigPaths {
    fn from(paths: Vec<T>) -> Self {
        ConfigPaths::Files(paths.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConfigPaths>> From<Option<T>> for ConfigPaths {
    fn from(paths: Option<T>) -> Self {
        paths.map_or(ConfigPaths::Disabled, Into::into)
    }
}

/// Loads configurations through a given file reader and local identity
///
/// [`load_client_config`] and [`load_server_config`] use the default loader,
/// which reads from the file system and queries the operating system.
#[derive(Clone, Copy)]
pub struct ConfigLoader<'a> {
    reader: &'a dyn ConfigFileReader,
    identity: &'a dyn LocalIdentity,
}

impl Default for ConfigLoader<'static> {
    fn default() -> Self {
        Self {
            reader: &SystemFileReader,
            identity: &SystemIdentity,
        }
    }
}

impl<'a> ConfigLoader<'a> {
    pub fn new(reader: &'a dyn ConfigFileReader, identity: &'a dyn LocalIdentity) -> Self {
        Self { reader, identity }
    }

    /// Load a client configuration for connecting to `host`
    ///
    /// `user` and `port` are values supplied by the caller. When present,
    /// `User` and `Port` directives in the files are ignored.
    pub fn load_client(
        &self,
        local_user: &str,
        user: Option<&str>,
        host: &str,
        port: Option<u16>,
        paths: impl Into<ConfigPaths>,
    ) -> Result<Config, ConfigParseError> {
        let paths = self.resolve_paths(paths.into(), || {
            default_client_paths(self.identity.home_dir().as_deref())
        });

        let identity = IdentityContext::new(local_user, user, host, port);
        ParseContext::client(identity, self.reader, self.identity).load(&paths)
    }

    /// Load a server configuration
    pub fn load_server(&self, paths: impl Into<ConfigPaths>) -> Result<Config, ConfigParseError> {
        let paths = self.resolve_paths(paths.into(), default_server_paths);
        ParseContext::server(self.reader, self.identity).load(&paths)
    }

    fn resolve_paths(
        &self,
        paths: ConfigPaths,
        defaults: impl FnOnce() -> Vec<PathBuf>,
    ) -> Vec<PathBuf> {
        match paths {
            ConfigPaths::Disabled => Vec::new(),
            ConfigPaths::Files(files) => files,
            ConfigPaths::Discover => defaults()
                .into_iter()
                .filter(|path| self.reader.exists(path))
                .collect(),
        }
    }
}

/// Load a client configuration from the file system
pub fn load_client_config(
    local_user: &str,
    user: Option<&str>,
    host: &str,
    port: Option<u16>,
    paths: impl Into<ConfigPaths>,
) -> Result<Config, ConfigParseError> {
    ConfigLoader::default().load_client(local_user, user, host, port, paths)
}

/// Load a server configuration from the file system
pub fn load_server_config(paths: impl Into<ConfigPaths>) -> Result<Config, ConfigParseError> {
    ConfigLoader::default().load_server(paths)
}

/// Load a client configuration on the blocking thread pool
pub async fn load_client_config_async(
    local_user: String,
    user: Option<String>,
    host: String,
    port: Option<u16>,
    paths: ConfigPaths,
) -> anyhow::Result<Config> {
    let config = tokio::task::spawn_blocking(move || {
        load_client_config(&local_user, user.as_deref(), &host, port, paths)
    })
    .await
    .context("SSH client configuration task failed")??;

    Ok(config)
}

/// Load a server configuration on the blocking thread pool
pub async fn load_server_config_async(paths: ConfigPaths) -> anyhow::Result<Config> {
    let config = tokio::task::spawn_blocking(move || load_server_config(paths))
        .await
        .context("SSH server configuration task failed")??;

    Ok(config)
}
