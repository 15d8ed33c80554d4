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

//! Collaborators used while loading a configuration
//!
//! The loader never touches the file system or queries the operating system
//! directly. File contents come from a [`ConfigFileReader`] and local
//! identity details (host name, home directory, user id) come from a
//! [`LocalIdentity`]. The `System*` implementations are used by default;
//! tests substitute their own.

use std::io;
use std::path::{Path, PathBuf};

/// Source of configuration file contents
pub trait ConfigFileReader {
    /// Read a whole configuration file
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Whether a candidate default configuration file is present
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Canonical form of a path, used to detect include cycles
    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    /// Expand a glob pattern to the matching files in lexical order
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let entries = glob::glob_with(pattern, options)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("Skipping unreadable glob entry for '{}': {}", pattern, e);
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Reads configuration files from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileReader;

impl ConfigFileReader for SystemFileReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Details about the local machine and user
pub trait LocalIdentity {
    /// Fully qualified local host name
    fn hostname(&self) -> String;

    /// Home directory of the local user
    fn home_dir(&self) -> Option<PathBuf>;

    /// Numeric user id, where the platform has one
    fn uid(&self) -> Option<u32>;
}

/// Queries the running operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl LocalIdentity for SystemIdentity {
    fn hostname(&self) -> String {
        match whoami::fallible::hostname() {
            Ok(hostname) => hostname,
            Err(e) => {
                tracing::debug!("Unable to determine local hostname: {}", e);
                "localhost".to_string()
            }
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    #[cfg(unix)]
    fn uid(&self) -> Option<u32> {
        Some(nix::unistd::getuid().as_raw())
    }

    #[cfg(not(unix))]
    fn uid(&self) -> Option<u32> {
        None
    }
}
