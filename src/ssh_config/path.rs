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

//! Path handling for SSH configuration files

use std::path::{Path, PathBuf};

/// System-wide client configuration
pub const SYSTEM_CLIENT_CONFIG: &str = "/etc/ssh/ssh_config";
/// System-wide server configuration
pub const SYSTEM_SERVER_CONFIG: &str = "/etc/ssh/sshd_config";

/// Candidate client configuration files, most specific first
pub fn default_client_paths(home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(home) = home {
        paths.push(home.join(".ssh").join("config"));
    }
    paths.push(PathBuf::from(SYSTEM_CLIENT_CONFIG));
    paths
}

/// Candidate server configuration files
pub fn default_server_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(SYSTEM_SERVER_CONFIG)]
}

/// Expand a leading `~/` to the home directory
///
/// Paths without the prefix, or with no known home directory, are returned
/// unchanged.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(stripped), Some(home)) => home.join(stripped),
        _ if path == "~" => home.map_or_else(|| PathBuf::from(path), Path::to_path_buf),
        _ => PathBuf::from(path),
    }
}
