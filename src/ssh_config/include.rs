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

//! Include directive support for SSH configuration
//!
//! This module resolves the arguments of an `Include` directive to files and
//! tracks which files are currently being parsed so that a file including
//! itself, directly or through other files, is reported as a cycle.

use std::path::{Path, PathBuf};

use super::error::ParseErrorKind;
use super::path::expand_tilde;
use super::provider::ConfigFileReader;

/// Files whose parse is in progress, outermost first
#[derive(Debug, Default)]
pub(super) struct IncludeStack {
    active: Vec<PathBuf>,
}

impl IncludeStack {
    /// Enter a file, failing if it is already being parsed
    pub fn enter(&mut self, canonical: PathBuf) -> Result<(), ParseErrorKind> {
        if self.active.contains(&canonical) {
            return Err(ParseErrorKind::IncludeCycle(canonical));
        }

        self.active.push(canonical);
        Ok(())
    }

    /// Leave the innermost file
    pub fn exit(&mut self) {
        self.active.pop();
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.active.len()
    }
}

/// Resolve one `Include` argument to the files it names
///
/// Relative paths are taken relative to the directory of the including
/// file, and `~/` refers to the home directory. Glob patterns expand to
/// their matches in lexical order and may match nothing; a literal path is
/// returned as-is and must be readable by the caller.
pub(super) fn resolve_include_pattern(
    pattern: &str,
    including_file: &Path,
    home: Option<&Path>,
    reader: &dyn ConfigFileReader,
) -> Result<Vec<PathBuf>, ParseErrorKind> {
    let expanded = expand_tilde(pattern, home);

    let target = if expanded.is_relative() {
        including_file
            .parent()
            .map_or_else(|| expanded.clone(), |dir| dir.join(&expanded))
    } else {
        expanded
    };

    if !is_glob(pattern) {
        return Ok(vec![target]);
    }

    let pattern_str = target.to_string_lossy();
    let files = reader
        .glob(&pattern_str)
        .map_err(|source| ParseErrorKind::ReadFailed {
            path: target.clone(),
            source,
        })?;

    if files.is_empty() {
        tracing::debug!("Include pattern '{}' matched no files", pattern);
    }

    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssh_config::provider::SystemFileReader;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_include_stack_detects_cycle() {
        let mut stack = IncludeStack::default();
        stack.enter(PathBuf::from("/a")).unwrap();
        stack.enter(PathBuf::from("/b")).unwrap();
        assert!(matches!(
            stack.enter(PathBuf::from("/a")),
            Err(ParseErrorKind::IncludeCycle(_))
        ));

        // Sibling includes of the same file are not cycles
        stack.exit();
        stack.enter(PathBuf::from("/b")).unwrap();
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_relative_include_uses_including_directory() {
        let files = resolve_include_pattern(
            "extra.conf",
            Path::new("/etc/ssh/ssh_config"),
            None,
            &SystemFileReader,
        )
        .unwrap();
        assert_eq!(files, vec![PathBuf::from("/etc/ssh/extra.conf")]);

        let files =
            resolve_include_pattern("include", Path::new("config"), None, &SystemFileReader)
                .unwrap();
        assert_eq!(files, vec![PathBuf::from("include")]);
    }

    #[test]
    fn test_absolute_and_home_includes() {
        let home = Path::new("/home/user");
        let files = resolve_include_pattern(
            "/etc/ssh/other",
            Path::new("/home/user/.ssh/config"),
            Some(home),
            &SystemFileReader,
        )
        .unwrap();
        assert_eq!(files, vec![PathBuf::from("/etc/ssh/other")]);

        let files = resolve_include_pattern(
            "~/.ssh/extra",
            Path::new("/etc/ssh/ssh_config"),
            Some(home),
            &SystemFileReader,
        )
        .unwrap();
        assert_eq!(files, vec![PathBuf::from("/home/user/.ssh/extra")]);
    }

    #[test]
    fn test_glob_include() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join("config.d");
        fs::create_dir(&config_dir).unwrap();
        fs::write(config_dir.join("02-second.conf"), "Port 2").unwrap();
        fs::write(config_dir.join("01-first.conf"), "Port 1").unwrap();

        let main_config = temp_dir.path().join("config");
        let files =
            resolve_include_pattern("config.d/*.conf", &main_config, None, &SystemFileReader)
                .unwrap();
        assert_eq!(
            files,
            vec![
                config_dir.join("01-first.conf"),
                config_dir.join("02-second.conf")
            ]
        );

        let files =
            resolve_include_pattern("missing.d/*", &main_config, None, &SystemFileReader)
                .unwrap();
        assert!(files.is_empty());
    }
}
