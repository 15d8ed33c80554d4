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

//! Error types for configuration loading.
//!
//! Every failure while loading a configuration is reported as a single
//! [`ConfigParseError`] that records where the problem was found. The
//! [`ParseErrorKind`] carries the specific reason.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reason a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("Missing value for {keyword}")]
    MissingValue { keyword: String },

    #[error("Unbalanced quotes")]
    UnbalancedQuotes,

    #[error("Extra data at end of {keyword}: {data}")]
    ExtraData { keyword: String, data: String },

    #[error("Invalid {keyword} boolean value: {value}")]
    InvalidBoolean { keyword: String, value: String },

    #[error("Invalid {keyword} integer value: {value}")]
    InvalidInteger { keyword: String, value: String },

    #[error("Invalid {keyword} value: {value}")]
    InvalidAddressFamily { keyword: String, value: String },

    #[error("Invalid match condition: {0}")]
    InvalidMatchCondition(String),

    #[error("Missing {0} match pattern")]
    MissingPattern(String),

    #[error("{0} blocks are not supported in this configuration")]
    UnsupportedDirective(String),

    #[error("Invalid token %{token} in {keyword}")]
    InvalidToken { keyword: String, token: char },

    #[error("Last character in {keyword} value can't be %")]
    TrailingPercent { keyword: String },

    #[error("Include cycle detected at {}", .0.display())]
    IncludeCycle(PathBuf),

    #[error("Unable to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },
}

/// A configuration load failure with its source location.
///
/// `line` is 1-based. It is 0 when the failure is not tied to a particular
/// line, such as a top-level file that could not be read.
#[derive(Debug, Error)]
#[error("{}{}: {kind}", .path.display(), line_suffix(.line))]
pub struct ConfigParseError {
    pub path: PathBuf,
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ConfigParseError {
    pub fn new(path: impl Into<PathBuf>, line: usize, kind: ParseErrorKind) -> Self {
        Self {
            path: path.into(),
            line,
            kind,
        }
    }

    /// Error for a file that could not be read at all.
    pub fn read_failed(path: &Path, source: io::Error) -> Self {
        Self::new(
            path,
            0,
            ParseErrorKind::ReadFailed {
                path: path.to_path_buf(),
                source,
            },
        )
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

fn line_suffix(line: &usize) -> String {
    if *line == 0 {
        String::new()
    } else {
        format!(":{line}")
    }
}

pub type Result<T, E = ConfigParseError> = std::result::Result<T, E>;
