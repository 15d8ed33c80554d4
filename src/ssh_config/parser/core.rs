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

//! Line tokenization for SSH configuration files
//!
//! A line is split into a keyword and the raw argument text. Both the
//! `Option Value` and `Option=Value` forms are accepted, as is any mix of
//! whitespace around a single `=`.

use crate::ssh_config::error::ParseErrorKind;

/// A keyword and its raw argument text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub keyword: &'a str,
    /// Arguments with surrounding whitespace removed
    pub args: &'a str,
}

/// Split a line into a directive
///
/// Returns `None` for blank lines and comment lines.
pub fn split_directive(line: &str) -> Option<Directive<'_>> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let end = line
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(line.len());
    let keyword = &line[..end];

    let mut args = line[end..].trim_start();
    if let Some(stripped) = args.strip_prefix('=') {
        args = stripped.trim_start();
    }

    Some(Directive { keyword, args })
}

/// Split argument text into tokens
///
/// Tokens are separated by whitespace. Double-quoted sections may contain
/// whitespace and the quotes themselves are removed. An unquoted `#` at the
/// start of a token begins a comment that runs to the end of the line.
pub fn split_args(args: &str) -> Result<Vec<String>, ParseErrorKind> {
    let mut tokens = Vec::new();
    let mut chars = args.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.peek() {
            None | Some('#') => break,
            Some(_) => {}
        }

        let mut token = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            if c != '"' {
                token.push(c);
                continue;
            }

            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(quoted) => token.push(quoted),
                    None => return Err(ParseErrorKind::UnbalancedQuotes),
                }
            }
        }

        tokens.push(token);
    }

    Ok(tokens)
}
