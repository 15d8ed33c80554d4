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

//! Percent-token expansion for client option values
//!
//! | Token | Value |
//! |-------|-------|
//! | `%%` | a literal `%` |
//! | `%C` | SHA-1 of `%l%h%p%r`, hex encoded |
//! | `%d` | local home directory |
//! | `%h` | effective remote host |
//! | `%i` | local numeric user id (where available) |
//! | `%L` | local host name up to the first `.` |
//! | `%l` | full local host name |
//! | `%n` | host name as given by the caller |
//! | `%p` | remote port |
//! | `%r` | effective remote user |
//! | `%u` | local user |

use std::collections::HashMap;
use std::path::PathBuf;

use sha1::{Digest, Sha1};

use super::error::ParseErrorKind;
use super::match_directive::IdentityContext;
use super::options::TokenSet;
use super::provider::LocalIdentity;

/// Local machine details captured once per load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInfo {
    pub hostname: String,
    pub home_dir: Option<PathBuf>,
    pub uid: Option<u32>,
}

impl LocalInfo {
    pub fn capture(identity: &dyn LocalIdentity) -> Self {
        Self {
            hostname: identity.hostname(),
            home_dir: identity.home_dir(),
            uid: identity.uid(),
        }
    }

    fn short_hostname(&self) -> &str {
        self.hostname
            .split_once('.')
            .map_or(self.hostname.as_str(), |(short, _)| short)
    }
}

/// Token values available at one point of the parse
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    values: HashMap<char, String>,
}

impl TokenMap {
    pub fn new(identity: &IdentityContext, local: &LocalInfo, port: u16) -> Self {
        let port = port.to_string();

        let mut hasher = Sha1::new();
        hasher.update(local.hostname.as_bytes());
        hasher.update(identity.effective_host().as_bytes());
        hasher.update(port.as_bytes());
        hasher.update(identity.effective_user().as_bytes());
        let connection_hash = hex::encode(hasher.finalize());

        let mut values = HashMap::with_capacity(10);
        values.insert('C', connection_hash);
        values.insert('h', identity.effective_host().to_string());
        values.insert('L', local.short_hostname().to_string());
        values.insert('l', local.hostname.clone());
        values.insert('n', identity.original_host().to_string());
        values.insert('p', port);
        values.insert('r', identity.effective_user().to_string());
        values.insert('u', identity.local_user().to_string());

        if let Some(home) = &local.home_dir {
            values.insert('d', home.to_string_lossy().into_owned());
        }
        if let Some(uid) = local.uid {
            values.insert('i', uid.to_string());
        }

        Self { values }
    }

    pub fn get(&self, token: char) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }
}

/// Expand percent tokens in a single pass
///
/// Only tokens listed in `allowed` (plus `%%`) may appear. Replacement text
/// is never expanded again.
pub fn expand(
    keyword: &str,
    value: &str,
    allowed: TokenSet,
    tokens: &TokenMap,
) -> Result<String, ParseErrorKind> {
    if !value.contains('%') {
        return Ok(value.to_string());
    }

    let mut result = String::with_capacity(value.len() + 32);
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            result.push(ch);
            continue;
        }

        let token = chars.next().ok_or_else(|| ParseErrorKind::TrailingPercent {
            keyword: keyword.to_string(),
        })?;

        if token == '%' {
            result.push('%');
            continue;
        }

        let replacement = allowed
            .contains(token)
            .then(|| tokens.get(token))
            .flatten()
            .ok_or_else(|| ParseErrorKind::InvalidToken {
                keyword: keyword.to_string(),
                token,
            })?;

        result.push_str(replacement);
    }

    Ok(result)
}
