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

//! Option schema for recognized configuration keywords
//!
//! Each recognized keyword maps to an [`OptionSpec`] describing how its
//! arguments are coerced and how repeated occurrences are merged. The tables
//! are split by configuration flavor:
//! - `client`: options understood in `ssh_config` files
//! - `server`: options understood in `sshd_config` files

mod client;
mod server;

pub use client::CLIENT_OPTIONS;
pub use server::SERVER_OPTIONS;

/// How the arguments of an option are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `yes`/`true` or `no`/`false`
    Bool,
    /// Base-10 integer
    Int,
    /// `any`, `inet` or `inet6`
    AddressFamily,
    /// Single token, where `none` clears the option
    String,
    /// One or more tokens, first occurrence wins
    StringList,
    /// One or more tokens per occurrence, accumulated across occurrences
    AppendStringList,
    /// Data limit and optional time limit
    RekeyLimit,
    /// Everything after the keyword, whitespace preserved
    Command,
}

/// What happens when an option appears more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// The first applied value is kept, later ones are ignored
    FirstWins,
    /// Values accumulate until a `none` argument freezes the option
    Append,
}

/// Percent tokens accepted by an expandable option, excluding `%%`
pub type TokenSet = &'static str;

/// Tokens a hostname may reference
pub const HOSTNAME_TOKENS: TokenSet = "h";
/// Tokens a proxy command may reference
pub const PROXY_TOKENS: TokenSet = "hnpr";
/// Every token the client expander knows
pub const ALL_TOKENS: TokenSet = "CdhiLlnpru";

/// Schema entry for one keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Canonical spelling of the keyword
    pub name: &'static str,
    pub kind: ValueKind,
    pub policy: MergePolicy,
    /// Accepted percent tokens, `None` if the value is not expanded
    pub tokens: Option<TokenSet>,
}

impl OptionSpec {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        let policy = match kind {
            ValueKind::AppendStringList => MergePolicy::Append,
            _ => MergePolicy::FirstWins,
        };
        Self {
            name,
            kind,
            policy,
            tokens: None,
        }
    }

    pub const fn expand(self, tokens: TokenSet) -> Self {
        Self {
            tokens: Some(tokens),
            ..self
        }
    }
}

/// Find the schema entry for a keyword (case-insensitive)
pub fn lookup(table: &'static [OptionSpec], keyword: &str) -> Option<&'static OptionSpec> {
    table
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(keyword))
}
