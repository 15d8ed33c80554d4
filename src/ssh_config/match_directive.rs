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

//! Host and Match directive support for SSH configuration
//!
//! `Host` and `Match` lines decide whether the directives that follow them
//! apply. They are evaluated against an [`IdentityContext`] that tracks the
//! host and user the configuration is being resolved for. The effective host
//! and user change while parsing as `Hostname` and `User` are assigned, so a
//! later block can match the rewritten identity.

use super::error::ParseErrorKind;
use super::pattern::matches_pattern_list;

/// Host and user identity used to evaluate `Host` and `Match` blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    original_host: String,
    effective_host: String,
    local_user: String,
    effective_user: String,
    /// User supplied by the caller, overriding `User` directives
    user: Option<String>,
    /// Port supplied by the caller, overriding `Port` directives
    port: Option<u16>,
}

impl IdentityContext {
    pub fn new(local_user: &str, user: Option<&str>, host: &str, port: Option<u16>) -> Self {
        Self {
            original_host: host.to_string(),
            effective_host: host.to_string(),
            local_user: local_user.to_string(),
            effective_user: user.unwrap_or(local_user).to_string(),
            user: user.map(str::to_string),
            port,
        }
    }

    /// Host name as given by the caller
    pub fn original_host(&self) -> &str {
        &self.original_host
    }

    /// Host name after any `Hostname` assignment
    pub fn effective_host(&self) -> &str {
        &self.effective_host
    }

    /// Local user running the client
    pub fn local_user(&self) -> &str {
        &self.local_user
    }

    /// Remote user after any `User` assignment
    pub fn effective_user(&self) -> &str {
        &self.effective_user
    }

    pub fn external_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn external_port(&self) -> Option<u16> {
        self.port
    }

    pub(super) fn set_effective_host(&mut self, host: &str) {
        self.effective_host = host.to_string();
    }

    pub(super) fn set_effective_user(&mut self, user: &str) {
        self.effective_user = user.to_string();
    }
}

/// Match condition types supported in `Match` lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchCondition {
    /// Match all connections (always true, must appear alone)
    All,
    /// Match the effective host name
    Host(Vec<String>),
    /// Match the host name given by the caller
    OriginalHost(Vec<String>),
    /// Match the effective remote user
    User(Vec<String>),
    /// Match the local user
    LocalUser(Vec<String>),
}

impl MatchCondition {
    /// Parse the tokens of a `Match` line into conditions
    ///
    /// Each condition keyword other than `all` takes one argument holding
    /// comma-separated alternative patterns.
    pub fn parse_match_args(tokens: &[String]) -> Result<Vec<MatchCondition>, ParseErrorKind> {
        if tokens.is_empty() {
            return Err(ParseErrorKind::InvalidMatchCondition(
                "missing condition".to_string(),
            ));
        }

        let mut conditions = Vec::new();
        let mut parts = tokens.iter();

        while let Some(keyword) = parts.next() {
            let keyword_lower = keyword.to_lowercase();

            let build: fn(Vec<String>) -> MatchCondition = match keyword_lower.as_str() {
                "all" => {
                    conditions.push(MatchCondition::All);
                    continue;
                }
                "host" => MatchCondition::Host,
                "originalhost" => MatchCondition::OriginalHost,
                "user" => MatchCondition::User,
                "localuser" => MatchCondition::LocalUser,
                _ => return Err(ParseErrorKind::InvalidMatchCondition(keyword.clone())),
            };

            let patterns = parts
                .next()
                .map(|arg| split_alternatives(arg))
                .filter(|patterns| !patterns.is_empty())
                .ok_or_else(|| ParseErrorKind::MissingPattern(keyword_lower.clone()))?;

            conditions.push(build(patterns));
        }

        if conditions.len() > 1 && conditions.contains(&MatchCondition::All) {
            return Err(ParseErrorKind::InvalidMatchCondition(
                "all cannot be combined with other conditions".to_string(),
            ));
        }

        Ok(conditions)
    }

    /// Check if this condition matches the given identity
    pub fn matches(&self, identity: &IdentityContext) -> bool {
        let (value, patterns) = match self {
            MatchCondition::All => return true,
            MatchCondition::Host(patterns) => (identity.effective_host(), patterns),
            MatchCondition::OriginalHost(patterns) => (identity.original_host(), patterns),
            MatchCondition::User(patterns) => (identity.effective_user(), patterns),
            MatchCondition::LocalUser(patterns) => (identity.local_user(), patterns),
        };

        matches_pattern_list(value, patterns.iter().map(String::as_str))
    }

    /// Keyword that introduces this condition
    pub fn keyword(&self) -> &'static str {
        match self {
            MatchCondition::All => "all",
            MatchCondition::Host(_) => "host",
            MatchCondition::OriginalHost(_) => "originalhost",
            MatchCondition::User(_) => "user",
            MatchCondition::LocalUser(_) => "localuser",
        }
    }
}

/// Check that all conditions match (AND logic)
pub fn matches_all(conditions: &[MatchCondition], identity: &IdentityContext) -> bool {
    conditions
        .iter()
        .all(|condition| condition.matches(identity))
}

/// Parse the pattern tokens of a `Host` line
pub fn parse_host_patterns(tokens: Vec<String>) -> Result<Vec<String>, ParseErrorKind> {
    if tokens.is_empty() {
        return Err(ParseErrorKind::MissingPattern("host".to_string()));
    }
    Ok(tokens)
}

/// Check if a `Host` pattern list applies to the effective host
pub fn host_matches(patterns: &[String], identity: &IdentityContext) -> bool {
    if let [only] = patterns {
        if only == "all" {
            return true;
        }
    }

    matches_pattern_list(
        identity.effective_host(),
        patterns.iter().map(String::as_str),
    )
}

fn split_alternatives(arg: &str) -> Vec<String> {
    arg.split(',')
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}
