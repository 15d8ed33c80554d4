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

//! Parse context and merge engine
//!
//! A [`ParseContext`] is created for every load call and owns all mutable
//! state of the parse: the identity being resolved, the option store, the
//! stack of files being included and the lazily captured local machine
//! details. Files are processed line by line; each directive is tokenized,
//! coerced, gated by the current `Host`/`Match` block, expanded and finally
//! merged into the store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::error::{ConfigParseError, ParseErrorKind, Result};
use super::include::{resolve_include_pattern, IncludeStack};
use super::match_directive::{
    host_matches, matches_all, parse_host_patterns, IdentityContext, MatchCondition,
};
use super::options::{lookup, MergePolicy, OptionSpec, CLIENT_OPTIONS, SERVER_OPTIONS};
use super::parser::{coerce, split_args, split_directive, Directive};
use super::provider::{ConfigFileReader, LocalIdentity};
use super::tokens::{expand, LocalInfo, TokenMap};
use super::types::ConfigValue;
use super::Config;

const DEFAULT_PORT: u16 = 22;

/// Ordered option store with first-wins and append semantics
#[derive(Debug, Default)]
struct ConfigStore {
    entries: Vec<(&'static str, ConfigValue)>,
    /// Append options closed by a `none` argument
    frozen: HashSet<&'static str>,
}

impl ConfigStore {
    fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    fn accepts(&self, spec: &OptionSpec) -> bool {
        match spec.policy {
            MergePolicy::FirstWins => self.get(spec.name).is_none(),
            MergePolicy::Append => !self.frozen.contains(spec.name),
        }
    }

    fn apply(&mut self, spec: &OptionSpec, value: ConfigValue) {
        match spec.policy {
            MergePolicy::FirstWins => self.entries.push((spec.name, value)),
            MergePolicy::Append => {
                let tokens = match value {
                    ConfigValue::List(tokens) => tokens,
                    _ => {
                        self.frozen.insert(spec.name);
                        Vec::new()
                    }
                };

                let existing = self
                    .entries
                    .iter_mut()
                    .find(|(key, _)| *key == spec.name);

                match existing {
                    Some((_, ConfigValue::List(values))) => values.extend(tokens),
                    Some((_, other)) => *other = ConfigValue::List(tokens),
                    None => self.entries.push((spec.name, ConfigValue::List(tokens))),
                }
            }
        }
    }
}

/// State of one configuration load
pub(super) struct ParseContext<'a> {
    options: &'static [OptionSpec],
    /// Present for client loads only
    identity: Option<IdentityContext>,
    store: ConfigStore,
    includes: IncludeStack,
    reader: &'a dyn ConfigFileReader,
    local_identity: &'a dyn LocalIdentity,
    local: Option<LocalInfo>,
}

impl<'a> ParseContext<'a> {
    pub fn client(
        identity: IdentityContext,
        reader: &'a dyn ConfigFileReader,
        local_identity: &'a dyn LocalIdentity,
    ) -> Self {
        Self::new(CLIENT_OPTIONS, Some(identity), reader, local_identity)
    }

    pub fn server(
        reader: &'a dyn ConfigFileReader,
        local_identity: &'a dyn LocalIdentity,
    ) -> Self {
        Self::new(SERVER_OPTIONS, None, reader, local_identity)
    }

    fn new(
        options: &'static [OptionSpec],
        identity: Option<IdentityContext>,
        reader: &'a dyn ConfigFileReader,
        local_identity: &'a dyn LocalIdentity,
    ) -> Self {
        Self {
            options,
            identity,
            store: ConfigStore::default(),
            includes: IncludeStack::default(),
            reader,
            local_identity,
            local: None,
        }
    }

    fn home_dir(&mut self) -> Option<PathBuf> {
        self.local_info().home_dir.clone()
    }

    /// Parse the given files in order and produce the resolved configuration
    pub fn load(mut self, paths: &[PathBuf]) -> Result<Config> {
        for path in paths {
            self.load_file(path)?;
        }

        Ok(Config {
            entries: self.store.entries,
        })
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        debug!("Loading SSH configuration from {}", path.display());

        let content = self
            .reader
            .read_to_string(path)
            .map_err(|e| ConfigParseError::read_failed(path, e))?;

        self.includes
            .enter(self.reader.canonicalize(path))
            .map_err(|kind| ConfigParseError::new(path, 0, kind))?;
        let result = self.parse_lines(path, &content);
        self.includes.exit();
        result
    }

    /// Parse one file's lines, starting with an active block
    ///
    /// Blocks opened by `Host` or `Match` end with the file, so an included
    /// file never changes the activation state of the file including it.
    fn parse_lines(&mut self, path: &Path, content: &str) -> Result<()> {
        let mut active = true;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            let Some(directive) = split_directive(line) else {
                continue;
            };
            let at = |kind: ParseErrorKind| ConfigParseError::new(path, line_number, kind);

            match directive.keyword.to_lowercase().as_str() {
                "host" => active = self.evaluate_host(directive.args).map_err(at)?,
                "match" => active = self.evaluate_match(directive.args).map_err(at)?,
                "include" if active => self.include(path, line_number, directive.args)?,
                "include" => {
                    trace!("Skipping inactive Include at {}:{}", path.display(), line_number);
                }
                _ => self.apply(&directive, active).map_err(at)?,
            }
        }

        Ok(())
    }

    fn evaluate_host(&self, args: &str) -> Result<bool, ParseErrorKind> {
        // Server files carry no target host, so a Host block has nothing to
        // match against and is rejected rather than silently skipped
        let Some(identity) = &self.identity else {
            return Err(ParseErrorKind::UnsupportedDirective("Host".to_string()));
        };

        let patterns = parse_host_patterns(split_args(args)?)?;
        let active = host_matches(&patterns, identity);
        debug!(
            "Host {} evaluated to {} for {}",
            patterns.join(" "),
            active,
            identity.effective_host()
        );

        Ok(active)
    }

    fn evaluate_match(&self, args: &str) -> Result<bool, ParseErrorKind> {
        let conditions = MatchCondition::parse_match_args(&split_args(args)?)?;

        let active = match &self.identity {
            Some(identity) => matches_all(&conditions, identity),
            None => {
                // Server files have no host or user to match against
                if let Some(condition) = conditions.iter().find(|c| **c != MatchCondition::All) {
                    return Err(ParseErrorKind::InvalidMatchCondition(
                        condition.keyword().to_string(),
                    ));
                }
                true
            }
        };

        debug!("Match {} evaluated to {}", args, active);
        Ok(active)
    }

    fn include(&mut self, file: &Path, line: usize, args: &str) -> Result<()> {
        let at = |kind: ParseErrorKind| ConfigParseError::new(file, line, kind);

        let patterns = split_args(args).map_err(at)?;
        if patterns.is_empty() {
            return Err(at(ParseErrorKind::MissingValue {
                keyword: "Include".to_string(),
            }));
        }

        let home = self.home_dir();

        for pattern in &patterns {
            let targets =
                resolve_include_pattern(pattern, file, home.as_deref(), self.reader).map_err(at)?;

            for target in targets {
                debug!(
                    "Including {} from {}:{}",
                    target.display(),
                    file.display(),
                    line
                );

                let content = self.reader.read_to_string(&target).map_err(|source| {
                    at(ParseErrorKind::ReadFailed {
                        path: target.clone(),
                        source,
                    })
                })?;

                self.includes
                    .enter(self.reader.canonicalize(&target))
                    .map_err(at)?;
                let result = self.parse_lines(&target, &content);
                self.includes.exit();
                result?;
            }
        }

        Ok(())
    }

    /// Coerce a recognized option and merge it if its block is active
    fn apply(&mut self, directive: &Directive<'_>, active: bool) -> Result<(), ParseErrorKind> {
        let Some(spec) = lookup(self.options, directive.keyword) else {
            debug!("Ignoring unknown option '{}'", directive.keyword);
            return Ok(());
        };

        let value = coerce(spec, directive.args)?;

        if !active || !self.store.accepts(spec) {
            return Ok(());
        }

        if self.is_overridden(spec) {
            debug!("Ignoring {} from configuration, supplied by caller", spec.name);
            return Ok(());
        }

        let value = self.expand_value(spec, value)?;
        self.track_identity(spec, &value);

        trace!("Setting {} = {}", spec.name, value);
        self.store.apply(spec, value);
        Ok(())
    }

    fn is_overridden(&self, spec: &OptionSpec) -> bool {
        let Some(identity) = &self.identity else {
            return false;
        };

        match spec.name {
            "User" => identity.external_user().is_some(),
            "Port" => identity.external_port().is_some(),
            _ => false,
        }
    }

    fn expand_value(
        &mut self,
        spec: &OptionSpec,
        value: ConfigValue,
    ) -> Result<ConfigValue, ParseErrorKind> {
        let Some(allowed) = spec.tokens else {
            return Ok(value);
        };
        if self.identity.is_none() || !contains_percent(&value) {
            return Ok(value);
        }

        let port = self.port();
        let local_identity = self.local_identity;
        let local = self
            .local
            .get_or_insert_with(|| LocalInfo::capture(local_identity));
        let Some(identity) = &self.identity else {
            return Ok(value);
        };
        let tokens = TokenMap::new(identity, local, port);

        match value {
            ConfigValue::String(text) => {
                Ok(ConfigValue::String(expand(spec.name, &text, allowed, &tokens)?))
            }
            ConfigValue::List(items) => items
                .iter()
                .map(|item| expand(spec.name, item, allowed, &tokens))
                .collect::<Result<Vec<_>, _>>()
                .map(ConfigValue::List),
            other => Ok(other),
        }
    }

    /// Port used for `%p`: caller supplied, then configured, then 22
    fn port(&self) -> u16 {
        self.identity
            .as_ref()
            .and_then(IdentityContext::external_port)
            .or_else(|| {
                self.store
                    .get("Port")
                    .and_then(ConfigValue::as_int)
                    .and_then(|port| u16::try_from(port).ok())
            })
            .unwrap_or(DEFAULT_PORT)
    }

    fn track_identity(&mut self, spec: &OptionSpec, value: &ConfigValue) {
        let (Some(identity), Some(text)) = (self.identity.as_mut(), value.as_str()) else {
            return;
        };

        match spec.name {
            "Hostname" => identity.set_effective_host(text),
            "User" => identity.set_effective_user(text),
            _ => {}
        }
    }

    fn local_info(&mut self) -> &LocalInfo {
        let local_identity = self.local_identity;
        self.local
            .get_or_insert_with(|| LocalInfo::capture(local_identity))
    }
}

fn contains_percent(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::String(text) => text.contains('%'),
        ConfigValue::List(items) => items.iter().any(|item| item.contains('%')),
        _ => false,
    }
}
