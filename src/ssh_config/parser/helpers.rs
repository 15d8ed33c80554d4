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

//! Helper functions for coercing option arguments

use super::core::split_args;
use crate::ssh_config::error::ParseErrorKind;
use crate::ssh_config::options::{OptionSpec, ValueKind};
use crate::ssh_config::types::{AddressFamily, ConfigValue, LimitValue, RekeyLimit};

type CoerceResult<T> = Result<T, ParseErrorKind>;

/// Convert the raw argument text of a directive into a typed value
pub fn coerce(spec: &OptionSpec, args: &str) -> CoerceResult<ConfigValue> {
    let name = spec.name;
    let tokens = || split_args(args);

    let value = match spec.kind {
        ValueKind::Bool => ConfigValue::Bool(parse_yes_no(name, single(name, &tokens()?)?)?),
        ValueKind::Int => ConfigValue::Int(parse_int(name, single(name, &tokens()?)?)?),
        ValueKind::AddressFamily => {
            ConfigValue::AddressFamily(parse_address_family(name, single(name, &tokens()?)?)?)
        }
        ValueKind::String => {
            let tokens = tokens()?;
            let value = single(name, &tokens)?;
            if is_none(value) {
                ConfigValue::None
            } else {
                ConfigValue::String(value.to_string())
            }
        }
        ValueKind::StringList => ConfigValue::List(non_empty(name, tokens()?)?),
        ValueKind::AppendStringList => {
            let tokens = non_empty(name, tokens()?)?;
            if tokens.len() == 1 && is_none(&tokens[0]) {
                ConfigValue::None
            } else {
                ConfigValue::List(tokens)
            }
        }
        ValueKind::RekeyLimit => ConfigValue::RekeyLimit(parse_rekey_limit(name, &tokens()?)?),
        ValueKind::Command => parse_command(name, args)?,
    };

    Ok(value)
}

/// Parse yes/no boolean values
pub fn parse_yes_no(keyword: &str, value: &str) -> CoerceResult<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidBoolean {
            keyword: keyword.to_string(),
            value: value.to_string(),
        }),
    }
}

pub fn parse_int(keyword: &str, value: &str) -> CoerceResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| ParseErrorKind::InvalidInteger {
            keyword: keyword.to_string(),
            value: value.to_string(),
        })
}

pub fn parse_address_family(keyword: &str, value: &str) -> CoerceResult<AddressFamily> {
    match value.to_lowercase().as_str() {
        "any" => Ok(AddressFamily::Unspecified),
        "inet" => Ok(AddressFamily::Inet),
        "inet6" => Ok(AddressFamily::Inet6),
        _ => Err(ParseErrorKind::InvalidAddressFamily {
            keyword: keyword.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse `RekeyLimit <size|default> [time|none]`
pub fn parse_rekey_limit(keyword: &str, tokens: &[String]) -> CoerceResult<RekeyLimit> {
    let (size, time) = match tokens {
        [] => return Err(missing(keyword)),
        [size] => (size, None),
        [size, time] => (size, Some(time)),
        [_, _, rest @ ..] => return Err(extra(keyword, rest)),
    };

    let size = if size.eq_ignore_ascii_case("default") {
        LimitValue::Default
    } else {
        LimitValue::Value(size.clone())
    };

    let time = match time {
        None => LimitValue::Default,
        Some(time) if is_none(time) => LimitValue::None,
        Some(time) => LimitValue::Value(time.clone()),
    };

    Ok(RekeyLimit { size, time })
}

fn parse_command(keyword: &str, args: &str) -> CoerceResult<ConfigValue> {
    if args.is_empty() {
        return Err(missing(keyword));
    }

    // Tokenized only to reject unbalanced quotes, the text is kept as written
    split_args(args)?;

    if is_none(args) {
        Ok(ConfigValue::None)
    } else {
        Ok(ConfigValue::String(args.to_string()))
    }
}

fn single<'a>(keyword: &str, tokens: &'a [String]) -> CoerceResult<&'a str> {
    match tokens {
        [] => Err(missing(keyword)),
        [value] => Ok(value.as_str()),
        [_, rest @ ..] => Err(extra(keyword, rest)),
    }
}

fn non_empty(keyword: &str, tokens: Vec<String>) -> CoerceResult<Vec<String>> {
    if tokens.is_empty() {
        Err(missing(keyword))
    } else {
        Ok(tokens)
    }
}

fn is_none(value: &str) -> bool {
    value.eq_ignore_ascii_case("none")
}

fn missing(keyword: &str) -> ParseErrorKind {
    ParseErrorKind::MissingValue {
        keyword: keyword.to_string(),
    }
}

fn extra(keyword: &str, rest: &[String]) -> ParseErrorKind {
    ParseErrorKind::ExtraData {
        keyword: keyword.to_string(),
        data: rest.join(" "),
    }
}
