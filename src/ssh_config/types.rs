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

//! Core data structures for resolved configuration values

use std::fmt;

/// Address family selected by `AddressFamily`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// `any`
    Unspecified,
    /// `inet`
    Inet,
    /// `inet6`
    Inet6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressFamily::Unspecified => "any",
            AddressFamily::Inet => "inet",
            AddressFamily::Inet6 => "inet6",
        };
        f.write_str(name)
    }
}

/// One half of a `RekeyLimit` setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitValue {
    /// Left to the implementation default (`default` keyword, or time omitted)
    Default,
    /// Explicitly disabled (`none` keyword for the time limit)
    None,
    /// Literal value as written, e.g. `1G` or `1h`
    Value(String),
}

impl fmt::Display for LimitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitValue::Default => f.write_str("default"),
            LimitValue::None => f.write_str("none"),
            LimitValue::Value(value) => f.write_str(value),
        }
    }
}

/// Data and time thresholds for re-keying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RekeyLimit {
    pub size: LimitValue,
    pub time: LimitValue,
}

/// A resolved option value
///
/// `None` is the explicit "cleared" marker produced by a `none` argument.
/// It is distinct from a key that was never set, which is simply missing
/// from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    AddressFamily(AddressFamily),
    String(String),
    List(Vec<String>),
    RekeyLimit(RekeyLimit),
    None,
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_address_family(&self) -> Option<AddressFamily> {
        match self {
            ConfigValue::AddressFamily(family) => Some(*family),
            _ => None,
        }
    }

    pub fn as_rekey_limit(&self) -> Option<&RekeyLimit> {
        match self {
            ConfigValue::RekeyLimit(limit) => Some(limit),
            _ => None,
        }
    }

    /// Whether this is the explicit `none` marker
    pub fn is_none(&self) -> bool {
        matches!(self, ConfigValue::None)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(true) => f.write_str("yes"),
            ConfigValue::Bool(false) => f.write_str("no"),
            ConfigValue::Int(value) => write!(f, "{value}"),
            ConfigValue::AddressFamily(family) => write!(f, "{family}"),
            ConfigValue::String(value) => f.write_str(value),
            ConfigValue::List(values) => f.write_str(&values.join(" ")),
            ConfigValue::RekeyLimit(limit) => write!(f, "{} {}", limit.size, limit.time),
            ConfigValue::None => f.write_str("none"),
        }
    }
}
