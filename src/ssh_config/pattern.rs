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

//! Pattern matching utilities for SSH configuration
//!
//! This module provides wildcard pattern matching for `Host` and `Match`
//! patterns, supporting '*', '?', and negation with a leading '!'.
//! Matching is case-sensitive.

/// Check a value against a pattern list
///
/// The list matches when at least one positive pattern matches and no
/// negated pattern does. A negated match rejects the value regardless of
/// where it appears in the list.
pub(super) fn matches_pattern_list<'a, I>(value: &str, patterns: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matched = false;

    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            if wildcard_match(value, negated) {
                return false;
            }
        } else if wildcard_match(value, pattern) {
            matched = true;
        }
    }

    matched
}

/// Wildcard matching of a whole value against a single pattern
///
/// Runs in `O(text * pattern)` time: on a mismatch only the most recent `*`
/// is retried, one character further along the value.
pub(super) fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Pattern index after the last '*' and the value index it resumes from
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                p += 1;
                backtrack = Some((p, t));
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star_p, star_t)) => {
                    p = star_p;
                    t = star_t + 1;
                    backtrack = Some((star_p, t));
                }
                None => return false,
            },
        }
    }

    // Only trailing '*' can match an exhausted value
    pattern[p..].iter().all(|&c| c == '*')
}
