// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


//! Utility functions and types.

use std::fmt::Debug;

/// Field names whose values must never reach a log line verbatim.
pub const SENSITIVE_FIELDS: &[&str] = &["CheckMacValue", "HashKey", "HashIV"];

/// Redacts a secret for display.
///
/// - Values of 8 characters or fewer are masked entirely.
/// - Longer values keep their first four and last four characters.
///
/// This keeps different secrets distinguishable in logs without leaking them.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Redact<'_> {
    /// Render the redacted form as an owned string.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let length = chars.len();
        if length <= 8 {
            "*".repeat(length)
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[length - 4..].iter().collect();
            format!("{head}{}{tail}", "*".repeat(length - 8))
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("EMPTY")
        } else {
            f.write_str(&self.masked())
        }
    }
}

/// Returns true if the given field name holds a secret.
pub fn is_sensitive_field(name: &str) -> bool {
    SENSITIVE_FIELDS.contains(&name)
}
