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


use std::fmt;
use thiserror::Error;

/// The error type for ECPay logistics operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    field: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Signing was attempted without a usable HashKey or HashIV.
    PreconditionFailed,

    /// A field is missing, too long or out of range.
    ValidationFailed,

    /// The logistics sub type is not accepted by the operation.
    IncompatibleSubType,

    /// CheckMacValue is missing or does not match the recomputed digest.
    SignatureMismatch,

    /// A response body matched neither form-encoded nor JSON shape.
    ParseFailed,

    /// The HTTP exchange with the provider failed.
    Transport,

    /// Configuration error (missing fields, unknown operation identifiers)
    ConfigInvalid,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the wire field this error is about.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The wire field name this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Check if this error was raised while building a payload.
    ///
    /// Such errors stop payload construction before anything is signed or sent.
    pub fn is_payload_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ValidationFailed | ErrorKind::IncompatibleSubType
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PreconditionFailed, message)
    }

    /// Create a validation error for a required field that is missing or empty.
    pub fn required(field: &str) -> Self {
        Self::new(ErrorKind::ValidationFailed, format!("{field} is required")).with_field(field)
    }

    /// Create a validation error for a field exceeding its maximum length.
    pub fn too_long(field: &str, max: usize) -> Self {
        Self::new(
            ErrorKind::ValidationFailed,
            format!("{field} exceeds the maximum length of {max} characters"),
        )
        .with_field(field)
    }

    /// Create a validation error for a field carrying an invalid value.
    pub fn invalid_field(field: &str, message: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::ValidationFailed,
            format!("{field} is invalid: {message}"),
        )
        .with_field(field)
    }

    /// Create an incompatible sub type error.
    ///
    /// `actual` is the rejected sub type and `expected` lists the accepted ones.
    pub fn incompatible_sub_type(
        operation: impl fmt::Display,
        actual: impl fmt::Display,
        expected: &[impl fmt::Display],
    ) -> Self {
        let expected = expected
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            ErrorKind::IncompatibleSubType,
            format!("LogisticsSubType {actual} is not supported by {operation}, expected one of [{expected}]"),
        )
        .with_field("LogisticsSubType")
    }

    /// Create a signature mismatch error.
    pub fn signature_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureMismatch, message).with_field("CheckMacValue")
    }

    /// Create a parse error.
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailed, message)
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::PreconditionFailed => write!(f, "precondition failed"),
            ErrorKind::ValidationFailed => write!(f, "validation failed"),
            ErrorKind::IncompatibleSubType => write!(f, "incompatible logistics sub type"),
            ErrorKind::SignatureMismatch => write!(f, "signature mismatch"),
            ErrorKind::ParseFailed => write!(f, "parse failed"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::transport(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
