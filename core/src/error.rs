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

/// The error type for arksign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Access key or access secret is missing or empty.
    MissingCredentials,

    /// The signature carried by a signed url doesn't match the one we computed.
    ///
    /// Also used for signed urls that can't have been issued by this signer
    /// at all (missing signature, foreign access key, unknown auth type).
    InvalidSignature,

    /// The signed url is authentic but its expiry has passed.
    ExpiredSignedUrl,

    /// The signed url is authentic and fresh, but a bound condition doesn't hold.
    InvalidSignCondition,

    /// Request cannot be signed (unparsable url, unknown option, etc.)
    RequestInvalid,

    /// Unexpected errors.
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was raised while verifying a signed url.
    ///
    /// Callers usually map these to "access denied" or "link expired"
    /// responses instead of internal failures.
    pub fn is_verification_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidSignature
                | ErrorKind::ExpiredSignedUrl
                | ErrorKind::InvalidSignCondition
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a missing credentials error
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredentials, message)
    }

    /// Create an invalid signature error
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature, message)
    }

    /// Create an expired signed url error
    pub fn expired_signed_url(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExpiredSignedUrl, message)
    }

    /// Create an invalid sign condition error
    pub fn invalid_sign_condition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignCondition, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingCredentials => write!(f, "missing credentials"),
            ErrorKind::InvalidSignature => write!(f, "invalid signature"),
            ErrorKind::ExpiredSignedUrl => write!(f, "expired signed url"),
            ErrorKind::InvalidSignCondition => write!(f, "invalid sign condition"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_kind() {
        let err = Error::expired_signed_url("expired at 1514764800");
        assert_eq!(err.to_string(), "expired signed url: expired at 1514764800");
        assert_eq!(err.kind(), ErrorKind::ExpiredSignedUrl);
        assert!(err.is_verification_error());
    }

    #[test]
    fn test_error_from_invalid_uri() {
        let err: Error = "http://exa mple.com"
            .parse::<http::Uri>()
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(!err.is_verification_error());
        assert!(std::error::Error::source(&err).is_some());
    }
}
