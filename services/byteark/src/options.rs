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

use std::fmt::{Display, Formatter};

use arksign_core::{Error, Result};

use crate::constants::*;

/// How a bound option shows up in the signed url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Not echoed at all.
    Never,
    /// Echoed with its full value.
    Value,
    /// Echoed as the `1` sentinel, the value stays out of the url.
    Flag,
}

/// Every option recognized while signing a url.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignOption {
    /// HTTP method the url will be requested with, `GET` by default.
    Method,
    /// Sign a path prefix instead of the exact path.
    PathPrefix,
    /// Bind the url to a client ip.
    ClientIp,
    /// Bind the url to a user agent.
    UserAgent,
    /// Ask the edge to check the `Origin` header.
    Origin,
    /// Ask the edge to check the `Referer` header.
    Referer,
    /// Geo blocking rule applied by the edge.
    GeoBlock,
    /// Free form tags attached to the request for reporting.
    RequestTags,
}

impl SignOption {
    /// All options, in declaration order.
    pub const ALL: [SignOption; 8] = [
        SignOption::Method,
        SignOption::PathPrefix,
        SignOption::ClientIp,
        SignOption::UserAgent,
        SignOption::Origin,
        SignOption::Referer,
        SignOption::GeoBlock,
        SignOption::RequestTags,
    ];

    /// Normalized name of this option.
    pub fn name(self) -> &'static str {
        match self {
            SignOption::Method => "method",
            SignOption::PathPrefix => "path_prefix",
            SignOption::ClientIp => "client_ip",
            SignOption::UserAgent => "user_agent",
            SignOption::Origin => "origin",
            SignOption::Referer => "referer",
            SignOption::GeoBlock => "geo_block",
            SignOption::RequestTags => "request_tags",
        }
    }

    /// How this option is echoed in the signed url.
    pub fn echo(self) -> Echo {
        match self {
            SignOption::Method => Echo::Never,
            SignOption::PathPrefix | SignOption::GeoBlock | SignOption::RequestTags => Echo::Value,
            SignOption::ClientIp
            | SignOption::UserAgent
            | SignOption::Origin
            | SignOption::Referer => Echo::Flag,
        }
    }

    /// Query key used to echo this option, if it's echoed.
    pub fn query_key(self) -> Option<&'static str> {
        match self {
            SignOption::Method => None,
            SignOption::PathPrefix => Some(X_ARK_PATH_PREFIX),
            SignOption::ClientIp => Some(X_ARK_CLIENT_IP),
            SignOption::UserAgent => Some(X_ARK_USER_AGENT),
            SignOption::Origin => Some(X_ARK_ORIGIN),
            SignOption::Referer => Some(X_ARK_REFERER),
            SignOption::GeoBlock => Some(X_ARK_GEO_BLOCK),
            SignOption::RequestTags => Some(X_ARK_REQUEST_TAGS),
        }
    }

    /// Parse an option key.
    ///
    /// Keys are case-insensitive and `-` is the same as `_`, so `Client-IP`,
    /// `client-ip` and `client_ip` all name [`SignOption::ClientIp`].
    pub fn parse(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|v| v.name() == normalized)
    }
}

impl Display for SignOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Conditions bound into a signed url.
///
/// ## Notes
///
/// Only `method`, `path_prefix`, `client_ip` and `user_agent` enter the
/// string to sign. The other options are echoed for the edge to enforce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOptions {
    /// See [`SignOption::Method`].
    pub method: Option<String>,
    /// See [`SignOption::PathPrefix`].
    pub path_prefix: Option<String>,
    /// See [`SignOption::ClientIp`].
    pub client_ip: Option<String>,
    /// See [`SignOption::UserAgent`].
    pub user_agent: Option<String>,
    /// See [`SignOption::Origin`].
    pub origin: Option<String>,
    /// See [`SignOption::Referer`].
    pub referer: Option<String>,
    /// See [`SignOption::GeoBlock`].
    pub geo_block: Option<String>,
    /// See [`SignOption::RequestTags`].
    pub request_tags: Option<String>,
}

impl SignOptions {
    /// Create empty sign options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from loosely typed `(key, value)` pairs.
    ///
    /// Keys are normalized by [`SignOption::parse`]. When the same option is
    /// given twice the last value wins. Unknown keys are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut opts = Self::default();
        for (k, v) in pairs {
            let key = k.as_ref();
            let opt = SignOption::parse(key)
                .ok_or_else(|| Error::request_invalid(format!("unknown sign option: {key}")))?;
            opts.set(opt, v);
        }
        Ok(opts)
    }

    /// Get the value of given option.
    pub fn get(&self, opt: SignOption) -> Option<&str> {
        match opt {
            SignOption::Method => self.method.as_deref(),
            SignOption::PathPrefix => self.path_prefix.as_deref(),
            SignOption::ClientIp => self.client_ip.as_deref(),
            SignOption::UserAgent => self.user_agent.as_deref(),
            SignOption::Origin => self.origin.as_deref(),
            SignOption::Referer => self.referer.as_deref(),
            SignOption::GeoBlock => self.geo_block.as_deref(),
            SignOption::RequestTags => self.request_tags.as_deref(),
        }
    }

    /// Set the value of given option.
    pub fn set(&mut self, opt: SignOption, value: impl Into<String>) {
        let slot = match opt {
            SignOption::Method => &mut self.method,
            SignOption::PathPrefix => &mut self.path_prefix,
            SignOption::ClientIp => &mut self.client_ip,
            SignOption::UserAgent => &mut self.user_agent,
            SignOption::Origin => &mut self.origin,
            SignOption::Referer => &mut self.referer,
            SignOption::GeoBlock => &mut self.geo_block,
            SignOption::RequestTags => &mut self.request_tags,
        };
        *slot = Some(value.into());
    }

    /// HTTP method to sign, `GET` if not set.
    pub fn method_or_default(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }

    /// Set method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set path_prefix
    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(path_prefix.into());
        self
    }

    /// Set client_ip
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Set user_agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set origin
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set referer
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set geo_block
    pub fn with_geo_block(mut self, geo_block: impl Into<String>) -> Self {
        self.geo_block = Some(geo_block.into());
        self
    }

    /// Set request_tags
    pub fn with_request_tags(mut self, request_tags: impl Into<String>) -> Self {
        self.request_tags = Some(request_tags.into());
        self
    }
}

/// Values taken from the incoming request while verifying a signed url.
///
/// A signed url only records *that* `client_ip` or `user_agent` was bound,
/// never the value, so the verifier needs the caller to tell what the
/// request actually carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// HTTP method of the request, `GET` if not set.
    pub method: Option<String>,
    /// Client ip of the request.
    pub client_ip: Option<String>,
    /// User agent of the request.
    pub user_agent: Option<String>,
}

impl VerifyOptions {
    /// Create empty verify options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from loosely typed `(key, value)` pairs.
    ///
    /// Accepts the same key spelling as [`SignOptions::from_pairs`], but only
    /// `method`, `client_ip` and `user_agent` make sense here.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut opts = Self::default();
        for (k, v) in pairs {
            let key = k.as_ref();
            match SignOption::parse(key) {
                Some(SignOption::Method) => opts.method = Some(v.into()),
                Some(SignOption::ClientIp) => opts.client_ip = Some(v.into()),
                Some(SignOption::UserAgent) => opts.user_agent = Some(v.into()),
                _ => {
                    return Err(Error::request_invalid(format!(
                        "unknown verify option: {key}"
                    )))
                }
            }
        }
        Ok(opts)
    }

    /// Set method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set client_ip
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Set user_agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
