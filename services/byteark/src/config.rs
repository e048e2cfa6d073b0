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

use std::fmt::{Debug, Formatter};

use arksign_core::{utils::Redact, Context};
use log::warn;

use crate::constants::*;

/// Config carries all the configuration for ByteArk signed urls.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BYTEARK_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `access_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BYTEARK_ACCESS_SECRET`]
    pub access_secret: Option<String>,
    /// `default_age` in seconds will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BYTEARK_DEFAULT_AGE`]
    /// - [`DEFAULT_AGE`] otherwise
    pub default_age: Option<u64>,
    /// `skip_url_encode` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BYTEARK_SKIP_URL_ENCODE`]
    /// - `false` otherwise
    pub skip_url_encode: Option<bool>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set access_secret
    pub fn with_access_secret(mut self, access_secret: impl Into<String>) -> Self {
        self.access_secret = Some(access_secret.into());
        self
    }

    /// Set default_age in seconds
    pub fn with_default_age(mut self, default_age: u64) -> Self {
        self.default_age = Some(default_age);
        self
    }

    /// Set skip_url_encode
    pub fn with_skip_url_encode(mut self, skip_url_encode: bool) -> Self {
        self.skip_url_encode = Some(skip_url_encode);
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept as is.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(BYTEARK_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BYTEARK_ACCESS_SECRET) {
            self.access_secret.get_or_insert(v);
        }
        if self.default_age.is_none() {
            if let Some(v) = ctx.env_var(BYTEARK_DEFAULT_AGE) {
                match v.trim().parse::<u64>() {
                    Ok(age) => self.default_age = Some(age),
                    Err(e) => warn!("ignore invalid {BYTEARK_DEFAULT_AGE} {v:?}: {e}"),
                }
            }
        }
        if self.skip_url_encode.is_none() {
            if let Some(v) = ctx.env_var(BYTEARK_SKIP_URL_ENCODE) {
                match parse_bool(&v) {
                    Some(skip) => self.skip_url_encode = Some(skip),
                    None => warn!("ignore invalid {BYTEARK_SKIP_URL_ENCODE} {v:?}"),
                }
            }
        }

        self
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .field("default_age", &self.default_age)
            .field("skip_url_encode", &self.skip_url_encode)
            .finish()
    }
}
