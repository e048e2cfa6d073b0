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

//! ByteArk signed url signer.

use arksign_core::time::{now, DateTime};
use arksign_core::utils::{append_query, Redact};
use arksign_core::{Error, Result};
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::canonical::{build_string_to_sign, sign_string};
use crate::config::Config;
use crate::constants::*;
use crate::credential::Credential;
use crate::options::{Echo, SignOption, SignOptions};

/// Signer that issues and verifies ByteArk `ark-v2` signed urls.
///
/// The signer is immutable once built and can be shared between threads
/// freely: signing and verifying are pure functions of their input and the
/// current time.
///
/// ## Example
///
/// ```
/// use arksign_byteark::{SignOptions, Signer, VerifyOptions};
///
/// # fn main() -> arksign_core::Result<()> {
/// let signer = Signer::new("access_key", "access_secret")?;
///
/// let url = signer.sign(
///     "https://example.byteark.com/video/playlist.m3u8",
///     0,
///     &SignOptions::new().with_path_prefix("/video/"),
/// )?;
/// assert!(signer.verify(&url, &VerifyOptions::new())?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Signer {
    credential: Credential,
    default_age: u64,
    skip_url_encode: bool,
    time: Option<DateTime>,
}

impl Signer {
    /// Create a new signer with given access key and access secret.
    ///
    /// Returns [`arksign_core::ErrorKind::MissingCredentials`] if either of
    /// them is empty.
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Result<Self> {
        Self::from_credential(Credential::new(access_key, access_secret))
    }

    /// Create a new signer from credential.
    pub fn from_credential(credential: Credential) -> Result<Self> {
        if !credential.is_valid() {
            let missing = if credential.access_key.is_empty() {
                "access_key"
            } else {
                "access_secret"
            };
            return Err(Error::missing_credentials(format!("{missing} is required")));
        }

        Ok(Self {
            credential,
            default_age: DEFAULT_AGE,
            skip_url_encode: false,
            time: None,
        })
    }

    /// Create a new signer from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credential = Credential::new(
            config.access_key.clone().unwrap_or_default(),
            config.access_secret.clone().unwrap_or_default(),
        );

        Ok(Self::from_credential(credential)?
            .with_default_age(config.default_age.unwrap_or(DEFAULT_AGE))
            .with_skip_url_encode(config.skip_url_encode.unwrap_or_default()))
    }

    /// Set the lifetime in seconds of urls signed without an explicit expiry.
    pub fn with_default_age(mut self, default_age: u64) -> Self {
        self.default_age = default_age;
        self
    }

    /// Don't percent-encode query values of signed urls.
    ///
    /// # Note
    ///
    /// Only enable this if all signed values are known to be url safe, the
    /// ByteArk edge expects encoded values otherwise.
    pub fn with_skip_url_encode(mut self, skip_url_encode: bool) -> Self {
        self.skip_url_encode = skip_url_encode;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign and verify urls.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    pub(crate) fn credential(&self) -> &Credential {
        &self.credential
    }

    pub(crate) fn skip_url_encode(&self) -> bool {
        self.skip_url_encode
    }

    pub(crate) fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Sign given url.
    ///
    /// - `expire` is the unix timestamp in seconds after which the url is
    ///   rejected. `0` means `now + default_age`.
    /// - `options` lists the conditions bound into the signature.
    ///
    /// The signed parameters are appended to the url, any query already
    /// present is kept.
    ///
    /// Query values are encoded like `application/x-www-form-urlencoded`:
    /// everything but ASCII alphanumerics and `-._~` is percent-encoded and
    /// space becomes `+`.
    ///
    /// # Errors
    ///
    /// - [`arksign_core::ErrorKind::RequestInvalid`] if `url` isn't an
    ///   absolute url. Urls must already be valid: characters such as a raw
    ///   space have to be percent-encoded by the caller, they are not fixed
    ///   up here.
    /// - [`arksign_core::ErrorKind::RequestInvalid`] if url encoding is
    ///   skipped and an echoed value contains `&`, `#`, whitespace or control
    ///   characters, since it couldn't be read back from the url.
    pub fn sign(&self, url: &str, expire: i64, options: &SignOptions) -> Result<String> {
        let expire = self.resolve_expire(expire)?;

        let string_to_sign =
            build_string_to_sign(url, expire, options, &self.credential.access_secret)?;
        let signature = sign_string(&string_to_sign);

        let expire_str = expire.to_string();
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(12);
        query.push((X_ARK_ACCESS_ID, self.credential.access_key.as_str()));
        query.push((X_ARK_AUTH_TYPE, AUTH_TYPE_ARK_V2));
        query.push((X_ARK_EXPIRES, expire_str.as_str()));
        query.push((X_ARK_SIGNATURE, signature.as_str()));
        for opt in SignOption::ALL {
            let (Some(key), Some(value)) = (opt.query_key(), options.get(opt)) else {
                continue;
            };
            match opt.echo() {
                Echo::Never => {}
                Echo::Value => {
                    if self.skip_url_encode && !is_raw_query_safe(value) {
                        return Err(Error::request_invalid(format!(
                            "{key} value {value:?} can't be sent without url encoding"
                        )));
                    }
                    query.push((key, value))
                }
                Echo::Flag => query.push((key, CONDITION_BOUND)),
            }
        }

        debug!(
            "signed url for access key {:?}, expire: {expire}, conditions: {:?}",
            Redact::from(&self.credential.access_key),
            query
                .iter()
                .skip(4)
                .map(|(k, _)| *k)
                .collect::<Vec<_>>()
        );

        Ok(append_query(url, &self.query_to_string(query)))
    }

    fn resolve_expire(&self, expire: i64) -> Result<i64> {
        match expire {
            0 => {
                let age = i64::try_from(self.default_age).map_err(|_| {
                    Error::request_invalid(format!("default age {} is too large", self.default_age))
                })?;
                Ok(self.get_time().timestamp().saturating_add(age))
            }
            v if v < 0 => Err(Error::request_invalid(format!(
                "expire must be a unix timestamp, got {v}"
            ))),
            v => Ok(v),
        }
    }

    /// Convert query to string sorted by key.
    ///
    /// ```shell
    /// [(b, 2), (a, 1)] => "a=1&b=2"
    /// ```
    fn query_to_string(&self, mut query: Vec<(&str, &str)>) -> String {
        query.sort_unstable();

        let mut s = String::with_capacity(256);
        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.push_str(k);
            s.push('=');
            if self.skip_url_encode {
                s.push_str(v);
                continue;
            }
            for (idx, part) in v.split(' ').enumerate() {
                if idx != 0 {
                    s.push('+');
                }
                s.extend(utf8_percent_encode(part, &QUERY_VALUE_ENCODE_SET));
            }
        }

        s
    }
}

/// Check if value survives being written into a query string as is.
fn is_raw_query_safe(value: &str) -> bool {
    !value
        .chars()
        .any(|c| matches!(c, '&' | '#') || c.is_whitespace() || c.is_control())
}
