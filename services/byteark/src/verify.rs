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

//! Verification of ByteArk signed urls.

use std::borrow::Cow;
use std::collections::HashMap;

use arksign_core::time::{format_rfc3339, from_timestamp};
use arksign_core::utils::Redact;
use arksign_core::{Error, Result};
use log::debug;
use percent_encoding::percent_decode_str;
use subtle::ConstantTimeEq;

use crate::canonical::{sign_string, string_to_sign, UrlTarget};
use crate::constants::*;
use crate::options::{SignOptions, VerifyOptions};
use crate::signer::Signer;

/// Parameters carried by a signed url.
///
/// Parsing only checks that the url is shaped like a signed url, it says
/// nothing about its authenticity. Use [`Signer::verify`] for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    /// Host of the url, port included.
    pub host: String,
    /// Path of the url, as written.
    pub path: String,
    /// `x_ark_access_id`
    pub access_id: String,
    /// `x_ark_auth_type`
    pub auth_type: String,
    /// `x_ark_expires`
    pub expires: i64,
    /// `x_ark_signature`
    pub signature: String,
    /// `x_ark_path_prefix`
    pub path_prefix: Option<String>,
    /// Whether `x_ark_client_ip` is present.
    pub client_ip: bool,
    /// Whether `x_ark_user_agent` is present.
    pub user_agent: bool,
    /// Whether `x_ark_origin` is present.
    pub origin: bool,
    /// Whether `x_ark_referer` is present.
    pub referer: bool,
    /// `x_ark_geo_block`
    pub geo_block: Option<String>,
    /// `x_ark_request_tags`
    pub request_tags: Option<String>,
}

impl SignedUrl {
    /// Parse a signed url.
    ///
    /// Query parameters not starting with `x_ark_` are ignored. A url missing
    /// any of the mandatory parameters, or carrying one of them twice, can't
    /// have been issued by a signer and fails with
    /// [`arksign_core::ErrorKind::InvalidSignature`].
    pub fn parse(url: &str) -> Result<Self> {
        Self::parse_query(url, true)
    }

    /// Parse a signed url whose query values were written without url
    /// encoding.
    ///
    /// Values are taken as written: neither `+` nor `%XX` is decoded.
    pub fn parse_raw(url: &str) -> Result<Self> {
        Self::parse_query(url, false)
    }

    fn parse_query(url: &str, decode: bool) -> Result<Self> {
        let (target, uri) = UrlTarget::parse(url)?;
        let query = uri.query().unwrap_or_default();

        let pairs: Vec<(Cow<str>, Cow<str>)> = if decode {
            form_urlencoded::parse(query.as_bytes()).collect()
        } else {
            query
                .split('&')
                .filter(|kv| !kv.is_empty())
                .map(|kv| {
                    let (k, v) = kv.split_once('=').unwrap_or((kv, ""));
                    (Cow::Borrowed(k), Cow::Borrowed(v))
                })
                .collect()
        };

        let mut params = HashMap::new();
        for (k, v) in pairs {
            if !k.starts_with(X_ARK_PREFIX) {
                continue;
            }
            let key = k.into_owned();
            if params.contains_key(&key) {
                return Err(Error::invalid_signature(format!(
                    "query parameter {key} is given more than once"
                )));
            }
            params.insert(key, v.into_owned());
        }

        let expires_str = take_required(&mut params, X_ARK_EXPIRES)?;
        let expires = expires_str.parse::<i64>().map_err(|e| {
            Error::invalid_signature(format!("{X_ARK_EXPIRES} {expires_str:?} is not a timestamp"))
                .with_source(e)
        })?;

        let signed = SignedUrl {
            host: target.host,
            path: target.path,
            access_id: take_required(&mut params, X_ARK_ACCESS_ID)?,
            auth_type: take_required(&mut params, X_ARK_AUTH_TYPE)?,
            expires,
            signature: take_required(&mut params, X_ARK_SIGNATURE)?,
            path_prefix: params.remove(X_ARK_PATH_PREFIX),
            client_ip: params.remove(X_ARK_CLIENT_IP).is_some(),
            user_agent: params.remove(X_ARK_USER_AGENT).is_some(),
            origin: params.remove(X_ARK_ORIGIN).is_some(),
            referer: params.remove(X_ARK_REFERER).is_some(),
            geo_block: params.remove(X_ARK_GEO_BLOCK),
            request_tags: params.remove(X_ARK_REQUEST_TAGS),
        };

        if !params.is_empty() {
            debug!(
                "ignore unknown signed url parameters: {:?}",
                params.keys().collect::<Vec<_>>()
            );
        }

        Ok(signed)
    }

    /// Rebuild the options the url was signed with.
    ///
    /// Values of `client_ip` and `user_agent` never travel in the url, they
    /// are taken from `request` when the url says they were bound. Without
    /// them the signature can't be recomputed, so the url is rejected as
    /// unverifiable.
    fn sign_options(&self, request: &VerifyOptions) -> Result<SignOptions> {
        let mut opts = SignOptions {
            method: request.method.clone(),
            path_prefix: self.path_prefix.clone(),
            ..Default::default()
        };

        if self.client_ip {
            let client_ip = request.client_ip.clone().ok_or_else(|| {
                Error::invalid_signature("url is bound to a client ip, but none is given")
            })?;
            opts.client_ip = Some(client_ip);
        }
        if self.user_agent {
            let user_agent = request.user_agent.clone().ok_or_else(|| {
                Error::invalid_signature("url is bound to a user agent, but none is given")
            })?;
            opts.user_agent = Some(user_agent);
        }

        Ok(opts)
    }

    /// Check if the url path falls under given prefix.
    ///
    /// Both the path as written and its percent decoded form are accepted.
    fn path_has_prefix(&self, prefix: &str) -> bool {
        self.path.starts_with(prefix)
            || percent_decode_str(&self.path)
                .decode_utf8_lossy()
                .starts_with(prefix)
    }
}

fn take_required(params: &mut HashMap<String, String>, key: &str) -> Result<String> {
    params
        .remove(key)
        .ok_or_else(|| Error::invalid_signature(format!("query parameter {key} is missing")))
}

impl Signer {
    /// Verify a signed url.
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. the signature must match the one recomputed from the url, or
    ///    [`arksign_core::ErrorKind::InvalidSignature`];
    /// 2. the url must not be expired, or
    ///    [`arksign_core::ErrorKind::ExpiredSignedUrl`];
    /// 3. bound conditions must hold, or
    ///    [`arksign_core::ErrorKind::InvalidSignCondition`].
    ///
    /// So a url that is both tampered and expired is reported as tampered. A
    /// url bound to a client ip or user agent that `options` doesn't carry
    /// can't have its signature recomputed and is reported as an invalid
    /// signature too.
    ///
    /// Urls signed with url encoding skipped must be verified by a signer
    /// that skips it as well, query values are then read as written.
    ///
    /// `options` carries what the incoming request looks like: its method
    /// and, for urls bound to them, its client ip and user agent.
    pub fn verify(&self, signed_url: &str, options: &VerifyOptions) -> Result<bool> {
        let signed = SignedUrl::parse_query(signed_url, !self.skip_url_encode())?;
        let cred = self.credential();

        if signed.auth_type != AUTH_TYPE_ARK_V2 {
            return Err(Error::invalid_signature(format!(
                "unsupported auth type: {}",
                signed.auth_type
            )));
        }
        if signed.access_id != cred.access_key {
            debug!(
                "signed url access key {:?} doesn't match signer",
                Redact::from(&signed.access_id)
            );
            return Err(Error::invalid_signature(
                "url is signed with another access key",
            ));
        }

        let sign_options = signed.sign_options(options)?;
        let expected = sign_string(&string_to_sign(
            &signed.host,
            &signed.path,
            signed.expires,
            &sign_options,
            &cred.access_secret,
        )?);
        if !bool::from(expected.as_bytes().ct_eq(signed.signature.as_bytes())) {
            debug!(
                "signature mismatch, expected: {expected}, provided: {}",
                signed.signature
            );
            return Err(Error::invalid_signature("signature does not match"));
        }

        let now = self.get_time().timestamp();
        if now >= signed.expires {
            let expired_at = from_timestamp(signed.expires)
                .map(format_rfc3339)
                .unwrap_or_else(|_| signed.expires.to_string());
            return Err(Error::expired_signed_url(format!(
                "url expired at {expired_at}"
            )));
        }

        if let Some(prefix) = &signed.path_prefix {
            if !signed.path_has_prefix(prefix) {
                return Err(Error::invalid_sign_condition(format!(
                    "path {} is outside of signed prefix {prefix}",
                    signed.path
                )));
            }
        }

        debug!(
            "verified signed url for {}{}, expires at {}",
            signed.host, signed.path, signed.expires
        );
        Ok(true)
    }
}
