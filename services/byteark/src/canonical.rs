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

//! String to sign and signature of ByteArk signed urls.

use std::fmt::Write;

use arksign_core::hash::base64_url_md5;
use arksign_core::{Error, Result};
use http::Uri;

use crate::options::SignOptions;

/// Host and path of a url, as they take part in the string to sign.
#[derive(Debug)]
pub(crate) struct UrlTarget {
    pub host: String,
    pub path: String,
}

impl UrlTarget {
    pub(crate) fn parse(url: &str) -> Result<(Self, Uri)> {
        let uri: Uri = url.parse()?;
        let host = uri
            .authority()
            .ok_or_else(|| Error::request_invalid(format!("url without host is invalid: {url}")))?
            .as_str()
            .to_string();
        let path = raw_path(url).to_string();

        Ok((UrlTarget { host, path }, uri))
    }
}

/// Path of an absolute url as written.
///
/// Unlike [`Uri::path`], a url without path (`http://host?a=b`) has an empty
/// path instead of `/`.
fn raw_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.find(['?', '#']).map_or(rest, |idx| &rest[..idx]);
    rest.find('/').map_or("", |idx| &rest[idx..])
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// Method + "\n" +
/// Host + "\n" +
/// (PathPrefix | Path) + "\n" +
/// ["client_ip:" + ClientIp + "\n"] +
/// ["user_agent:" + UserAgent + "\n"] +
/// Expire + "\n" +
/// AccessSecret
/// ```
///
/// The client ip and user agent lines are only present when the option is
/// set. There is no trailing newline.
pub fn build_string_to_sign(
    url: &str,
    expire: i64,
    options: &SignOptions,
    secret: &str,
) -> Result<String> {
    let (target, _) = UrlTarget::parse(url)?;
    string_to_sign(&target.host, &target.path, expire, options, secret)
}

pub(crate) fn string_to_sign(
    host: &str,
    path: &str,
    expire: i64,
    options: &SignOptions,
    secret: &str,
) -> Result<String> {
    let mut s = String::with_capacity(128);
    writeln!(&mut s, "{}", options.method_or_default())?;
    writeln!(&mut s, "{host}")?;
    writeln!(&mut s, "{}", options.path_prefix.as_deref().unwrap_or(path))?;
    if let Some(client_ip) = &options.client_ip {
        writeln!(&mut s, "client_ip:{client_ip}")?;
    }
    if let Some(user_agent) = &options.user_agent {
        writeln!(&mut s, "user_agent:{user_agent}")?;
    }
    writeln!(&mut s, "{expire}")?;
    s.write_str(secret)?;

    Ok(s)
}

/// Compute the signature token of given string to sign.
///
/// The token is the MD5 digest of the string encoded as url safe base64
/// without padding. MD5 is kept for compatibility with the ByteArk edge, not
/// for its strength.
pub fn sign_string(string_to_sign: &str) -> String {
    base64_url_md5(string_to_sign.as_bytes())
}
