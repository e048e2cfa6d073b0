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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used by Config::from_env.
pub const BYTEARK_ACCESS_KEY: &str = "BYTEARK_ACCESS_KEY";
pub const BYTEARK_ACCESS_SECRET: &str = "BYTEARK_ACCESS_SECRET";
pub const BYTEARK_DEFAULT_AGE: &str = "BYTEARK_DEFAULT_AGE";
pub const BYTEARK_SKIP_URL_ENCODE: &str = "BYTEARK_SKIP_URL_ENCODE";

/// Lifetime of a signed url, in seconds, when the caller doesn't pick an expiry.
pub const DEFAULT_AGE: u64 = 900;

pub const DEFAULT_METHOD: &str = "GET";

pub const AUTH_TYPE_ARK_V2: &str = "ark-v2";

// Query keys carried by a signed url.
pub const X_ARK_ACCESS_ID: &str = "x_ark_access_id";
pub const X_ARK_AUTH_TYPE: &str = "x_ark_auth_type";
pub const X_ARK_EXPIRES: &str = "x_ark_expires";
pub const X_ARK_SIGNATURE: &str = "x_ark_signature";
pub const X_ARK_PATH_PREFIX: &str = "x_ark_path_prefix";
pub const X_ARK_CLIENT_IP: &str = "x_ark_client_ip";
pub const X_ARK_USER_AGENT: &str = "x_ark_user_agent";
pub const X_ARK_ORIGIN: &str = "x_ark_origin";
pub const X_ARK_REFERER: &str = "x_ark_referer";
pub const X_ARK_GEO_BLOCK: &str = "x_ark_geo_block";
pub const X_ARK_REQUEST_TAGS: &str = "x_ark_request_tags";

pub const X_ARK_PREFIX: &str = "x_ark_";

/// Value echoed for conditions whose value must not appear in the url.
pub const CONDITION_BOUND: &str = "1";

/// AsciiSet for query values of signed urls.
///
/// - Encode every byte except 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_' and '~'.
/// - Space is written as `+` instead, see `Signer::query_to_string`.
pub static QUERY_VALUE_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
