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

//! Hash related utils.

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use md5::Digest;
use md5::Md5;

/// URL safe, unpadded base64 encoded MD5 hash.
///
/// This is the standard base64 alphabet with `+` replaced by `-`, `/`
/// replaced by `_` and the trailing `=` stripped, so the output can be
/// placed into a query string as is.
pub fn base64_url_md5(content: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(Md5::digest(content))
}
