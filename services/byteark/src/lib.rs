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

//! Signer for ByteArk signed urls (`ark-v2`).
//!
//! A signed url is the original url with the following query appended, sorted
//! by key:
//!
//! - `x_ark_access_id`: the access key
//! - `x_ark_auth_type`: always `ark-v2`
//! - `x_ark_expires`: unix timestamp after which the url is rejected
//! - `x_ark_signature`: see [`sign_string`]
//! - one `x_ark_*` echo per bound condition, see [`SignOption`]

#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod options;
pub use options::{Echo, SignOption, SignOptions, VerifyOptions};

mod canonical;
pub use canonical::{build_string_to_sign, sign_string};

mod signer;
pub use signer::Signer;

mod verify;
pub use verify::SignedUrl;

pub use arksign_core::{Error, ErrorKind, Result};
