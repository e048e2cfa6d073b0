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

//! Core components for signing and verifying signed urls.
//!
//! This crate provides the foundational types shared by the arksign signers.
//!
//! ## Overview
//!
//! - **Error**: a single [`Error`] type whose [`ErrorKind`] tells apart
//!   missing credentials, tampered urls, expired urls and unmet conditions.
//! - **Context**: a container holding the [`Env`] implementation used while
//!   loading configuration.
//!
//! ## Utilities
//!
//! - [`hash`]: Hashing and encoding utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction and query appending

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};
