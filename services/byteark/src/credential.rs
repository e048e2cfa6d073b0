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

use arksign_core::utils::Redact;

/// Credential shared between the signer and the edge verifying urls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Access key, published in every signed url as `x_ark_access_id`.
    pub access_key: String,
    /// Access secret, only ever hashed into the signature.
    pub access_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Check if both access key and access secret are present.
    pub fn is_valid(&self) -> bool {
        !self.access_key.is_empty() && !self.access_secret.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_is_valid() {
        assert!(Credential::new("key", "secret").is_valid());
        assert!(!Credential::new("", "secret").is_valid());
        assert!(!Credential::new("key", "").is_valid());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new(
            "2Aj6Wkge4hi1ZYLp0DBG",
            "31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7",
        );
        let output = format!("{cred:?}");

        assert!(!output.contains("2Aj6Wkge4hi1ZYLp0DBG"));
        assert!(!output.contains("31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7"));
        assert_eq!(
            output,
            r#"Credential { access_key: 2Aj6***, access_secret: 31sX*** }"#
        );
    }
}
