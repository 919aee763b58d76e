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


use crate::utils::Redact;
use crate::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Credential issued by ECPay for one merchant account.
///
/// Both `hash_key` and `hash_iv` are opaque secrets and must be non-empty
/// before anything can be signed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Merchant ID (`MerchantID`).
    pub merchant_id: String,
    /// HashKey used to derive CheckMacValue.
    pub hash_key: String,
    /// HashIV used to derive CheckMacValue.
    pub hash_iv: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &Redact::from(&self.hash_key))
            .field("hash_iv", &Redact::from(&self.hash_iv))
            .finish()
    }
}

impl Credential {
    /// Create a new credential.
    pub fn new(merchant_id: &str, hash_key: &str, hash_iv: &str) -> Self {
        Self {
            merchant_id: merchant_id.to_string(),
            hash_key: hash_key.to_string(),
            hash_iv: hash_iv.to_string(),
        }
    }

    /// Check if the signing secrets are usable.
    pub fn is_valid(&self) -> bool {
        !self.hash_key.is_empty() && !self.hash_iv.is_empty()
    }

    /// Ensure the signing secrets are present.
    pub fn check_signing_secrets(&self) -> Result<()> {
        if self.hash_key.is_empty() {
            return Err(Error::precondition("HashKey must not be empty").with_field("HashKey"));
        }
        if self.hash_iv.is_empty() {
            return Err(Error::precondition("HashIV must not be empty").with_field("HashIV"));
        }
        Ok(())
    }
}
