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

//! CheckMacValue computation and verification.

use std::fmt::Debug;
use std::fmt::Formatter;

use ecpay_logistics_core::hash::hex_eq_ignore_case;
use ecpay_logistics_core::hash::hex_md5_upper;
use ecpay_logistics_core::utils::Redact;
use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Payload;
use ecpay_logistics_core::Result;
use log::debug;
use log::warn;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;

use crate::constants::CHECK_MAC_VALUE;
use crate::constants::DOT_NET_REPLACEMENTS;
use crate::constants::PHP_URL_ENCODE_SET;

/// Signs payloads and verifies signed replies with one HashKey / HashIV pair.
///
/// An encoder can only be built from non-empty secrets, so every method here
/// is infallible apart from [`CheckMacEncoder::verify_or_fail`].
#[derive(Clone, PartialEq, Eq)]
pub struct CheckMacEncoder {
    hash_key: String,
    hash_iv: String,
}

impl Debug for CheckMacEncoder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckMacEncoder")
            .field("hash_key", &Redact::from(&self.hash_key))
            .field("hash_iv", &Redact::from(&self.hash_iv))
            .finish()
    }
}

impl CheckMacEncoder {
    /// Create a new encoder.
    ///
    /// Returns a precondition error if either secret is empty.
    pub fn new(hash_key: &str, hash_iv: &str) -> Result<Self> {
        Credential::new("", hash_key, hash_iv).check_signing_secrets()?;

        Ok(Self {
            hash_key: hash_key.to_string(),
            hash_iv: hash_iv.to_string(),
        })
    }

    /// Create a new encoder from the secrets of a credential.
    pub fn from_credential(cred: &Credential) -> Result<Self> {
        Self::new(&cred.hash_key, &cred.hash_iv)
    }

    /// Compute the CheckMacValue of a payload.
    ///
    /// Any `CheckMacValue` already present in the payload is ignored.
    pub fn generate(&self, payload: &Payload) -> String {
        let query = canonical_query(payload);
        let raw = format!(
            "HashKey={}&{}&HashIV={}",
            self.hash_key, query, self.hash_iv
        );

        let mut encoded = utf8_percent_encode(&raw, &PHP_URL_ENCODE_SET)
            .to_string()
            .to_ascii_lowercase();
        for (from, to) in DOT_NET_REPLACEMENTS {
            encoded = encoded.replace(from, to);
        }

        hex_md5_upper(encoded.as_bytes())
    }

    /// Return the payload with a freshly computed `CheckMacValue` appended.
    pub fn encode_payload(&self, mut payload: Payload) -> Payload {
        payload.remove(CHECK_MAC_VALUE);
        let check_mac = self.generate(&payload);
        payload.insert(CHECK_MAC_VALUE, check_mac);
        payload
    }

    /// Check the `CheckMacValue` carried by a payload.
    ///
    /// Returns false if the payload carries no `CheckMacValue` at all.
    pub fn verify(&self, payload: &Payload) -> bool {
        let Some(received) = payload.get(CHECK_MAC_VALUE) else {
            debug!("payload carries no {CHECK_MAC_VALUE}");
            return false;
        };

        let expected = self.generate(payload);
        let matched = hex_eq_ignore_case(&received.to_string(), &expected);
        if !matched {
            warn!(
                "{CHECK_MAC_VALUE} mismatch: received {:?}, expected {:?}",
                Redact::from(received.to_string().as_str()),
                Redact::from(expected.as_str())
            );
        }
        matched
    }

    /// Same as [`CheckMacEncoder::verify`] but fails with
    /// [`ErrorKind::SignatureMismatch`](ecpay_logistics_core::ErrorKind::SignatureMismatch).
    pub fn verify_or_fail(&self, payload: &Payload) -> Result<()> {
        if !payload.contains_key(CHECK_MAC_VALUE) {
            return Err(Error::signature_mismatch(format!(
                "{CHECK_MAC_VALUE} is missing"
            )));
        }
        if !self.verify(payload) {
            return Err(Error::signature_mismatch(format!(
                "{CHECK_MAC_VALUE} verify failed"
            )));
        }
        Ok(())
    }
}

/// Compute the CheckMacValue of a payload with the given secrets.
pub fn sign(payload: &Payload, hash_key: &str, hash_iv: &str) -> Result<String> {
    Ok(CheckMacEncoder::new(hash_key, hash_iv)?.generate(payload))
}

/// Build the sorted `key=value&...` string that gets wrapped by the secrets.
///
/// Fields are form encoded and then decoded again, so the later PHP style
/// encoding is applied to the raw characters exactly once.
fn canonical_query(payload: &Payload) -> String {
    let mut fields = payload
        .iter()
        .filter(|(k, _)| *k != CHECK_MAC_VALUE)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>();
    fields.sort_by(|(a, _), (b, _)| {
        a.to_ascii_lowercase()
            .cmp(&b.to_ascii_lowercase())
            .then_with(|| a.cmp(b))
    });

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter())
        .finish();
    let query = query.replace('+', " ");
    percent_decode_str(&query).decode_utf8_lossy().into_owned()
}
