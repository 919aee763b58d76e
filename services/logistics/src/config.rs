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

use std::fmt::Debug;
use std::fmt::Formatter;

use ecpay_logistics_core::utils::Redact;
use ecpay_logistics_core::Context;
use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Result;

use crate::constants::*;

/// Config for ECPay logistics.
#[derive(Clone, Default)]
pub struct Config {
    /// Server base url, defaults to the staging server.
    pub server_url: Option<String>,
    /// Merchant ID issued by ECPay.
    pub merchant_id: Option<String>,
    /// HashKey issued by ECPay.
    pub hash_key: Option<String>,
    /// HashIV issued by ECPay.
    pub hash_iv: Option<String>,
    /// Platform ID, only for platform merchants.
    pub platform_id: Option<String>,
    /// Default `ServerReplyURL` injected into every operation.
    pub server_reply_url: Option<String>,
    /// Default `ClientReplyURL` injected into every operation.
    pub client_reply_url: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_url", &self.server_url)
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &Redact::from(&self.hash_key))
            .field("hash_iv", &Redact::from(&self.hash_iv))
            .field("platform_id", &self.platform_id)
            .field("server_reply_url", &self.server_reply_url)
            .field("client_reply_url", &self.client_reply_url)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// Empty variables are treated as unset.
    pub fn from_env(ctx: &Context) -> Self {
        let var = |key: &str| ctx.env_var(key).filter(|v| !v.is_empty());

        Self {
            server_url: var(ECPAY_LOGISTICS_SERVER),
            merchant_id: var(ECPAY_LOGISTICS_MERCHANT_ID),
            hash_key: var(ECPAY_LOGISTICS_HASH_KEY),
            hash_iv: var(ECPAY_LOGISTICS_HASH_IV),
            platform_id: var(ECPAY_LOGISTICS_PLATFORM_ID),
            server_reply_url: var(ECPAY_LOGISTICS_SERVER_REPLY_URL),
            client_reply_url: var(ECPAY_LOGISTICS_CLIENT_REPLY_URL),
        }
    }

    /// Server base url without trailing `/`, falling back to the staging server.
    pub fn server_url(&self) -> String {
        self.server_url
            .as_deref()
            .unwrap_or(STAGE_SERVER_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Build the credential, failing on the first missing field.
    pub fn credential(&self) -> Result<Credential> {
        let required = |value: &Option<String>, env: &str| {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config_invalid(format!("{env} is not set")))
        };

        Ok(Credential {
            merchant_id: required(&self.merchant_id, ECPAY_LOGISTICS_MERCHANT_ID)?,
            hash_key: required(&self.hash_key, ECPAY_LOGISTICS_HASH_KEY)?,
            hash_iv: required(&self.hash_iv, ECPAY_LOGISTICS_HASH_IV)?,
        })
    }
}
