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

//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! This is the transport collaborator for `ecpay-logistics`: it only moves a
//! signed form to the provider and hands the raw reply back.

use async_trait::async_trait;
use bytes::Bytes;
use ecpay_logistics_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use log::{debug, warn};
use reqwest::{Client, Request};
use std::time::Duration;

/// Default request timeout used by [`ReqwestHttpSend::default`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout used by [`ReqwestHttpSend::default`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends requests through a [`reqwest::Client`].
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        let client = default_client().unwrap_or_else(|err| {
            warn!("failed to build http client with default timeouts, falling back to reqwest defaults: {err}");
            Client::default()
        });
        Self { client }
    }
}

fn default_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .build()
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::transport("failed to convert request").with_source(anyhow::Error::new(e))
        })?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::transport(format!("failed to execute request: {e}"))
                    .with_source(anyhow::Error::new(e))
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::transport("failed to read response body").with_source(anyhow::Error::new(e))
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
