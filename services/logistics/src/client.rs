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

//! Sending operations to the logistics API.

use bytes::Bytes;
use ecpay_logistics_core::Context;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Payload;
use ecpay_logistics_core::Result;
use http::header::CONTENT_TYPE;
use log::debug;
use log::error;

use crate::response::Response;
use crate::Operation;

/// Posts signed operations through the [`Context`]'s `HttpSend`.
///
/// Each operation is posted to its own [`Operation::action_url`], so the
/// server is picked where the operation is built. Retries are left to the
/// `HttpSend` implementation.
#[derive(Debug, Clone)]
pub struct LogisticsClient {
    ctx: Context,
}

impl LogisticsClient {
    /// Create a new client sending through the context.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Validate, sign and send an operation.
    ///
    /// The operation is consumed: once signed it can not be changed anymore.
    pub async fn send<O: Operation>(&self, op: O) -> Result<Response> {
        self.send_operation(&op).await
    }

    /// Same as [`LogisticsClient::send`] for operations made by an
    /// [`OperationCatalog`](crate::OperationCatalog).
    pub async fn send_boxed(&self, op: Box<dyn Operation>) -> Result<Response> {
        self.send_operation(op.as_ref()).await
    }

    async fn send_operation(&self, op: &dyn Operation) -> Result<Response> {
        let payload = op.signed_payload()?;
        let encoder = op.encoder()?;
        let url = op.action_url();
        debug!("sending {} to {url}: {payload:?}", op.name());

        let req = http::Request::builder()
            .method(http::Method::POST)
            .uri(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Bytes::from(encode_form(&payload)))?;

        let resp = match self.ctx.http_send_as_string(req).await {
            Ok(resp) => resp,
            Err(err) => {
                error!("{} to {url} failed: {err}", op.name());
                return Err(err);
            }
        };

        let status = resp.status();
        let body = resp.into_body();
        debug!("{} replied {status}: {body}", op.name());
        if !status.is_success() {
            error!("{} to {url} replied {status}", op.name());
            return Err(Error::transport(format!(
                "{} replied {status}: {body}",
                op.name()
            )));
        }

        Ok(Response::with_encoder(body, encoder))
    }
}

fn encode_form(payload: &Payload) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(payload.iter().map(|(k, v)| (k, v.to_string())))
        .finish()
}
