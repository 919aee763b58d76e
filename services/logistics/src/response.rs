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

//! Synchronous API replies.

use ecpay_logistics_core::Error;
use ecpay_logistics_core::Payload;
use ecpay_logistics_core::Result;
use log::debug;

use crate::check_mac::CheckMacEncoder;
use crate::constants::*;

/// Return codes treated as success for a synchronous reply.
pub const SUCCESS_CODES: [&str; 2] = ["1", "300"];

/// A parsed reply from the logistics API.
///
/// The body is decoded once at construction. Bodies that match neither the
/// form nor the JSON shape leave [`Response::data`] empty and record a parse
/// error instead, so [`Response::is_success`] can never be true for them.
#[derive(Debug, Clone)]
pub struct Response {
    raw_body: String,
    data: Payload,
    status_prefix: Option<String>,
    parse_error: Option<String>,
    encoder: Option<CheckMacEncoder>,
    verified: bool,
}

impl Response {
    /// Parse a reply without signature support.
    pub fn new(body: impl Into<String>) -> Self {
        Self::parse(body.into(), None)
    }

    /// Parse a reply that can be verified with the given encoder.
    pub fn with_encoder(body: impl Into<String>, encoder: CheckMacEncoder) -> Self {
        Self::parse(body.into(), Some(encoder))
    }

    /// Parse a reply, failing with [`ErrorKind::ParseFailed`](ecpay_logistics_core::ErrorKind::ParseFailed)
    /// when the body matches no known shape.
    pub fn try_parse(body: impl Into<String>, encoder: Option<CheckMacEncoder>) -> Result<Self> {
        let resp = Self::parse(body.into(), encoder);
        match &resp.parse_error {
            Some(msg) => Err(Error::parse_failed(msg.clone())),
            None => Ok(resp),
        }
    }

    fn parse(raw_body: String, encoder: Option<CheckMacEncoder>) -> Self {
        let mut resp = Self {
            raw_body,
            data: Payload::new(),
            status_prefix: None,
            parse_error: None,
            encoder,
            verified: false,
        };

        match parse_body(&resp.raw_body) {
            Ok((prefix, data)) => {
                resp.status_prefix = prefix;
                resp.data = data;
            }
            Err(msg) => {
                debug!("response body could not be parsed: {msg}");
                resp.parse_error = Some(msg);
            }
        }
        resp
    }

    /// The body as received.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Parsed fields.
    pub fn data(&self) -> &Payload {
        &self.data
    }

    /// Field value as text.
    pub fn get(&self, key: &str) -> Option<String> {
        self.data.get_str(key)
    }

    /// Field value as text, or `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Why the body could not be parsed, if it could not.
    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    /// Returns true if the body could not be parsed.
    pub fn has_parse_error(&self) -> bool {
        self.parse_error.is_some()
    }

    /// Numeric prefix of a `<code>|<rest>` body.
    pub fn status_prefix(&self) -> Option<&str> {
        self.status_prefix.as_deref()
    }

    /// `RtnCode`, falling back to the status prefix.
    pub fn rtn_code(&self) -> String {
        self.get(RTN_CODE)
            .or_else(|| self.status_prefix.clone())
            .unwrap_or_default()
    }

    /// `RtnMsg`, falling back to `RtnMsgE`.
    pub fn rtn_msg(&self) -> String {
        self.get(RTN_MSG)
            .or_else(|| self.get(RTN_MSG_E))
            .unwrap_or_default()
    }

    /// Returns true if the return code is `1` or `300`.
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.rtn_code().as_str())
    }

    /// `AllPayLogisticsID`.
    pub fn all_pay_logistics_id(&self) -> String {
        self.get(ALL_PAY_LOGISTICS_ID)
            .or_else(|| self.get("1|AllPayLogisticsID"))
            .unwrap_or_default()
    }

    /// `BookingNote`.
    pub fn booking_note(&self) -> String {
        self.get_or("BookingNote", "")
    }

    /// `CVSStoreID`.
    pub fn cvs_store_id(&self) -> String {
        self.get_or("CVSStoreID", "")
    }

    /// `CVSStoreName`.
    pub fn cvs_store_name(&self) -> String {
        self.get_or("CVSStoreName", "")
    }

    /// `CVSAddress`.
    pub fn cvs_address(&self) -> String {
        self.get_or("CVSAddress", "")
    }

    /// `CVSTelephone`.
    pub fn cvs_telephone(&self) -> String {
        self.get_or("CVSTelephone", "")
    }

    /// `CVSPaymentNo`.
    pub fn cvs_payment_no(&self) -> String {
        self.get_or("CVSPaymentNo", "")
    }

    /// `CVSValidationNo`.
    pub fn cvs_validation_no(&self) -> String {
        self.get_or("CVSValidationNo", "")
    }

    /// `PrintURL`.
    pub fn print_url(&self) -> String {
        self.get_or("PrintURL", "")
    }

    /// `MerchantTradeNo`.
    pub fn merchant_trade_no(&self) -> String {
        self.get_or(MERCHANT_TRADE_NO, "")
    }

    /// Returns true after a successful [`Response::verify`] or [`Response::verify_or_fail`].
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Check the `CheckMacValue` of the reply.
    ///
    /// Always false when no encoder is configured.
    pub fn verify(&mut self) -> bool {
        self.verified = match &self.encoder {
            Some(encoder) => encoder.verify(&self.data),
            None => false,
        };
        self.verified
    }

    /// Same as [`Response::verify`] but returns an error on failure.
    ///
    /// Does nothing when no encoder is configured, leaving the reply unverified.
    pub fn verify_or_fail(&mut self) -> Result<&mut Self> {
        let Some(encoder) = &self.encoder else {
            self.verified = false;
            return Ok(self);
        };
        encoder.verify_or_fail(&self.data)?;
        self.verified = true;
        Ok(self)
    }
}

fn parse_body(body: &str) -> std::result::Result<(Option<String>, Payload), String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err("response body is empty".to_string());
    }

    if trimmed.starts_with('{') {
        if let Some(data) = parse_json(trimmed) {
            return Ok((None, data));
        }
    }

    if let Some((prefix, rest)) = split_status_prefix(trimmed) {
        let data = if rest.contains('=') {
            parse_form(rest)
        } else {
            Payload::from_iter([(RTN_CODE, prefix), (RTN_MSG, rest)])
        };
        return Ok((Some(prefix.to_string()), data));
    }

    let data = parse_form(trimmed);
    if data.is_empty() {
        return Err(format!(
            "response body is neither form encoded nor a JSON object: {}",
            truncate(trimmed, 64)
        ));
    }
    Ok((None, data))
}

/// Split `1|rest` into `("1", "rest")`.
fn split_status_prefix(body: &str) -> Option<(&str, &str)> {
    let (prefix, rest) = body.split_once('|')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((prefix, rest))
}

fn parse_form(body: &str) -> Payload {
    form_urlencoded::parse(body.as_bytes())
        .filter(|(k, v)| !k.is_empty() && !(k.starts_with(['{', '[']) && v.is_empty()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn parse_json(body: &str) -> Option<Payload> {
    let serde_json::Value::Object(map) = serde_json::from_str(body).ok()? else {
        return None;
    };

    Some(
        map.into_iter()
            .map(|(k, v)| {
                let v = match v {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect(),
    )
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
