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

//! Asynchronous status callbacks.
//!
//! ECPay posts every status change of a logistics order to the merchant's
//! `ServerReplyURL`. A handler must verify the `CheckMacValue` of the callback
//! before trusting it, and acknowledge it with [`SUCCESS_RESPONSE`].

use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Payload;
use ecpay_logistics_core::Result;
use http::header::CONTENT_TYPE;
use http::HeaderValue;
use http::StatusCode;
use log::debug;
use log::warn;

use crate::check_mac::CheckMacEncoder;
use crate::constants::*;

/// Body that acknowledges a verified callback.
pub const SUCCESS_RESPONSE: &str = "1|OK";
/// Body that rejects a callback whose `CheckMacValue` does not match.
pub const FAILURE_RESPONSE: &str = "0|CheckMacValue verify failed";

/// Terminal positive codes of forward logistics.
pub const FORWARD_SUCCESS_CODES: &[&str] = &["300", "2030", "2063", "2067", "2073", "3018"];
/// Terminal positive codes of reverse logistics.
pub const REVERSE_SUCCESS_CODES: &[&str] = &["300", "2030", "2063", "2067"];
/// In-flight codes.
pub const PROCESSING_CODES: &[&str] = &["2001", "2068", "3001", "3006", "3024"];
/// Terminal negative codes.
pub const FAILURE_CODES: &[&str] = &["2074", "3019", "3020", "3025", "5009"];

/// Decode a form encoded callback body.
pub fn from_form(body: &str) -> Payload {
    form_urlencoded::parse(body.as_bytes())
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// State every notification handler carries.
#[derive(Debug, Clone)]
pub struct NotifyState {
    encoder: CheckMacEncoder,
    data: Payload,
    verified: bool,
}

impl NotifyState {
    /// Create a new state around an encoder.
    pub fn new(encoder: CheckMacEncoder) -> Self {
        Self {
            encoder,
            data: Payload::new(),
            verified: false,
        }
    }
}

/// Shared behaviour of notification handlers.
///
/// Codes outside all three of success, processing and failure are left
/// unclassified: every predicate returns false for them.
pub trait NotifyHandler {
    /// Shared state.
    fn state(&self) -> &NotifyState;

    /// Mutable shared state.
    fn state_mut(&mut self) -> &mut NotifyState;

    /// Codes this handler treats as terminal success.
    fn success_codes(&self) -> &'static [&'static str];

    /// Store the callback fields and check their `CheckMacValue`.
    fn verify(&mut self, data: Payload) -> bool {
        let state = self.state_mut();
        state.verified = state.encoder.verify(&data);
        state.data = data;
        if !state.verified {
            warn!(
                "notification for {:?} failed CheckMacValue verification",
                state.data.get_str(ALL_PAY_LOGISTICS_ID).unwrap_or_default()
            );
        }
        state.verified
    }

    /// Same as [`NotifyHandler::verify`] but fails with
    /// [`ErrorKind::SignatureMismatch`](ecpay_logistics_core::ErrorKind::SignatureMismatch).
    fn verify_or_fail(&mut self, data: Payload) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.verify(data);
        let state = self.state();
        state.encoder.verify_or_fail(&state.data)?;
        Ok(self)
    }

    /// Returns true if the last verified callback was authentic.
    fn is_verified(&self) -> bool {
        self.state().verified
    }

    /// Fields of the last callback.
    fn data(&self) -> &Payload {
        &self.state().data
    }

    /// Field value as text.
    fn get(&self, key: &str) -> Option<String> {
        self.state().data.get_str(key)
    }

    /// Field value as text, or empty.
    fn get_text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// `RtnCode`.
    fn rtn_code(&self) -> String {
        self.get_text(RTN_CODE)
    }

    /// `RtnMsg`.
    fn rtn_msg(&self) -> String {
        self.get_text(RTN_MSG)
    }

    /// `AllPayLogisticsID`.
    fn all_pay_logistics_id(&self) -> String {
        self.get_text(ALL_PAY_LOGISTICS_ID)
    }

    /// `MerchantTradeNo`.
    fn merchant_trade_no(&self) -> String {
        self.get_text(MERCHANT_TRADE_NO)
    }

    /// `MerchantID`.
    fn merchant_id(&self) -> String {
        self.get_text(MERCHANT_ID)
    }

    /// `LogisticsType`.
    fn logistics_type(&self) -> String {
        self.get_text(LOGISTICS_TYPE)
    }

    /// `LogisticsSubType`.
    fn logistics_sub_type(&self) -> String {
        self.get_text(LOGISTICS_SUB_TYPE)
    }

    /// `GoodsAmount`, zero when absent or not a number.
    fn goods_amount(&self) -> i64 {
        self.get("GoodsAmount")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// `UpdateStatusDate`.
    fn update_status_date(&self) -> String {
        self.get_text("UpdateStatusDate")
    }

    /// `BookingNote`.
    fn booking_note(&self) -> String {
        self.get_text("BookingNote")
    }

    /// Returns true if the return code is one of `codes`.
    fn is_success_with_codes(&self, codes: &[&str]) -> bool {
        codes.contains(&self.rtn_code().as_str())
    }

    /// Returns true for terminal success.
    fn is_success(&self) -> bool {
        self.is_success_with_codes(self.success_codes())
    }

    /// Returns true while the shipment is still moving.
    fn is_processing(&self) -> bool {
        self.is_success_with_codes(PROCESSING_CODES)
    }

    /// Returns true for terminal failure.
    fn is_failure(&self) -> bool {
        self.is_success_with_codes(FAILURE_CODES)
    }

    /// Acknowledgement body ECPay expects.
    fn success_response(&self) -> &'static str {
        SUCCESS_RESPONSE
    }

    /// Verify a callback and build the reply to send back.
    ///
    /// Authentic callbacks get `200` with [`SUCCESS_RESPONSE`], anything
    /// else gets `400` with [`FAILURE_RESPONSE`].
    fn respond(&mut self, body: &str) -> http::Response<String> {
        let (status, text) = if self.verify(from_form(body)) {
            debug!("notification verified, rtn code {}", self.rtn_code());
            (StatusCode::OK, SUCCESS_RESPONSE)
        } else {
            (StatusCode::BAD_REQUEST, FAILURE_RESPONSE)
        };

        let mut resp = http::Response::new(text.to_string());
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        resp
    }
}

/// Handler for forward logistics callbacks.
#[derive(Debug, Clone)]
pub struct LogisticsNotify {
    state: NotifyState,
}

impl LogisticsNotify {
    /// Create a new handler.
    pub fn new(hash_key: &str, hash_iv: &str) -> Result<Self> {
        Ok(Self {
            state: NotifyState::new(CheckMacEncoder::new(hash_key, hash_iv)?),
        })
    }

    /// Create a new handler from the secrets of a credential.
    pub fn from_credential(cred: &Credential) -> Result<Self> {
        Self::new(&cred.hash_key, &cred.hash_iv)
    }

    /// `ReceiverName`.
    pub fn receiver_name(&self) -> String {
        self.get_text("ReceiverName")
    }

    /// `ReceiverPhone`.
    pub fn receiver_phone(&self) -> String {
        self.get_text("ReceiverPhone")
    }

    /// `ReceiverCellPhone`.
    pub fn receiver_cell_phone(&self) -> String {
        self.get_text("ReceiverCellPhone")
    }

    /// `ReceiverEmail`.
    pub fn receiver_email(&self) -> String {
        self.get_text("ReceiverEmail")
    }

    /// `ReceiverAddress`.
    pub fn receiver_address(&self) -> String {
        self.get_text("ReceiverAddress")
    }

    /// `CVSPaymentNo`.
    pub fn cvs_payment_no(&self) -> String {
        self.get_text("CVSPaymentNo")
    }

    /// `CVSValidationNo`.
    pub fn cvs_validation_no(&self) -> String {
        self.get_text("CVSValidationNo")
    }
}

impl NotifyHandler for LogisticsNotify {
    fn state(&self) -> &NotifyState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NotifyState {
        &mut self.state
    }

    fn success_codes(&self) -> &'static [&'static str] {
        FORWARD_SUCCESS_CODES
    }
}

/// Handler for reverse (return) logistics callbacks.
#[derive(Debug, Clone)]
pub struct ReverseLogisticsNotify {
    state: NotifyState,
}

impl ReverseLogisticsNotify {
    /// Create a new handler.
    pub fn new(hash_key: &str, hash_iv: &str) -> Result<Self> {
        Ok(Self {
            state: NotifyState::new(CheckMacEncoder::new(hash_key, hash_iv)?),
        })
    }

    /// Create a new handler from the secrets of a credential.
    pub fn from_credential(cred: &Credential) -> Result<Self> {
        Self::new(&cred.hash_key, &cred.hash_iv)
    }

    /// `OriginAllPayLogisticsID`, the forward order being returned.
    pub fn origin_all_pay_logistics_id(&self) -> String {
        self.get_text("OriginAllPayLogisticsID")
    }
}

impl NotifyHandler for ReverseLogisticsNotify {
    fn state(&self) -> &NotifyState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NotifyState {
        &mut self.state
    }

    fn success_codes(&self) -> &'static [&'static str] {
        REVERSE_SUCCESS_CODES
    }
}
