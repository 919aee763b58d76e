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

//! Shared state and behaviour of every operation builder.

use std::any::Any;
use std::fmt::Debug;

use chrono::NaiveDateTime;
use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Payload;
use ecpay_logistics_core::Result;
use ecpay_logistics_core::Value;
use serde::Serialize;

use crate::check_mac::CheckMacEncoder;
use crate::constants::*;

/// Payload under construction for one operation, plus what is needed to sign and address it.
#[derive(Debug, Clone)]
pub struct Content {
    credential: Credential,
    platform_id: String,
    server_url: String,
    request_path: String,
    payload: Payload,
}

impl Content {
    /// Create a new content seeded with `MerchantID`.
    pub fn new(credential: Credential, request_path: impl Into<String>) -> Self {
        let mut payload = Payload::new();
        payload.insert(MERCHANT_ID, credential.merchant_id.as_str());

        Self {
            credential,
            platform_id: String::new(),
            server_url: STAGE_SERVER_URL.to_string(),
            request_path: request_path.into(),
            payload,
        }
    }

    /// The credential used to sign this content.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Replace the credential, keeping `MerchantID` in sync.
    pub fn set_credential(&mut self, credential: Credential) -> &mut Self {
        self.payload
            .insert(MERCHANT_ID, credential.merchant_id.as_str());
        self.credential = credential;
        self
    }

    /// Merchant ID.
    pub fn merchant_id(&self) -> &str {
        &self.credential.merchant_id
    }

    /// Set `MerchantID`.
    pub fn set_merchant_id(&mut self, id: &str) -> &mut Self {
        self.credential.merchant_id = id.to_string();
        self.payload.insert(MERCHANT_ID, id);
        self
    }

    /// Platform ID, empty unless running as a platform merchant.
    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    /// Set `PlatformID`.
    ///
    /// An empty id is remembered but never written to the payload.
    pub fn set_platform_id(&mut self, id: &str) -> &mut Self {
        self.platform_id = id.to_string();
        if !id.is_empty() {
            self.payload.insert(PLATFORM_ID, id);
        }
        self
    }

    /// Set `MerchantTradeNo`.
    pub fn set_merchant_trade_no(&mut self, trade_no: &str) -> Result<&mut Self> {
        check_length(MERCHANT_TRADE_NO, trade_no, MERCHANT_TRADE_NO_MAX_LENGTH)?;
        self.payload.insert(MERCHANT_TRADE_NO, trade_no);
        Ok(self)
    }

    /// Set `MerchantTradeDate` from already formatted text (`yyyy/MM/dd HH:mm:ss`).
    pub fn set_merchant_trade_date(&mut self, date: &str) -> &mut Self {
        self.payload.insert(MERCHANT_TRADE_DATE, date);
        self
    }

    /// Set `MerchantTradeDate`.
    pub fn set_merchant_trade_datetime(&mut self, date: NaiveDateTime) -> &mut Self {
        self.payload
            .insert(MERCHANT_TRADE_DATE, date.format(TRADE_DATE_FORMAT).to_string());
        self
    }

    /// Set `ServerReplyURL`.
    pub fn set_server_reply_url(&mut self, url: &str) -> &mut Self {
        self.payload.insert(SERVER_REPLY_URL, url);
        self
    }

    /// Set `ClientReplyURL`.
    pub fn set_client_reply_url(&mut self, url: &str) -> &mut Self {
        self.payload.insert(CLIENT_REPLY_URL, url);
        self
    }

    /// Set `Remark`.
    pub fn set_remark(&mut self, remark: &str) -> &mut Self {
        self.payload.insert("Remark", remark);
        self
    }

    /// Server base url, without trailing `/`.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Set the server base url.
    pub fn set_server_url(&mut self, url: &str) -> &mut Self {
        self.server_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Path of the API this content is posted to.
    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub(crate) fn set_request_path(&mut self, path: &str) {
        self.request_path = path.to_string();
    }

    /// Full url of the API this content is posted to.
    pub fn action_url(&self) -> String {
        format!("{}{}", self.server_url, self.request_path)
    }

    /// Get a raw field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Set a raw field, bypassing any per-field check.
    ///
    /// A raw `LogisticsSubType` is still checked by the operation's
    /// `validate`.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.payload.insert(key, value);
        self
    }

    /// Remove a raw field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.payload.remove(key)
    }

    /// Fields accumulated so far, without validation.
    pub fn fields(&self) -> &Payload {
        &self.payload
    }

    /// Build the encoder for this content's credential.
    pub fn encoder(&self) -> Result<CheckMacEncoder> {
        CheckMacEncoder::from_credential(&self.credential)
    }

    /// Checks shared by every operation: `MerchantID`, then the signing secrets.
    pub fn check_base(&self) -> Result<()> {
        if self.credential.merchant_id.is_empty() {
            return Err(Error::required(MERCHANT_ID));
        }
        self.credential.check_signing_secrets()
    }

    /// Fail unless the field is present and non-empty.
    pub fn require(&self, field: &str) -> Result<()> {
        if self.payload.is_blank(field) {
            return Err(Error::required(field));
        }
        Ok(())
    }

    /// Fail unless at least one of the fields is present and non-empty.
    ///
    /// The error names every field joined by `|`.
    pub fn require_any(&self, fields: &[&str]) -> Result<()> {
        if fields.iter().all(|f| self.payload.is_blank(f)) {
            return Err(Error::required(&fields.join("|")));
        }
        Ok(())
    }

    /// Snapshot the payload with `MerchantID` synced from the credential.
    fn snapshot(&self) -> Payload {
        let mut payload = self.payload.clone();
        payload.insert(MERCHANT_ID, self.credential.merchant_id.as_str());
        payload
    }
}

/// Reject values longer than `max` characters.
pub(crate) fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(Error::too_long(field, max));
    }
    Ok(())
}

/// Everything a browser needs to post a signed form itself.
///
/// Used for redirects such as the store map, where the customer's browser
/// rather than the merchant server talks to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct FormAction {
    /// Target url of the form.
    pub action: String,
    /// Signed form fields.
    pub fields: Payload,
}

/// Upcasting support for [`Operation`] trait objects.
pub trait AsAny: Any {
    /// Borrow as [`Any`].
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert into a boxed [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// One logistics API operation.
///
/// Implementors own a [`Content`] and add their own defaults, setters and
/// validation rules. Signing is terminal: [`Operation::signed_payload`] never
/// changes the builder, and [`crate::LogisticsClient::send`] consumes it.
pub trait Operation: AsAny + Debug + Send + Sync {
    /// Name of the operation, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Shared content.
    fn content(&self) -> &Content;

    /// Mutable shared content.
    fn content_mut(&mut self) -> &mut Content;

    /// Check the current payload, stopping at the first violation.
    fn validate(&self) -> Result<()>;

    /// Path of the API this operation is posted to.
    fn request_path(&self) -> &str {
        self.content().request_path()
    }

    /// Full url of the API this operation is posted to.
    fn action_url(&self) -> String {
        self.content().action_url()
    }

    /// Encoder for this operation's credential.
    fn encoder(&self) -> Result<CheckMacEncoder> {
        self.content().encoder()
    }

    /// Validate, then return a copy of the unsigned payload.
    fn payload(&self) -> Result<Payload> {
        self.validate()?;
        Ok(self.content().snapshot())
    }

    /// Validate, then return the payload with `CheckMacValue` appended.
    fn signed_payload(&self) -> Result<Payload> {
        let payload = self.payload()?;
        Ok(self.encoder()?.encode_payload(payload))
    }

    /// Validate and sign, then pair the fields with the action url.
    fn form_action(&self) -> Result<FormAction> {
        Ok(FormAction {
            action: self.action_url(),
            fields: self.signed_payload()?,
        })
    }

    /// Set `MerchantID`.
    fn set_merchant_id(&mut self, id: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_merchant_id(id);
        self
    }

    /// Set `PlatformID`, ignored when empty.
    fn set_platform_id(&mut self, id: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_platform_id(id);
        self
    }

    /// Set `MerchantTradeNo`, at most 20 characters.
    fn set_merchant_trade_no(&mut self, trade_no: &str) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.content_mut().set_merchant_trade_no(trade_no)?;
        Ok(self)
    }

    /// Set `MerchantTradeDate` from formatted text.
    fn set_merchant_trade_date(&mut self, date: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_merchant_trade_date(date);
        self
    }

    /// Set `MerchantTradeDate`.
    fn set_merchant_trade_datetime(&mut self, date: NaiveDateTime) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_merchant_trade_datetime(date);
        self
    }

    /// Set `ServerReplyURL`.
    fn set_server_reply_url(&mut self, url: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_server_reply_url(url);
        self
    }

    /// Set `ClientReplyURL`.
    fn set_client_reply_url(&mut self, url: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_client_reply_url(url);
        self
    }

    /// Set `Remark`.
    fn set_remark(&mut self, remark: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_remark(remark);
        self
    }

    /// Set the server base url.
    fn set_server_url(&mut self, url: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set_server_url(url);
        self
    }

    /// Set a raw field.
    fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self
    where
        Self: Sized,
    {
        self.content_mut().set(key, value);
        self
    }
}

impl dyn Operation {
    /// Returns true if the operation is of type `T`.
    pub fn is<T: Operation>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    /// Borrow the concrete builder.
    pub fn downcast_ref<T: Operation>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    /// Mutably borrow the concrete builder.
    pub fn downcast_mut<T: Operation>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

/// Generate setters that store their argument as a text field verbatim.
macro_rules! text_setters {
    ($($name:ident => $field:literal),+ $(,)?) => {
        $(
            #[doc = concat!("Set `", $field, "`.")]
            pub fn $name(&mut self, value: &str) -> &mut Self {
                self.content.set($field, value);
                self
            }
        )+
    };
}
pub(crate) use text_setters;
