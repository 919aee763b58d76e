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

use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Result;

use super::OperationKind;
use crate::constants::*;
use crate::parameter::Device;
use crate::parameter::IsCollection;
use crate::parameter::LogisticsSubType;
use crate::parameter::LogisticsType;
use crate::Content;
use crate::Operation;

/// Open the provider's store picker (`/Express/map`).
///
/// The map is shown in the customer's browser, so this operation is usually
/// rendered through [`Operation::form_action`] instead of being sent.
#[derive(Debug, Clone)]
pub struct OpenStoreMap {
    content: Content,
}

impl OpenStoreMap {
    const KIND: OperationKind = OperationKind::OpenStoreMap;

    /// Create a new builder for the 7-ELEVEN C2C desktop map.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content
            .set(LOGISTICS_TYPE, LogisticsType::Cvs)
            .set(LOGISTICS_SUB_TYPE, LogisticsSubType::UnimartC2c)
            .set("IsCollection", IsCollection::No)
            .set("Device", Device::Pc);
        Self { content }
    }

    /// Set `LogisticsSubType`, any store pickup carrier.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        Self::KIND.request_path(sub)?;
        Ok(self.put_sub_type(sub))
    }

    fn put_sub_type(&mut self, sub: LogisticsSubType) -> &mut Self {
        self.content
            .set(LOGISTICS_SUB_TYPE, sub)
            .set(LOGISTICS_TYPE, sub.logistics_type());
        self
    }

    /// Set `IsCollection`.
    pub fn set_is_collection(&mut self, v: IsCollection) -> &mut Self {
        self.content.set("IsCollection", v);
        self
    }

    /// Set `ExtraData`, echoed back with the chosen store.
    pub fn set_extra_data(&mut self, data: &str) -> &mut Self {
        self.content.set("ExtraData", data);
        self
    }

    /// Set `Device`.
    pub fn set_device(&mut self, device: Device) -> &mut Self {
        self.content.set("Device", device);
        self
    }

    /// Show 7-ELEVEN C2C stores.
    pub fn use_unimart_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::UnimartC2c)
    }

    /// Show FamilyMart C2C stores.
    pub fn use_fami_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::FamiC2c)
    }

    /// Show Hi-Life C2C stores.
    pub fn use_hilife_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::HilifeC2c)
    }

    /// Show OK Mart C2C stores.
    pub fn use_okmart_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::OkmartC2c)
    }

    /// Show 7-ELEVEN B2C stores.
    pub fn use_unimart_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Unimart)
    }

    /// Show FamilyMart B2C stores.
    pub fn use_fami_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Fami)
    }

    /// Show Hi-Life B2C stores.
    pub fn use_hilife_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Hilife)
    }

    /// Only show stores able to collect payment.
    pub fn with_collection(&mut self) -> &mut Self {
        self.set_is_collection(IsCollection::Yes)
    }

    /// Show every store.
    pub fn without_collection(&mut self) -> &mut Self {
        self.set_is_collection(IsCollection::No)
    }

    /// Use the mobile layout.
    pub fn use_mobile_device(&mut self) -> &mut Self {
        self.set_device(Device::Mobile)
    }

    /// Use the desktop layout.
    pub fn use_pc_device(&mut self) -> &mut Self {
        self.set_device(Device::Pc)
    }
}

impl Operation for OpenStoreMap {
    fn name(&self) -> &'static str {
        Self::KIND.name()
    }

    fn content(&self) -> &Content {
        &self.content
    }

    fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    fn validate(&self) -> Result<()> {
        let c = &self.content;
        c.check_base()?;
        Self::KIND.check_sub_type(c)?;
        c.require(MERCHANT_TRADE_NO)?;
        c.require(LOGISTICS_TYPE)?;
        c.require(LOGISTICS_SUB_TYPE)?;
        if !c.fields().contains_key("IsCollection") {
            return Err(Error::required("IsCollection"));
        }
        c.require(SERVER_REPLY_URL)
    }
}
