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

use chrono::Utc;
use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Result;

use super::OperationKind;
use crate::constants::*;
use crate::content::text_setters;
use crate::parameter::LogisticsSubType;
use crate::parameter::StoreType;
use crate::Content;
use crate::Operation;

/// Query the state of a logistics order (`/Helper/QueryLogisticsTradeInfo/V4`).
#[derive(Debug, Clone)]
pub struct QueryLogisticsOrder {
    content: Content,
}

impl QueryLogisticsOrder {
    const KIND: OperationKind = OperationKind::QueryLogisticsOrder;

    /// Create a new builder stamped with the current unix time.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content.set("TimeStamp", Utc::now().timestamp());
        Self { content }
    }

    /// Set `TimeStamp`, in unix seconds.
    pub fn set_time_stamp(&mut self, timestamp: i64) -> &mut Self {
        self.content.set("TimeStamp", timestamp);
        self
    }

    text_setters! {
        set_all_pay_logistics_id => "AllPayLogisticsID",
    }
}

impl Operation for QueryLogisticsOrder {
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
        self.content.check_base()?;
        Self::KIND.check_sub_type(&self.content)?;
        self.content.require(ALL_PAY_LOGISTICS_ID)?;
        self.content.require("TimeStamp")
    }
}

/// List convenience stores (`/Express/GetStoreList`).
///
/// At least one of keyword, zip code or city must narrow the search.
#[derive(Debug, Clone)]
pub struct GetStoreList {
    content: Content,
}

impl GetStoreList {
    const KIND: OperationKind = OperationKind::GetStoreList;

    /// Create a new builder listing pickup stores.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content.set("StoreType", StoreType::PickupOnly);
        Self { content }
    }

    /// Set `LogisticsSubType`, any store pickup carrier.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        Self::KIND.request_path(sub)?;
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        Ok(self)
    }

    /// Set `StoreType`.
    pub fn set_store_type(&mut self, v: StoreType) -> &mut Self {
        self.content.set("StoreType", v);
        self
    }

    text_setters! {
        set_keyword => "Keyword",
        set_zip_code => "ZipCode",
        set_city => "City",
    }

    /// Search 7-ELEVEN stores, C2C or B2C.
    pub fn search_unimart(&mut self, c2c: bool) -> &mut Self {
        self.put_sub_type(if c2c {
            LogisticsSubType::UnimartC2c
        } else {
            LogisticsSubType::Unimart
        })
    }

    /// Search FamilyMart stores, C2C or B2C.
    pub fn search_fami(&mut self, c2c: bool) -> &mut Self {
        self.put_sub_type(if c2c {
            LogisticsSubType::FamiC2c
        } else {
            LogisticsSubType::Fami
        })
    }

    /// Search Hi-Life stores, C2C or B2C.
    pub fn search_hilife(&mut self, c2c: bool) -> &mut Self {
        self.put_sub_type(if c2c {
            LogisticsSubType::HilifeC2c
        } else {
            LogisticsSubType::Hilife
        })
    }

    /// Search OK Mart stores.
    pub fn search_okmart(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::OkmartC2c)
    }

    /// Only list pickup stores.
    pub fn pickup_only(&mut self) -> &mut Self {
        self.set_store_type(StoreType::PickupOnly)
    }

    /// List stores accepting both pickups and returns.
    pub fn pickup_and_return(&mut self) -> &mut Self {
        self.set_store_type(StoreType::PickupAndReturn)
    }

    /// Only list return stores.
    pub fn return_only(&mut self) -> &mut Self {
        self.set_store_type(StoreType::ReturnOnly)
    }

    fn put_sub_type(&mut self, sub: LogisticsSubType) -> &mut Self {
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        self
    }
}

impl Operation for GetStoreList {
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
        self.content.check_base()?;
        Self::KIND.check_sub_type(&self.content)?;
        self.content.require(LOGISTICS_SUB_TYPE)?;
        self.content.require_any(&["Keyword", "ZipCode", "City"])
    }
}
