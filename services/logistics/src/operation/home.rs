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

use chrono::Local;
use chrono::NaiveDate;
use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Result;

use super::OperationKind;
use crate::constants::*;
use crate::content::check_length;
use crate::content::text_setters;
use crate::parameter::Distance;
use crate::parameter::IsCollection;
use crate::parameter::LogisticsSubType;
use crate::parameter::LogisticsType;
use crate::parameter::ScheduledDeliveryTime;
use crate::parameter::ScheduledPickupTime;
use crate::parameter::Specification;
use crate::parameter::Temperature;
use crate::Content;
use crate::Operation;

/// Create a home delivery order (`/Express/Create`).
///
/// Defaults to T-CAT, room temperature, same city, 60cm, no time windows.
#[derive(Debug, Clone)]
pub struct CreateHomeOrder {
    content: Content,
}

impl CreateHomeOrder {
    const KIND: OperationKind = OperationKind::CreateHomeOrder;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content
            .set(
                MERCHANT_TRADE_DATE,
                Local::now().format(TRADE_DATE_FORMAT).to_string(),
            )
            .set(LOGISTICS_TYPE, LogisticsType::Home)
            .set(LOGISTICS_SUB_TYPE, LogisticsSubType::Tcat)
            .set("GoodsAmount", 0u32)
            .set("IsCollection", IsCollection::No)
            .set("Temperature", Temperature::Room)
            .set("Distance", Distance::Same)
            .set("Specification", Specification::Size60)
            .set("ScheduledPickupTime", ScheduledPickupTime::Unlimited)
            .set("ScheduledDeliveryTime", ScheduledDeliveryTime::Unlimited);
        Self { content }
    }

    /// Set `LogisticsSubType`, T-CAT or Chunghwa Post.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        Self::KIND.request_path(sub)?;
        self.content
            .set(LOGISTICS_SUB_TYPE, sub)
            .set(LOGISTICS_TYPE, LogisticsType::Home);
        Ok(self)
    }

    /// Set `IsCollection`.
    pub fn set_is_collection(&mut self, v: IsCollection) -> &mut Self {
        self.content.set("IsCollection", v);
        self
    }

    /// Set `GoodsAmount`.
    pub fn set_goods_amount(&mut self, amount: u32) -> &mut Self {
        self.content.set("GoodsAmount", amount);
        self
    }

    /// Set `CollectionAmount`.
    pub fn set_collection_amount(&mut self, amount: u32) -> &mut Self {
        self.content.set("CollectionAmount", amount);
        self
    }

    /// Set `GoodsName`, at most 50 characters.
    pub fn set_goods_name(&mut self, name: &str) -> Result<&mut Self> {
        check_length("GoodsName", name, GOODS_NAME_MAX_LENGTH)?;
        self.content.set("GoodsName", name);
        Ok(self)
    }

    /// Set `Temperature`.
    pub fn set_temperature(&mut self, v: Temperature) -> &mut Self {
        self.content.set("Temperature", v);
        self
    }

    /// Set `Distance`.
    pub fn set_distance(&mut self, v: Distance) -> &mut Self {
        self.content.set("Distance", v);
        self
    }

    /// Set `Specification`.
    pub fn set_specification(&mut self, v: Specification) -> &mut Self {
        self.content.set("Specification", v);
        self
    }

    /// Set `ScheduledPickupTime`.
    pub fn set_scheduled_pickup_time(&mut self, v: ScheduledPickupTime) -> &mut Self {
        self.content.set("ScheduledPickupTime", v);
        self
    }

    /// Set `ScheduledDeliveryTime`.
    pub fn set_scheduled_delivery_time(&mut self, v: ScheduledDeliveryTime) -> &mut Self {
        self.content.set("ScheduledDeliveryTime", v);
        self
    }

    /// Set `ScheduledDeliveryDate` from formatted text (`yyyy/MM/dd`).
    pub fn set_scheduled_delivery_date(&mut self, date: &str) -> &mut Self {
        self.content.set("ScheduledDeliveryDate", date);
        self
    }

    /// Set `ScheduledDeliveryDate`.
    pub fn set_scheduled_delivery_naive_date(&mut self, date: NaiveDate) -> &mut Self {
        self.content
            .set("ScheduledDeliveryDate", date.format(DATE_FORMAT).to_string());
        self
    }

    /// Set `PackageCount`.
    pub fn set_package_count(&mut self, count: u32) -> &mut Self {
        self.content.set("PackageCount", count);
        self
    }

    text_setters! {
        set_sender_name => "SenderName",
        set_sender_phone => "SenderPhone",
        set_sender_cell_phone => "SenderCellPhone",
        set_sender_zip_code => "SenderZipCode",
        set_sender_address => "SenderAddress",
        set_receiver_name => "ReceiverName",
        set_receiver_phone => "ReceiverPhone",
        set_receiver_cell_phone => "ReceiverCellPhone",
        set_receiver_zip_code => "ReceiverZipCode",
        set_receiver_address => "ReceiverAddress",
        set_receiver_email => "ReceiverEmail",
    }

    /// Ship with T-CAT.
    pub fn use_tcat(&mut self) -> &mut Self {
        self.content
            .set(LOGISTICS_SUB_TYPE, LogisticsSubType::Tcat)
            .set(LOGISTICS_TYPE, LogisticsType::Home);
        self
    }

    /// Ship with Chunghwa Post.
    pub fn use_post(&mut self) -> &mut Self {
        self.content
            .set(LOGISTICS_SUB_TYPE, LogisticsSubType::Post)
            .set(LOGISTICS_TYPE, LogisticsType::Home);
        self
    }

    /// Ship at room temperature.
    pub fn room_temperature(&mut self) -> &mut Self {
        self.set_temperature(Temperature::Room)
    }

    /// Ship refrigerated.
    pub fn refrigeration(&mut self) -> &mut Self {
        self.set_temperature(Temperature::Refrigeration)
    }

    /// Ship frozen.
    pub fn freeze(&mut self) -> &mut Self {
        self.set_temperature(Temperature::Freeze)
    }

    /// Deliver within the sender's city.
    pub fn same_city(&mut self) -> &mut Self {
        self.set_distance(Distance::Same)
    }

    /// Deliver to another city.
    pub fn other_city(&mut self) -> &mut Self {
        self.set_distance(Distance::Other)
    }

    /// Deliver to an outlying island.
    pub fn island(&mut self) -> &mut Self {
        self.set_distance(Distance::Island)
    }

    /// Collect payment on delivery, see [`super::CreateCvsOrder::with_collection`].
    pub fn with_collection(&mut self, amount: u32) -> &mut Self {
        self.set_is_collection(IsCollection::Yes);
        if amount > 0 {
            self.set_collection_amount(amount);
        }
        self
    }

    /// Do not collect payment on delivery.
    pub fn without_collection(&mut self) -> &mut Self {
        self.set_is_collection(IsCollection::No)
    }
}

impl Operation for CreateHomeOrder {
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
        c.require(MERCHANT_TRADE_DATE)?;
        c.require(LOGISTICS_SUB_TYPE)?;
        c.require("GoodsName")?;
        c.require("SenderName")?;
        c.require_any(&["SenderPhone", "SenderCellPhone"])?;
        c.require("SenderZipCode")?;
        c.require("SenderAddress")?;
        c.require("ReceiverName")?;
        c.require_any(&["ReceiverPhone", "ReceiverCellPhone"])?;
        c.require("ReceiverZipCode")?;
        c.require("ReceiverAddress")?;
        c.require(SERVER_REPLY_URL)
    }
}

/// Return a T-CAT home delivery order (`/Express/ReturnHome`).
#[derive(Debug, Clone)]
pub struct ReturnHomeOrder {
    content: Content,
}

impl ReturnHomeOrder {
    const KIND: OperationKind = OperationKind::ReturnHomeOrder;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content
            .set(LOGISTICS_SUB_TYPE, LogisticsSubType::Tcat)
            .set("GoodsAmount", 0u32)
            .set("Temperature", Temperature::Room)
            .set("ScheduledPickupTime", ScheduledPickupTime::Unlimited);
        Self { content }
    }

    /// Set `LogisticsSubType`; only T-CAT handles home returns.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        let path = Self::KIND.request_path(sub)?;
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        self.content.set_request_path(path);
        Ok(self)
    }

    /// Set `GoodsAmount`.
    pub fn set_goods_amount(&mut self, amount: u32) -> &mut Self {
        self.content.set("GoodsAmount", amount);
        self
    }

    /// Set `GoodsName`, at most 50 characters.
    pub fn set_goods_name(&mut self, name: &str) -> Result<&mut Self> {
        check_length("GoodsName", name, GOODS_NAME_MAX_LENGTH)?;
        self.content.set("GoodsName", name);
        Ok(self)
    }

    /// Set `Temperature`.
    pub fn set_temperature(&mut self, v: Temperature) -> &mut Self {
        self.content.set("Temperature", v);
        self
    }

    /// Set `ScheduledPickupTime`.
    pub fn set_scheduled_pickup_time(&mut self, v: ScheduledPickupTime) -> &mut Self {
        self.content.set("ScheduledPickupTime", v);
        self
    }

    text_setters! {
        set_all_pay_logistics_id => "AllPayLogisticsID",
        set_service_type => "ServiceType",
        set_sender_name => "SenderName",
        set_sender_phone => "SenderPhone",
        set_sender_cell_phone => "SenderCellPhone",
        set_sender_zip_code => "SenderZipCode",
        set_sender_address => "SenderAddress",
        set_receiver_name => "ReceiverName",
        set_receiver_phone => "ReceiverPhone",
        set_receiver_cell_phone => "ReceiverCellPhone",
        set_receiver_zip_code => "ReceiverZipCode",
        set_receiver_address => "ReceiverAddress",
        set_receiver_email => "ReceiverEmail",
    }

    /// Return at room temperature.
    pub fn room_temperature(&mut self) -> &mut Self {
        self.set_temperature(Temperature::Room)
    }

    /// Return refrigerated.
    pub fn refrigeration(&mut self) -> &mut Self {
        self.set_temperature(Temperature::Refrigeration)
    }

    /// Return frozen.
    pub fn freeze(&mut self) -> &mut Self {
        self.set_temperature(Temperature::Freeze)
    }
}

impl Operation for ReturnHomeOrder {
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
        c.require(ALL_PAY_LOGISTICS_ID)?;
        c.require("SenderName")?;
        c.require_any(&["SenderPhone", "SenderCellPhone"])?;
        c.require("SenderZipCode")?;
        c.require("SenderAddress")?;
        c.require("ReceiverName")?;
        c.require_any(&["ReceiverPhone", "ReceiverCellPhone"])?;
        c.require("ReceiverZipCode")?;
        c.require("ReceiverAddress")?;
        c.require(SERVER_REPLY_URL)
    }
}
