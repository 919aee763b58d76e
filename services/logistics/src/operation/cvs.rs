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
use crate::parameter::IsCollection;
use crate::parameter::LogisticsSubType;
use crate::parameter::LogisticsType;
use crate::Content;
use crate::Operation;

/// Create a store pickup order (`/Express/Create`).
///
/// Defaults to 7-ELEVEN C2C without collection, dated now.
#[derive(Debug, Clone)]
pub struct CreateCvsOrder {
    content: Content,
}

impl CreateCvsOrder {
    const KIND: OperationKind = OperationKind::CreateCvsOrder;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content
            .set(
                MERCHANT_TRADE_DATE,
                Local::now().format(TRADE_DATE_FORMAT).to_string(),
            )
            .set(LOGISTICS_TYPE, LogisticsType::Cvs)
            .set(LOGISTICS_SUB_TYPE, LogisticsSubType::UnimartC2c)
            .set("GoodsAmount", 0u32)
            .set("IsCollection", IsCollection::No);
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
            .set(LOGISTICS_TYPE, LogisticsType::Cvs);
        self
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

    /// Set `SenderName`, at most 10 characters.
    pub fn set_sender_name(&mut self, name: &str) -> Result<&mut Self> {
        check_length("SenderName", name, PERSON_NAME_MAX_LENGTH)?;
        self.content.set("SenderName", name);
        Ok(self)
    }

    /// Set `ReceiverName`, at most 10 characters.
    pub fn set_receiver_name(&mut self, name: &str) -> Result<&mut Self> {
        check_length("ReceiverName", name, PERSON_NAME_MAX_LENGTH)?;
        self.content.set("ReceiverName", name);
        Ok(self)
    }

    text_setters! {
        set_service_type => "ServiceType",
        set_sender_phone => "SenderPhone",
        set_sender_cell_phone => "SenderCellPhone",
        set_sender_zip_code => "SenderZipCode",
        set_sender_address => "SenderAddress",
        set_receiver_phone => "ReceiverPhone",
        set_receiver_cell_phone => "ReceiverCellPhone",
        set_receiver_email => "ReceiverEmail",
        set_receiver_store_id => "ReceiverStoreID",
        set_return_store_id => "ReturnStoreID",
        set_all_pay_logistics_id => "AllPayLogisticsID",
    }

    /// Ship through 7-ELEVEN C2C.
    pub fn use_unimart_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::UnimartC2c)
    }

    /// Ship through FamilyMart C2C.
    pub fn use_fami_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::FamiC2c)
    }

    /// Ship through Hi-Life C2C.
    pub fn use_hilife_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::HilifeC2c)
    }

    /// Ship through OK Mart C2C.
    pub fn use_okmart_c2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::OkmartC2c)
    }

    /// Ship through 7-ELEVEN B2C.
    pub fn use_unimart_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Unimart)
    }

    /// Ship through FamilyMart B2C.
    pub fn use_fami_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Fami)
    }

    /// Ship through Hi-Life B2C.
    pub fn use_hilife_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Hilife)
    }

    /// Collect payment on pickup.
    ///
    /// A zero amount leaves `CollectionAmount` unset so the provider falls
    /// back to `GoodsAmount`.
    pub fn with_collection(&mut self, amount: u32) -> &mut Self {
        self.set_is_collection(IsCollection::Yes);
        if amount > 0 {
            self.set_collection_amount(amount);
        }
        self
    }

    /// Do not collect payment on pickup.
    pub fn without_collection(&mut self) -> &mut Self {
        self.set_is_collection(IsCollection::No)
    }
}

impl Operation for CreateCvsOrder {
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
        c.require("ReceiverName")?;
        c.require_any(&["ReceiverPhone", "ReceiverCellPhone"])?;
        c.require("ReceiverStoreID")?;
        c.require(SERVER_REPLY_URL)
    }
}

/// Update shipment details of a store pickup order (`/Helper/UpdateShipmentInfo`).
#[derive(Debug, Clone)]
pub struct UpdateCvsOrder {
    content: Content,
}

impl UpdateCvsOrder {
    const KIND: OperationKind = OperationKind::UpdateCvsOrder;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        Self {
            content: Content::new(cred, Self::KIND.default_path()),
        }
    }

    /// Set `LogisticsSubType`: any store pickup carrier, B2C or C2C.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        Self::KIND.request_path(sub)?;
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        Ok(self)
    }

    /// Set `ShipmentDate` from formatted text (`yyyy/MM/dd`).
    pub fn set_shipment_date(&mut self, date: &str) -> &mut Self {
        self.content.set("ShipmentDate", date);
        self
    }

    /// Set `ShipmentDate`.
    pub fn set_shipment_naive_date(&mut self, date: NaiveDate) -> &mut Self {
        self.content
            .set("ShipmentDate", date.format(DATE_FORMAT).to_string());
        self
    }

    /// Set `GoodsAmount`.
    pub fn set_goods_amount(&mut self, amount: u32) -> &mut Self {
        self.content.set("GoodsAmount", amount);
        self
    }

    text_setters! {
        set_all_pay_logistics_id => "AllPayLogisticsID",
        set_logistics_status => "LogisticsStatus",
        set_receiver_name => "ReceiverName",
        set_receiver_cell_phone => "ReceiverCellPhone",
        set_receiver_store_id => "ReceiverStoreID",
        set_goods_name => "GoodsName",
        set_sender_name => "SenderName",
        set_sender_cell_phone => "SenderCellPhone",
        set_cvs_payment_no => "CVSPaymentNo",
        set_cvs_validation_no => "CVSValidationNo",
        set_store_id => "StoreID",
    }
}

impl Operation for UpdateCvsOrder {
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
        self.content.require(LOGISTICS_SUB_TYPE)
    }
}

/// Cancel a 7-ELEVEN C2C order (`/Express/CancelC2COrder`).
///
/// The provider only supports cancelling 7-ELEVEN C2C orders, so the sub type
/// is checked but never sent.
#[derive(Debug, Clone)]
pub struct CancelCvsOrder {
    content: Content,
    sub_type: LogisticsSubType,
}

impl CancelCvsOrder {
    const KIND: OperationKind = OperationKind::CancelCvsOrder;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        Self {
            content: Content::new(cred, Self::KIND.default_path()),
            sub_type: LogisticsSubType::UnimartC2c,
        }
    }

    /// The sub type of the order being cancelled.
    pub fn logistics_sub_type(&self) -> LogisticsSubType {
        self.sub_type
    }

    /// Assert the sub type of the order being cancelled.
    ///
    /// Anything but [`LogisticsSubType::UnimartC2c`] is rejected.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        Self::KIND.request_path(sub)?;
        self.sub_type = sub;
        Ok(self)
    }

    text_setters! {
        set_all_pay_logistics_id => "AllPayLogisticsID",
        set_cvs_payment_no => "CVSPaymentNo",
        set_cvs_validation_no => "CVSValidationNo",
    }
}

impl Operation for CancelCvsOrder {
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
        self.content.require("CVSPaymentNo")?;
        self.content.require("CVSValidationNo")
    }
}

/// Return a B2C store pickup order.
///
/// The request path depends on the carrier and is picked when the sub type
/// is assigned.
#[derive(Debug, Clone)]
pub struct ReturnCvsOrder {
    content: Content,
}

impl ReturnCvsOrder {
    const KIND: OperationKind = OperationKind::ReturnCvsOrder;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        let mut content = Content::new(cred, Self::KIND.default_path());
        content.set("GoodsAmount", 0u32);
        Self { content }
    }

    /// Set `LogisticsSubType` and the matching request path.
    ///
    /// Accepts every B2C sub type.
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

    text_setters! {
        set_all_pay_logistics_id => "AllPayLogisticsID",
        set_service_type => "ServiceType",
        set_sender_name => "SenderName",
        set_sender_phone => "SenderPhone",
        set_receiver_store_id => "ReceiverStoreID",
        set_receiver_name => "ReceiverName",
        set_receiver_phone => "ReceiverPhone",
        set_receiver_cell_phone => "ReceiverCellPhone",
        set_receiver_email => "ReceiverEmail",
    }

    /// Return through 7-ELEVEN.
    pub fn use_unimart_b2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::Unimart)
    }

    /// Return through FamilyMart.
    pub fn use_fami_b2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::Fami)
    }

    /// Return through Hi-Life.
    pub fn use_hilife_b2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::Hilife)
    }

    /// Return through 7-ELEVEN frozen.
    pub fn use_unimart_freeze_b2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::UnimartFreeze)
    }

    fn put_accepted(&mut self, sub: LogisticsSubType) -> &mut Self {
        if let Ok(path) = Self::KIND.request_path(sub) {
            self.content.set(LOGISTICS_SUB_TYPE, sub);
            self.content.set_request_path(path);
        }
        self
    }
}

impl Operation for ReturnCvsOrder {
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
        self.content.require(LOGISTICS_SUB_TYPE)?;
        self.content.require(SERVER_REPLY_URL)
    }
}
