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
use ecpay_logistics_core::Result;

use super::OperationKind;
use crate::constants::*;
use crate::parameter::LogisticsSubType;
use crate::Content;
use crate::Operation;

/// Print shipping documents for B2C and home delivery orders (`/helper/printTradeDocument`).
#[derive(Debug, Clone)]
pub struct PrintTradeDocument {
    content: Content,
    ids: Vec<String>,
}

impl PrintTradeDocument {
    const KIND: OperationKind = OperationKind::PrintTradeDocument;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        Self {
            content: Content::new(cred, Self::KIND.default_path()),
            ids: Vec::new(),
        }
    }

    /// Print a single order.
    pub fn set_all_pay_logistics_id(&mut self, id: &str) -> &mut Self {
        self.set_all_pay_logistics_ids([id])
    }

    /// Print several orders at once.
    pub fn set_all_pay_logistics_ids<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self.content.set(ALL_PAY_LOGISTICS_ID, self.ids.join(","));
        self
    }

    /// Append one order to the batch.
    pub fn add_logistics_id(&mut self, id: &str) -> &mut Self {
        self.ids.push(id.to_string());
        self.content.set(ALL_PAY_LOGISTICS_ID, self.ids.join(","));
        self
    }

    /// Set `LogisticsSubType`; C2C orders go through [`PrintCvsDocument`].
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        Self::KIND.request_path(sub)?;
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        Ok(self)
    }

    /// Print 7-ELEVEN B2C documents.
    pub fn use_unimart_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Unimart)
    }

    /// Print FamilyMart B2C documents.
    pub fn use_fami_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Fami)
    }

    /// Print Hi-Life B2C documents.
    pub fn use_hilife_b2c(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Hilife)
    }

    /// Print T-CAT documents.
    pub fn use_tcat(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Tcat)
    }

    /// Print Chunghwa Post documents.
    pub fn use_post(&mut self) -> &mut Self {
        self.put_sub_type(LogisticsSubType::Post)
    }

    fn put_sub_type(&mut self, sub: LogisticsSubType) -> &mut Self {
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        self
    }
}

impl Operation for PrintTradeDocument {
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
        self.content.require(ALL_PAY_LOGISTICS_ID)
    }
}

/// Print shipping documents for C2C store pickup orders.
///
/// Each carrier has its own endpoint, chosen when the sub type is assigned.
/// 7-ELEVEN identifies orders by payment and validation numbers, every other
/// carrier by `AllPayLogisticsID`.
#[derive(Debug, Clone)]
pub struct PrintCvsDocument {
    content: Content,
}

impl PrintCvsDocument {
    const KIND: OperationKind = OperationKind::PrintCvsDocument;

    /// Create a new builder.
    pub fn new(cred: Credential) -> Self {
        Self {
            content: Content::new(cred, Self::KIND.default_path()),
        }
    }

    /// Set `LogisticsSubType` and the matching request path.
    pub fn set_logistics_sub_type(&mut self, sub: LogisticsSubType) -> Result<&mut Self> {
        let path = Self::KIND.request_path(sub)?;
        self.content.set(LOGISTICS_SUB_TYPE, sub);
        self.content.set_request_path(path);
        Ok(self)
    }

    /// Set `AllPayLogisticsID`.
    pub fn set_all_pay_logistics_id(&mut self, id: &str) -> &mut Self {
        self.content.set(ALL_PAY_LOGISTICS_ID, id);
        self
    }

    /// Set `AllPayLogisticsID` for a batch.
    pub fn set_all_pay_logistics_ids<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.set(ALL_PAY_LOGISTICS_ID, join(ids));
        self
    }

    /// Set `CVSPaymentNo`.
    pub fn set_cvs_payment_no(&mut self, no: &str) -> &mut Self {
        self.content.set("CVSPaymentNo", no);
        self
    }

    /// Set `CVSPaymentNo` for a batch.
    pub fn set_cvs_payment_nos<I, S>(&mut self, nos: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.set("CVSPaymentNo", join(nos));
        self
    }

    /// Set `CVSValidationNo`.
    pub fn set_cvs_validation_no(&mut self, no: &str) -> &mut Self {
        self.content.set("CVSValidationNo", no);
        self
    }

    /// Set `CVSValidationNo` for a batch.
    pub fn set_cvs_validation_nos<I, S>(&mut self, nos: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.set("CVSValidationNo", join(nos));
        self
    }

    /// Print 7-ELEVEN C2C documents.
    pub fn use_unimart_c2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::UnimartC2c)
    }

    /// Print FamilyMart C2C documents.
    pub fn use_fami_c2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::FamiC2c)
    }

    /// Print Hi-Life C2C documents.
    pub fn use_hilife_c2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::HilifeC2c)
    }

    /// Print OK Mart C2C documents.
    pub fn use_okmart_c2c(&mut self) -> &mut Self {
        self.put_accepted(LogisticsSubType::OkmartC2c)
    }

    /// Print a 7-ELEVEN C2C document identified by its payment and validation numbers.
    pub fn for_unimart(&mut self, payment_no: &str, validation_no: &str) -> &mut Self {
        self.use_unimart_c2c()
            .set_cvs_payment_no(payment_no)
            .set_cvs_validation_no(validation_no)
    }

    fn put_accepted(&mut self, sub: LogisticsSubType) -> &mut Self {
        if let Ok(path) = Self::KIND.request_path(sub) {
            self.content.set(LOGISTICS_SUB_TYPE, sub);
            self.content.set_request_path(path);
        }
        self
    }
}

impl Operation for PrintCvsDocument {
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
        c.require(LOGISTICS_SUB_TYPE)?;

        let sub = c
            .get(LOGISTICS_SUB_TYPE)
            .and_then(|v| v.to_string().parse::<LogisticsSubType>().ok());
        if sub == Some(LogisticsSubType::UnimartC2c) {
            c.require("CVSPaymentNo")?;
            c.require("CVSValidationNo")
        } else {
            c.require(ALL_PAY_LOGISTICS_ID)
        }
    }
}

fn join<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .collect::<Vec<String>>()
        .join(",")
}
