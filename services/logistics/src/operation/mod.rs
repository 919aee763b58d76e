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

//! Builders for every logistics API operation.

use std::fmt;

use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Result;

use crate::constants::LOGISTICS_SUB_TYPE;
use crate::parameter::LogisticsSubType;
use crate::Content;
use crate::Operation;

mod cvs;
pub use cvs::CancelCvsOrder;
pub use cvs::CreateCvsOrder;
pub use cvs::ReturnCvsOrder;
pub use cvs::UpdateCvsOrder;

mod home;
pub use home::CreateHomeOrder;
pub use home::ReturnHomeOrder;

mod print;
pub use print::PrintCvsDocument;
pub use print::PrintTradeDocument;

mod query;
pub use query::GetStoreList;
pub use query::QueryLogisticsOrder;

mod store_map;
pub use store_map::OpenStoreMap;

/// The built-in operations.
///
/// Each kind owns its catalog identifier, the sub types it accepts and the
/// request path every accepted sub type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Open the store picker map.
    OpenStoreMap,
    /// Create a store pickup order.
    CreateCvsOrder,
    /// Update a store pickup order.
    UpdateCvsOrder,
    /// Cancel a 7-ELEVEN C2C order.
    CancelCvsOrder,
    /// Return a B2C store pickup order.
    ReturnCvsOrder,
    /// Create a home delivery order.
    CreateHomeOrder,
    /// Return a home delivery order.
    ReturnHomeOrder,
    /// Query a logistics order.
    QueryLogisticsOrder,
    /// List stores.
    GetStoreList,
    /// Print B2C and home delivery documents.
    PrintTradeDocument,
    /// Print C2C documents.
    PrintCvsDocument,
}

impl OperationKind {
    /// Every built-in operation.
    pub const ALL: &'static [OperationKind] = &[
        OperationKind::OpenStoreMap,
        OperationKind::CreateCvsOrder,
        OperationKind::UpdateCvsOrder,
        OperationKind::CancelCvsOrder,
        OperationKind::ReturnCvsOrder,
        OperationKind::CreateHomeOrder,
        OperationKind::ReturnHomeOrder,
        OperationKind::QueryLogisticsOrder,
        OperationKind::GetStoreList,
        OperationKind::PrintTradeDocument,
        OperationKind::PrintCvsDocument,
    ];

    /// Catalog identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            OperationKind::OpenStoreMap => "store_map",
            OperationKind::CreateCvsOrder => "cvs.create",
            OperationKind::UpdateCvsOrder => "cvs.update",
            OperationKind::CancelCvsOrder => "cvs.cancel",
            OperationKind::ReturnCvsOrder => "cvs.return",
            OperationKind::CreateHomeOrder => "home.create",
            OperationKind::ReturnHomeOrder => "home.return",
            OperationKind::QueryLogisticsOrder => "queries.order",
            OperationKind::GetStoreList => "queries.store_list",
            OperationKind::PrintTradeDocument => "printing.trade",
            OperationKind::PrintCvsDocument => "printing.cvs",
        }
    }

    /// Builder name.
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::OpenStoreMap => "OpenStoreMap",
            OperationKind::CreateCvsOrder => "CreateCvsOrder",
            OperationKind::UpdateCvsOrder => "UpdateCvsOrder",
            OperationKind::CancelCvsOrder => "CancelCvsOrder",
            OperationKind::ReturnCvsOrder => "ReturnCvsOrder",
            OperationKind::CreateHomeOrder => "CreateHomeOrder",
            OperationKind::ReturnHomeOrder => "ReturnHomeOrder",
            OperationKind::QueryLogisticsOrder => "QueryLogisticsOrder",
            OperationKind::GetStoreList => "GetStoreList",
            OperationKind::PrintTradeDocument => "PrintTradeDocument",
            OperationKind::PrintCvsDocument => "PrintCvsDocument",
        }
    }

    /// Request path used before any sub type is assigned.
    pub fn default_path(&self) -> &'static str {
        match self {
            OperationKind::OpenStoreMap => "/Express/map",
            OperationKind::CreateCvsOrder => "/Express/Create",
            OperationKind::UpdateCvsOrder => "/Helper/UpdateShipmentInfo",
            OperationKind::CancelCvsOrder => "/Express/CancelC2COrder",
            OperationKind::ReturnCvsOrder => "/Express/ReturnCVS",
            OperationKind::CreateHomeOrder => "/Express/Create",
            OperationKind::ReturnHomeOrder => "/Express/ReturnHome",
            OperationKind::QueryLogisticsOrder => "/Helper/QueryLogisticsTradeInfo/V4",
            OperationKind::GetStoreList => "/Express/GetStoreList",
            OperationKind::PrintTradeDocument => "/helper/printTradeDocument",
            OperationKind::PrintCvsDocument => "/Express/PrintUniMartC2COrderInfo",
        }
    }

    /// Returns true if the operation accepts the sub type.
    pub fn accepts(&self, sub: LogisticsSubType) -> bool {
        use LogisticsSubType::*;

        match self {
            OperationKind::OpenStoreMap
            | OperationKind::CreateCvsOrder
            | OperationKind::UpdateCvsOrder
            | OperationKind::GetStoreList => sub.is_cvs(),
            OperationKind::CancelCvsOrder => sub == UnimartC2c,
            OperationKind::ReturnCvsOrder => sub.is_b2c(),
            OperationKind::CreateHomeOrder => sub.is_home(),
            OperationKind::ReturnHomeOrder => sub == Tcat,
            OperationKind::QueryLogisticsOrder => false,
            OperationKind::PrintTradeDocument => !sub.is_c2c(),
            OperationKind::PrintCvsDocument => sub.is_c2c(),
        }
    }

    /// Every sub type the operation accepts.
    pub fn compatible_sub_types(&self) -> Vec<LogisticsSubType> {
        LogisticsSubType::ALL
            .iter()
            .copied()
            .filter(|sub| self.accepts(*sub))
            .collect()
    }

    /// Request path for the sub type.
    ///
    /// Fails with an incompatible sub type error if the operation does not
    /// accept it.
    pub fn request_path(&self, sub: LogisticsSubType) -> Result<&'static str> {
        use LogisticsSubType::*;

        if !self.accepts(sub) {
            return Err(Error::incompatible_sub_type(
                self.name(),
                sub,
                &self.compatible_sub_types(),
            ));
        }

        let path = match (self, sub) {
            (OperationKind::ReturnCvsOrder, Unimart) => "/Express/ReturnUniMartCVS",
            (OperationKind::ReturnCvsOrder, Hilife) => "/Express/ReturnHiLifeCVS",
            (OperationKind::PrintCvsDocument, UnimartC2c) => "/Express/PrintUniMartC2COrderInfo",
            (OperationKind::PrintCvsDocument, FamiC2c) => "/Express/PrintFAMIC2COrderInfo",
            (OperationKind::PrintCvsDocument, HilifeC2c) => "/Express/PrintHILIFEC2COrderInfo",
            (OperationKind::PrintCvsDocument, OkmartC2c) => "/Express/PrintOKMARTC2COrderInfo",
            (kind, _) => kind.default_path(),
        };
        Ok(path)
    }

    /// Check the `LogisticsSubType` held by the content.
    ///
    /// A sub type written through the raw [`Content::set`] skips the typed
    /// setter, so it is checked here against the accepted set and against
    /// the request path it should have selected.
    pub fn check_sub_type(&self, content: &Content) -> Result<()> {
        let raw = match content.get(LOGISTICS_SUB_TYPE) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => return Ok(()),
        };

        let sub = raw.parse::<LogisticsSubType>()?;
        let path = self.request_path(sub)?;
        if path != content.request_path() {
            return Err(Error::invalid_field(
                LOGISTICS_SUB_TYPE,
                format!(
                    "{sub} is served by {path} but {} is posted to {}",
                    self.name(),
                    content.request_path()
                ),
            ));
        }
        Ok(())
    }

    /// Build a fresh operation seeded with the credential.
    pub fn build(&self, cred: Credential) -> Box<dyn Operation> {
        match self {
            OperationKind::OpenStoreMap => Box::new(OpenStoreMap::new(cred)),
            OperationKind::CreateCvsOrder => Box::new(CreateCvsOrder::new(cred)),
            OperationKind::UpdateCvsOrder => Box::new(UpdateCvsOrder::new(cred)),
            OperationKind::CancelCvsOrder => Box::new(CancelCvsOrder::new(cred)),
            OperationKind::ReturnCvsOrder => Box::new(ReturnCvsOrder::new(cred)),
            OperationKind::CreateHomeOrder => Box::new(CreateHomeOrder::new(cred)),
            OperationKind::ReturnHomeOrder => Box::new(ReturnHomeOrder::new(cred)),
            OperationKind::QueryLogisticsOrder => Box::new(QueryLogisticsOrder::new(cred)),
            OperationKind::GetStoreList => Box::new(GetStoreList::new(cred)),
            OperationKind::PrintTradeDocument => Box::new(PrintTradeDocument::new(cred)),
            OperationKind::PrintCvsDocument => Box::new(PrintCvsDocument::new(cred)),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
