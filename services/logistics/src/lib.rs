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

//! ECPay logistics signer.
//!
//! Builds, signs and sends requests to the ECPay logistics API, and
//! verifies the replies and status callbacks it sends back.
//!
//! ```
//! use ecpay_logistics::{CreateCvsOrder, Operation};
//! use ecpay_logistics_core::Credential;
//!
//! let cred = Credential::new("2000132", "5294y06JbISpM5x9", "v77hoKGq4kWxNNIS");
//! let mut op = CreateCvsOrder::new(cred);
//! op.set_merchant_trade_no("TEST123").unwrap();
//! op.set_goods_name("Book").unwrap();
//! op.set_sender_name("Sender").unwrap();
//! op.set_receiver_name("Receiver").unwrap();
//! op.set_sender_cell_phone("0911222333")
//!     .set_receiver_cell_phone("0912345678")
//!     .set_receiver_store_id("131386")
//!     .with_collection(100)
//!     .set_server_reply_url("https://example.com/notify");
//!
//! let signed = op.signed_payload().unwrap();
//! assert!(signed.contains_key("CheckMacValue"));
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::PRODUCTION_SERVER_URL;
pub use constants::STAGE_SERVER_URL;

mod check_mac;
pub use check_mac::sign;
pub use check_mac::CheckMacEncoder;

pub mod parameter;

mod content;
pub use content::AsAny;
pub use content::Content;
pub use content::FormAction;
pub use content::Operation;

mod operation;
pub use operation::*;

mod config;
pub use config::Config;

mod catalog;
pub use catalog::OperationCatalog;

mod response;
pub use response::Response;

pub mod notify;
pub use notify::LogisticsNotify;
pub use notify::NotifyHandler;
pub use notify::ReverseLogisticsNotify;

mod client;
pub use client::LogisticsClient;
