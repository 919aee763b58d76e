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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values
pub const ECPAY_LOGISTICS_SERVER: &str = "ECPAY_LOGISTICS_SERVER";
pub const ECPAY_LOGISTICS_MERCHANT_ID: &str = "ECPAY_LOGISTICS_MERCHANT_ID";
pub const ECPAY_LOGISTICS_HASH_KEY: &str = "ECPAY_LOGISTICS_HASH_KEY";
pub const ECPAY_LOGISTICS_HASH_IV: &str = "ECPAY_LOGISTICS_HASH_IV";
pub const ECPAY_LOGISTICS_PLATFORM_ID: &str = "ECPAY_LOGISTICS_PLATFORM_ID";
pub const ECPAY_LOGISTICS_SERVER_REPLY_URL: &str = "ECPAY_LOGISTICS_SERVER_REPLY_URL";
pub const ECPAY_LOGISTICS_CLIENT_REPLY_URL: &str = "ECPAY_LOGISTICS_CLIENT_REPLY_URL";

/// Staging endpoint, used when no server is configured.
pub const STAGE_SERVER_URL: &str = "https://logistics-stage.ecpay.com.tw";
/// Production endpoint.
pub const PRODUCTION_SERVER_URL: &str = "https://logistics.ecpay.com.tw";

// Wire field names
pub const CHECK_MAC_VALUE: &str = "CheckMacValue";
pub const MERCHANT_ID: &str = "MerchantID";
pub const PLATFORM_ID: &str = "PlatformID";
pub const MERCHANT_TRADE_NO: &str = "MerchantTradeNo";
pub const MERCHANT_TRADE_DATE: &str = "MerchantTradeDate";
pub const SERVER_REPLY_URL: &str = "ServerReplyURL";
pub const CLIENT_REPLY_URL: &str = "ClientReplyURL";
pub const LOGISTICS_TYPE: &str = "LogisticsType";
pub const LOGISTICS_SUB_TYPE: &str = "LogisticsSubType";
pub const ALL_PAY_LOGISTICS_ID: &str = "AllPayLogisticsID";
pub const RTN_CODE: &str = "RtnCode";
pub const RTN_MSG: &str = "RtnMsg";
pub const RTN_MSG_E: &str = "RtnMsgE";

/// Maximum length of `MerchantTradeNo`, in characters.
pub const MERCHANT_TRADE_NO_MAX_LENGTH: usize = 20;
/// Maximum length of `GoodsName`, in characters.
pub const GOODS_NAME_MAX_LENGTH: usize = 50;
/// Maximum length of sender and receiver names on store-pickup orders.
pub const PERSON_NAME_MAX_LENGTH: usize = 10;

/// Wire format of `MerchantTradeDate`.
pub const TRADE_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
/// Wire format of date-only fields such as `ShipmentDate`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// AsciiSet matching PHP `urlencode`.
///
/// - Encode every byte except 'A'-'Z', 'a'-'z', '0'-'9', '-', '_' and '.'.
pub static PHP_URL_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// Percent sequences the provider leaves unescaped, applied after lower-casing.
pub const DOT_NET_REPLACEMENTS: [(&str, &str); 8] = [
    ("%2d", "-"),
    ("%5f", "_"),
    ("%2e", "."),
    ("%21", "!"),
    ("%2a", "*"),
    ("%28", "("),
    ("%29", ")"),
    ("%20", "+"),
];
