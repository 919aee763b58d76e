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

use ecpay_logistics::notify::from_form;
use ecpay_logistics::notify::FAILURE_CODES;
use ecpay_logistics::notify::FORWARD_SUCCESS_CODES;
use ecpay_logistics::notify::PROCESSING_CODES;
use ecpay_logistics::CheckMacEncoder;
use ecpay_logistics::LogisticsNotify;
use ecpay_logistics::NotifyHandler;
use ecpay_logistics::Response;
use ecpay_logistics::ReverseLogisticsNotify;
use ecpay_logistics_core::Payload;
use http::StatusCode;
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{credential, init, HASH_IV, HASH_KEY};

fn signed_body(fields: &[(&str, &str)]) -> String {
    let payload = CheckMacEncoder::new(HASH_KEY, HASH_IV)
        .unwrap()
        .encode_payload(fields.iter().copied().collect());
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(payload.iter().map(|(k, v)| (k, v.to_string())))
        .finish()
}

#[test]
fn test_form_reply() {
    init();

    let resp = Response::new("RtnCode=1&RtnMsg=OK&AllPayLogisticsID=123456");
    assert!(resp.is_success());
    assert_eq!(resp.rtn_code(), "1");
    assert_eq!(resp.all_pay_logistics_id(), "123456");
}

#[test]
fn test_empty_reply() {
    let resp = Response::new("");
    assert!(resp.has_parse_error());
    assert!(resp.parse_error().is_some());
    assert!(resp.data().is_empty());
}

#[test_case("1", true)]
#[test_case("300", true)]
#[test_case("0", false)]
#[test_case("2030", false)]
fn test_reply_success_codes(code: &str, success: bool) {
    let resp = Response::new(format!("RtnCode={code}&RtnMsg=x"));
    assert_eq!(resp.is_success(), success);
}

#[test]
fn test_signed_create_reply_verifies() {
    let body = format!(
        "1|{}",
        signed_body(&[
            ("MerchantID", "2000132"),
            ("MerchantTradeNo", "CVS0001"),
            ("RtnCode", "300"),
            ("RtnMsg", "訂單處理中"),
            ("AllPayLogisticsID", "1718546"),
            ("CVSPaymentNo", "C9876543"),
            ("CVSValidationNo", "1234"),
        ])
    );

    let mut resp = Response::with_encoder(body, CheckMacEncoder::from_credential(&credential()).unwrap());
    assert_eq!(resp.status_prefix(), Some("1"));
    assert!(resp.is_success());
    assert_eq!(resp.rtn_msg(), "訂單處理中");
    assert_eq!(resp.cvs_payment_no(), "C9876543");
    assert_eq!(resp.merchant_trade_no(), "CVS0001");
    assert!(resp.verify());
    assert!(resp.verify_or_fail().is_ok());
}

#[test]
fn test_notification_round_trip() {
    init();

    let body = signed_body(&[
        ("MerchantID", "2000132"),
        ("MerchantTradeNo", "CVS0001"),
        ("RtnCode", "2067"),
        ("RtnMsg", "消費者成功取件"),
        ("AllPayLogisticsID", "1718546"),
        ("LogisticsType", "CVS"),
        ("LogisticsSubType", "UNIMARTC2C"),
        ("GoodsAmount", "250"),
        ("UpdateStatusDate", "2024/01/02 03:04:05"),
        ("ReceiverName", "王小明"),
        ("ReceiverCellPhone", "0944555666"),
    ]);

    let mut notify = LogisticsNotify::from_credential(&credential()).unwrap();
    let resp = notify.respond(&body);
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), "1|OK");

    assert!(notify.is_verified());
    assert!(notify.is_success());
    assert_eq!(notify.logistics_sub_type(), "UNIMARTC2C");
    assert_eq!(notify.goods_amount(), 250);
    assert_eq!(notify.receiver_name(), "王小明");
    assert_eq!(notify.update_status_date(), "2024/01/02 03:04:05");
}

#[test]
fn test_forged_notification_is_rejected() {
    let body = signed_body(&[("RtnCode", "300"), ("AllPayLogisticsID", "1718546")])
        .replace("1718546", "9999999");

    let mut notify = LogisticsNotify::new(HASH_KEY, HASH_IV).unwrap();
    let resp = notify.respond(&body);
    assert!(resp.status().is_client_error());
    assert!(!notify.is_verified());
}

#[test]
fn test_success_response_is_constant() {
    let notify = LogisticsNotify::new(HASH_KEY, HASH_IV).unwrap();
    let reverse = ReverseLogisticsNotify::new(HASH_KEY, HASH_IV).unwrap();
    assert_eq!(notify.success_response(), "1|OK");
    assert_eq!(reverse.success_response(), "1|OK");
}

#[test]
fn test_success_codes_are_never_processing_or_failure() {
    let mut notify = LogisticsNotify::new(HASH_KEY, HASH_IV).unwrap();
    for code in FORWARD_SUCCESS_CODES {
        notify.verify(from_form(&signed_body(&[("RtnCode", *code)])));
        assert!(notify.is_success(), "{code}");
        assert!(!notify.is_processing(), "{code}");
        assert!(!notify.is_failure(), "{code}");
    }
    for code in PROCESSING_CODES {
        notify.verify(from_form(&signed_body(&[("RtnCode", *code)])));
        assert!(notify.is_processing(), "{code}");
        assert!(!notify.is_success(), "{code}");
    }
    for code in FAILURE_CODES {
        notify.verify(from_form(&signed_body(&[("RtnCode", *code)])));
        assert!(notify.is_failure(), "{code}");
        assert!(!notify.is_success(), "{code}");
    }
}

#[test]
fn test_from_form_decodes_values() {
    let data: Payload = from_form("RtnMsg=%E6%88%90%E5%8A%9F&Remark=a+b&=skipped");
    assert_eq!(data.len(), 2);
    assert_eq!(data.get_str("RtnMsg"), Some("成功".to_string()));
    assert_eq!(data.get_str("Remark"), Some("a b".to_string()));
}
