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

use ecpay_logistics::sign;
use ecpay_logistics::CheckMacEncoder;
use ecpay_logistics_core::ErrorKind;
use ecpay_logistics_core::Payload;
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{init, HASH_IV, HASH_KEY};

#[test_case(&[("MerchantID", "2000132"), ("MerchantTradeNo", "TEST123"), ("LogisticsType", "CVS")], "504B6573243B94CF5302B6AE474B02BD" ; "create order fields")]
#[test_case(&[("MerchantID", "2000132"), ("MerchantTradeNo", "TEST123")], "804A51E88E4B9761C9B4B16A1F745E7D" ; "two fields")]
#[test_case(&[("RtnCode", "1"), ("RtnMsg", "OK")], "701285C2ADA1A83EC2E1E0DA37CD8CB6" ; "reply fields")]
#[test_case(&[("GoodsName", "測試 商品(1)*!"), ("MerchantID", "2000132")], "C64D104780C7C57A788A26B368616A62" ; "unicode and reserved characters")]
#[test_case(&[], "6421D45A6BCF3206F6E02E27219F84C4" ; "empty payload")]
fn test_known_vectors(fields: &[(&str, &str)], expected: &str) {
    init();

    let payload: Payload = fields.iter().copied().collect();
    assert_eq!(sign(&payload, HASH_KEY, HASH_IV).unwrap(), expected);
}

#[test]
fn test_field_order_does_not_matter() {
    let forward = Payload::from_iter([
        ("MerchantID", "2000132"),
        ("MerchantTradeNo", "TEST123"),
        ("LogisticsType", "CVS"),
    ]);
    let backward = Payload::from_iter([
        ("LogisticsType", "CVS"),
        ("MerchantTradeNo", "TEST123"),
        ("MerchantID", "2000132"),
    ]);
    assert_eq!(
        sign(&forward, HASH_KEY, HASH_IV).unwrap(),
        sign(&backward, HASH_KEY, HASH_IV).unwrap()
    );
}

#[test]
fn test_sign_then_verify() {
    init();

    let encoder = CheckMacEncoder::new(HASH_KEY, HASH_IV).unwrap();
    let payloads = [
        Payload::from_iter([("MerchantID", "2000132")]),
        Payload::from_iter([("ReceiverName", "王小明"), ("Remark", "a+b=c&d")]),
        Payload::from_iter([("GoodsAmount", "0"), ("EmptyField", "")]),
    ];

    for payload in payloads {
        let signed = encoder.encode_payload(payload.clone());
        assert_eq!(signed.keys().last(), Some("CheckMacValue"));
        assert_eq!(signed.len(), payload.len() + 1);
        assert!(encoder.verify(&signed));
        assert!(encoder.verify_or_fail(&signed).is_ok());
    }
}

#[test]
fn test_digest_is_sensitive_to_values() {
    let a = Payload::from_iter([("MerchantTradeNo", "TEST123")]);
    let b = Payload::from_iter([("MerchantTradeNo", "TEST124")]);
    assert_ne!(
        sign(&a, HASH_KEY, HASH_IV).unwrap(),
        sign(&b, HASH_KEY, HASH_IV).unwrap()
    );
}

#[test]
fn test_digest_is_sensitive_to_secrets() {
    let payload = Payload::from_iter([("MerchantTradeNo", "TEST123")]);
    assert_ne!(
        sign(&payload, HASH_KEY, HASH_IV).unwrap(),
        sign(&payload, HASH_IV, HASH_KEY).unwrap()
    );
}

#[test]
fn test_verify_rejects_missing_and_wrong_signature() {
    let encoder = CheckMacEncoder::new(HASH_KEY, HASH_IV).unwrap();

    let unsigned = Payload::from_iter([("RtnCode", "1"), ("RtnMsg", "OK")]);
    assert!(!encoder.verify(&unsigned));
    assert_eq!(
        encoder.verify_or_fail(&unsigned).unwrap_err().kind(),
        ErrorKind::SignatureMismatch
    );

    let mut signed = encoder.encode_payload(unsigned);
    signed.insert("RtnCode", "0");
    assert!(!encoder.verify(&signed));
}

#[test]
fn test_verify_ignores_digest_case() {
    let encoder = CheckMacEncoder::new(HASH_KEY, HASH_IV).unwrap();
    let payload = Payload::from_iter([
        ("RtnCode", "1"),
        ("RtnMsg", "OK"),
        ("CheckMacValue", "701285c2ada1a83ec2e1e0da37cd8cb6"),
    ]);
    assert!(encoder.verify(&payload));
}

#[test_case("", HASH_IV ; "empty key")]
#[test_case(HASH_KEY, "" ; "empty iv")]
fn test_empty_secrets_are_rejected(key: &str, iv: &str) {
    let err = sign(&Payload::new(), key, iv).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
}
