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

use ecpay_logistics::parameter::LogisticsSubType;
use ecpay_logistics::*;
use ecpay_logistics_core::ErrorKind;
use ecpay_logistics_core::Result;
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{catalog, credential};

/// Fields that make each built-in operation valid on top of its defaults.
fn complete_fields(identifier: &str) -> &'static [(&'static str, &'static str)] {
    match identifier {
        "store_map" => &[
            ("MerchantTradeNo", "MAP0001"),
            ("ServerReplyURL", "https://example.com/store"),
        ],
        "cvs.create" => &[
            ("MerchantTradeNo", "CVS0001"),
            ("GoodsName", "Book"),
            ("SenderName", "Sender"),
            ("SenderCellPhone", "0911222333"),
            ("ReceiverName", "Receiver"),
            ("ReceiverCellPhone", "0944555666"),
            ("ReceiverStoreID", "131386"),
            ("ServerReplyURL", "https://example.com/notify"),
        ],
        "cvs.update" => &[
            ("AllPayLogisticsID", "1718546"),
            ("LogisticsSubType", "UNIMART"),
        ],
        "cvs.cancel" => &[
            ("AllPayLogisticsID", "1718546"),
            ("CVSPaymentNo", "F0012345"),
            ("CVSValidationNo", "1234"),
        ],
        "cvs.return" => &[
            ("AllPayLogisticsID", "1718546"),
            ("LogisticsSubType", "FAMI"),
            ("ServerReplyURL", "https://example.com/notify"),
        ],
        "home.create" => &[
            ("MerchantTradeNo", "HOME0001"),
            ("GoodsName", "Book"),
            ("SenderName", "Sender"),
            ("SenderCellPhone", "0911222333"),
            ("SenderZipCode", "100"),
            ("SenderAddress", "Taipei"),
            ("ReceiverName", "Receiver"),
            ("ReceiverCellPhone", "0944555666"),
            ("ReceiverZipCode", "300"),
            ("ReceiverAddress", "Hsinchu"),
            ("ServerReplyURL", "https://example.com/notify"),
        ],
        "home.return" => &[
            ("AllPayLogisticsID", "1718546"),
            ("SenderName", "Sender"),
            ("SenderCellPhone", "0911222333"),
            ("SenderZipCode", "100"),
            ("SenderAddress", "Taipei"),
            ("ReceiverName", "Receiver"),
            ("ReceiverCellPhone", "0944555666"),
            ("ReceiverZipCode", "300"),
            ("ReceiverAddress", "Hsinchu"),
            ("ServerReplyURL", "https://example.com/notify"),
        ],
        "queries.order" => &[("AllPayLogisticsID", "1718546")],
        "queries.store_list" => &[("LogisticsSubType", "UNIMARTC2C"), ("Keyword", "台北")],
        "printing.trade" => &[("AllPayLogisticsID", "1718546")],
        "printing.cvs" => &[
            ("LogisticsSubType", "UNIMARTC2C"),
            ("CVSPaymentNo", "C9876543"),
            ("CVSValidationNo", "1234"),
        ],
        _ => &[],
    }
}

fn complete(identifier: &str) -> Box<dyn Operation> {
    let mut op = catalog().make(identifier).unwrap();
    for (k, v) in complete_fields(identifier) {
        op.content_mut().set(k, *v);
    }
    op
}

#[test]
fn test_complete_operations_validate() {
    for kind in OperationKind::ALL {
        let op = complete(kind.identifier());
        op.validate()
            .unwrap_or_else(|err| panic!("{kind} must be valid: {err}"));

        let signed = op.signed_payload().unwrap();
        assert_eq!(signed.get_str("MerchantID"), Some("2000132".to_string()));
        assert_eq!(signed.keys().last(), Some("CheckMacValue"));
    }
}

#[test]
fn test_missing_merchant_id_is_reported_first() {
    for kind in OperationKind::ALL {
        let mut op = catalog().make(kind.identifier()).unwrap();
        op.content_mut().set_merchant_id("");

        let err = op.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed, "{kind}");
        assert_eq!(err.field(), Some("MerchantID"), "{kind}");
    }
}

#[test]
fn test_missing_secrets_fail_precondition() {
    for kind in OperationKind::ALL {
        let mut op = complete(kind.identifier());
        op.content_mut()
            .set_credential(ecpay_logistics_core::Credential::new("2000132", "", ""));

        let err = op.signed_payload().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed, "{kind}");
    }
}

#[test_case("store_map", "MerchantTradeNo", "MerchantTradeNo")]
#[test_case("store_map", "LogisticsType", "LogisticsType")]
#[test_case("store_map", "LogisticsSubType", "LogisticsSubType")]
#[test_case("store_map", "IsCollection", "IsCollection")]
#[test_case("store_map", "ServerReplyURL", "ServerReplyURL")]
#[test_case("cvs.create", "MerchantTradeNo", "MerchantTradeNo")]
#[test_case("cvs.create", "MerchantTradeDate", "MerchantTradeDate")]
#[test_case("cvs.create", "LogisticsSubType", "LogisticsSubType")]
#[test_case("cvs.create", "GoodsName", "GoodsName")]
#[test_case("cvs.create", "SenderName", "SenderName")]
#[test_case("cvs.create", "SenderCellPhone", "SenderPhone|SenderCellPhone")]
#[test_case("cvs.create", "ReceiverName", "ReceiverName")]
#[test_case("cvs.create", "ReceiverCellPhone", "ReceiverPhone|ReceiverCellPhone")]
#[test_case("cvs.create", "ReceiverStoreID", "ReceiverStoreID")]
#[test_case("cvs.create", "ServerReplyURL", "ServerReplyURL")]
#[test_case("cvs.update", "AllPayLogisticsID", "AllPayLogisticsID")]
#[test_case("cvs.update", "LogisticsSubType", "LogisticsSubType")]
#[test_case("cvs.cancel", "AllPayLogisticsID", "AllPayLogisticsID")]
#[test_case("cvs.cancel", "CVSPaymentNo", "CVSPaymentNo")]
#[test_case("cvs.cancel", "CVSValidationNo", "CVSValidationNo")]
#[test_case("cvs.return", "AllPayLogisticsID", "AllPayLogisticsID")]
#[test_case("cvs.return", "LogisticsSubType", "LogisticsSubType")]
#[test_case("cvs.return", "ServerReplyURL", "ServerReplyURL")]
#[test_case("home.create", "MerchantTradeNo", "MerchantTradeNo")]
#[test_case("home.create", "GoodsName", "GoodsName")]
#[test_case("home.create", "SenderZipCode", "SenderZipCode")]
#[test_case("home.create", "SenderAddress", "SenderAddress")]
#[test_case("home.create", "ReceiverCellPhone", "ReceiverPhone|ReceiverCellPhone")]
#[test_case("home.create", "ReceiverZipCode", "ReceiverZipCode")]
#[test_case("home.create", "ReceiverAddress", "ReceiverAddress")]
#[test_case("home.create", "ServerReplyURL", "ServerReplyURL")]
#[test_case("home.return", "AllPayLogisticsID", "AllPayLogisticsID")]
#[test_case("home.return", "SenderName", "SenderName")]
#[test_case("home.return", "ReceiverAddress", "ReceiverAddress")]
#[test_case("home.return", "ServerReplyURL", "ServerReplyURL")]
#[test_case("queries.order", "AllPayLogisticsID", "AllPayLogisticsID")]
#[test_case("queries.order", "TimeStamp", "TimeStamp")]
#[test_case("queries.store_list", "LogisticsSubType", "LogisticsSubType")]
#[test_case("queries.store_list", "Keyword", "Keyword|ZipCode|City")]
#[test_case("printing.trade", "AllPayLogisticsID", "AllPayLogisticsID")]
#[test_case("printing.cvs", "LogisticsSubType", "LogisticsSubType")]
#[test_case("printing.cvs", "CVSPaymentNo", "CVSPaymentNo")]
#[test_case("printing.cvs", "CVSValidationNo", "CVSValidationNo")]
fn test_missing_required_field(identifier: &str, removed: &str, expected: &str) {
    let mut op = complete(identifier);
    op.content_mut().remove(removed);

    let err = op.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(err.field(), Some(expected));
    assert!(op.signed_payload().is_err());
}

#[test]
fn test_blank_field_counts_as_missing() {
    let mut op = complete("cvs.create");
    op.content_mut().set("GoodsName", "");
    assert_eq!(op.validate().unwrap_err().field(), Some("GoodsName"));
}

#[test]
fn test_raw_sub_type_is_checked_by_validate() {
    let mut op = complete("cvs.create");
    op.validate().unwrap();

    op.content_mut().set("LogisticsSubType", "TCAT");
    let err = op.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleSubType);
    assert_eq!(err.field(), Some("LogisticsSubType"));
    assert!(op.signed_payload().is_err());
}

/// Assign a sub type through the typed setter of the operation.
fn assign(kind: OperationKind, sub: LogisticsSubType) -> Result<()> {
    let cred = credential();
    match kind {
        OperationKind::OpenStoreMap => OpenStoreMap::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::CreateCvsOrder => CreateCvsOrder::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::UpdateCvsOrder => UpdateCvsOrder::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::CancelCvsOrder => CancelCvsOrder::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::ReturnCvsOrder => ReturnCvsOrder::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::CreateHomeOrder => CreateHomeOrder::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::ReturnHomeOrder => ReturnHomeOrder::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::QueryLogisticsOrder => kind.request_path(sub).map(drop),
        OperationKind::GetStoreList => GetStoreList::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::PrintTradeDocument => PrintTradeDocument::new(cred).set_logistics_sub_type(sub).map(drop),
        OperationKind::PrintCvsDocument => PrintCvsDocument::new(cred).set_logistics_sub_type(sub).map(drop),
    }
}

#[test]
fn test_every_incompatible_pairing_is_rejected() {
    for kind in OperationKind::ALL {
        for sub in LogisticsSubType::ALL {
            let result = assign(*kind, *sub);
            if kind.accepts(*sub) {
                assert!(result.is_ok(), "{kind} must accept {sub}");
                continue;
            }

            let err = result.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IncompatibleSubType, "{kind} {sub}");
            assert_eq!(err.field(), Some("LogisticsSubType"));
            assert!(err.to_string().contains(sub.as_str()), "{err}");
        }
    }
}

#[test_case(OperationKind::CreateCvsOrder, LogisticsSubType::Tcat ; "home carrier on cvs create")]
#[test_case(OperationKind::CreateHomeOrder, LogisticsSubType::UnimartC2c ; "store carrier on home create")]
#[test_case(OperationKind::CancelCvsOrder, LogisticsSubType::FamiC2c ; "only unimart c2c can cancel")]
#[test_case(OperationKind::ReturnCvsOrder, LogisticsSubType::UnimartC2c ; "c2c has no cvs return")]
#[test_case(OperationKind::ReturnHomeOrder, LogisticsSubType::Post ; "only tcat handles home return")]
#[test_case(OperationKind::UpdateCvsOrder, LogisticsSubType::Post ; "home carrier has no store update")]
#[test_case(OperationKind::PrintTradeDocument, LogisticsSubType::OkmartC2c ; "c2c prints through cvs document")]
#[test_case(OperationKind::PrintCvsDocument, LogisticsSubType::Hilife ; "b2c prints through trade document")]
fn test_incompatible_pairing(kind: OperationKind, sub: LogisticsSubType) {
    let err = assign(kind, sub).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleSubType);
}

#[test]
fn test_rejected_sub_type_leaves_builder_untouched() {
    let mut op = CreateCvsOrder::new(credential());
    assert!(op.set_logistics_sub_type(LogisticsSubType::Post).is_err());
    assert_eq!(
        op.content().fields().get_str("LogisticsSubType"),
        Some("UNIMARTC2C".to_string())
    );
}

#[test_case(LogisticsSubType::Unimart, "/Express/ReturnUniMartCVS")]
#[test_case(LogisticsSubType::Hilife, "/Express/ReturnHiLifeCVS")]
#[test_case(LogisticsSubType::Fami, "/Express/ReturnCVS")]
#[test_case(LogisticsSubType::UnimartFreeze, "/Express/ReturnCVS")]
fn test_return_cvs_path_follows_carrier(sub: LogisticsSubType, path: &str) {
    let mut op = ReturnCvsOrder::new(credential());
    op.set_logistics_sub_type(sub).unwrap();
    assert_eq!(op.request_path(), path);
}

#[test_case(LogisticsSubType::UnimartC2c, "/Express/PrintUniMartC2COrderInfo")]
#[test_case(LogisticsSubType::FamiC2c, "/Express/PrintFAMIC2COrderInfo")]
#[test_case(LogisticsSubType::HilifeC2c, "/Express/PrintHILIFEC2COrderInfo")]
#[test_case(LogisticsSubType::OkmartC2c, "/Express/PrintOKMARTC2COrderInfo")]
fn test_print_cvs_path_follows_carrier(sub: LogisticsSubType, path: &str) {
    let mut op = PrintCvsDocument::new(credential());
    op.set_logistics_sub_type(sub).unwrap();
    assert_eq!(op.request_path(), path);
}

#[test]
fn test_overlong_fields_are_rejected_at_the_setter() {
    let mut op = CreateCvsOrder::new(credential());

    let err = op.set_merchant_trade_no(&"N".repeat(21)).unwrap_err();
    assert_eq!(err.field(), Some("MerchantTradeNo"));
    assert!(op.set_merchant_trade_no(&"N".repeat(20)).is_ok());

    let err = op.set_goods_name(&"貨".repeat(51)).unwrap_err();
    assert_eq!(err.field(), Some("GoodsName"));

    let err = op.set_receiver_name("王大明王大明王大明王大").unwrap_err();
    assert_eq!(err.field(), Some("ReceiverName"));
}

#[test]
fn test_store_map_form_action() {
    let mut op = catalog().make_as::<OpenStoreMap>("store_map").unwrap();
    op.set_merchant_trade_no("MAP0001")
        .unwrap()
        .set_server_reply_url("https://example.com/store");
    op.use_mobile_device();

    let form = op.form_action().unwrap();
    assert_eq!(form.action, "https://logistics-stage.ecpay.com.tw/Express/map");
    assert_eq!(form.fields.get_str("Device"), Some("1".to_string()));
    assert!(form.fields.contains_key("CheckMacValue"));
}
