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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use bytes::Bytes;
use ecpay_logistics::CheckMacEncoder;
use ecpay_logistics::Config;
use ecpay_logistics::CreateCvsOrder;
use ecpay_logistics::LogisticsClient;
use ecpay_logistics::Operation;
use ecpay_logistics::OperationCatalog;
use ecpay_logistics::QueryLogisticsOrder;
use ecpay_logistics::PRODUCTION_SERVER_URL;
use ecpay_logistics_core::Context;
use ecpay_logistics_core::ErrorKind;
use ecpay_logistics_core::HttpSend;
use ecpay_logistics_core::Payload;
use ecpay_logistics_core::Result;
use ecpay_logistics_core::StaticEnv;
use pretty_assertions::assert_eq;

use super::{init, HASH_IV, HASH_KEY, MERCHANT_ID};

/// Answers every request with a signed create reply and records what it saw.
#[derive(Debug, Clone, Default)]
struct MockServer {
    seen: Arc<Mutex<Vec<(String, Payload)>>>,
}

#[async_trait::async_trait]
impl HttpSend for MockServer {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let fields: Payload = form_urlencoded::parse(req.body())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let encoder = CheckMacEncoder::new(HASH_KEY, HASH_IV)?;
        let accepted = encoder.verify(&fields);
        let trade_no = fields.get_str("MerchantTradeNo").unwrap_or_default();
        self.seen
            .lock()
            .unwrap()
            .push((req.uri().to_string(), fields));

        let body = if accepted {
            let reply = encoder.encode_payload(Payload::from_iter([
                ("MerchantID", MERCHANT_ID.to_string()),
                ("MerchantTradeNo", trade_no),
                ("RtnCode", "300".to_string()),
                ("RtnMsg", "訂單處理中".to_string()),
                ("AllPayLogisticsID", "1718546".to_string()),
            ]));
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(reply.iter().map(|(k, v)| (k, v.to_string())))
                .finish();
            format!("1|{query}")
        } else {
            "0|CheckMacValue Error".to_string()
        };
        Ok(http::Response::new(Bytes::from(body)))
    }
}

fn context(server: MockServer) -> Context {
    let envs = [
        ("ECPAY_LOGISTICS_MERCHANT_ID", MERCHANT_ID),
        ("ECPAY_LOGISTICS_HASH_KEY", HASH_KEY),
        ("ECPAY_LOGISTICS_HASH_IV", HASH_IV),
        ("ECPAY_LOGISTICS_SERVER_REPLY_URL", "https://example.com/notify"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect::<HashMap<_, _>>();

    Context::new()
        .with_env(StaticEnv { envs })
        .with_http_send(server)
}

#[tokio::test]
async fn test_create_cvs_order_end_to_end() -> anyhow::Result<()> {
    init();

    let server = MockServer::default();
    let ctx = context(server.clone());
    let config = Config::from_env(&ctx);
    let catalog = OperationCatalog::from_config(&config)?;
    let client = LogisticsClient::new(ctx);

    let mut op = catalog.make("cvs.create")?;
    let order = op
        .downcast_mut::<CreateCvsOrder>()
        .expect("cvs.create must build a CreateCvsOrder");
    order.set_goods_name("測試商品")?;
    order.set_sender_name("寄件人")?;
    order.set_receiver_name("收件人")?;
    order
        .set_sender_cell_phone("0911222333")
        .set_receiver_cell_phone("0944555666")
        .set_receiver_store_id("131386")
        .use_fami_c2c()
        .with_collection(250);
    op.content_mut().set_merchant_trade_no("CVS0001")?;

    let mut resp = client.send_boxed(op).await?;
    assert_eq!(resp.status_prefix(), Some("1"));
    assert!(resp.is_success());
    assert_eq!(resp.all_pay_logistics_id(), "1718546");
    assert_eq!(resp.merchant_trade_no(), "CVS0001");
    assert!(resp.verify());

    let seen = server.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (uri, fields) = &seen[0];
    assert_eq!(uri, "https://logistics-stage.ecpay.com.tw/Express/Create");
    assert_eq!(fields.get_str("LogisticsSubType"), Some("FAMIC2C".to_string()));
    assert_eq!(fields.get_str("IsCollection"), Some("Y".to_string()));
    assert_eq!(fields.get_str("CollectionAmount"), Some("250".to_string()));
    assert_eq!(
        fields.get_str("ServerReplyURL"),
        Some("https://example.com/notify".to_string())
    );
    assert_eq!(fields.keys().last(), Some("CheckMacValue"));
    Ok(())
}

#[tokio::test]
async fn test_catalog_server_url_is_where_requests_go() -> anyhow::Result<()> {
    init();

    let server = MockServer::default();
    let ctx = context(server.clone());
    let mut catalog = OperationCatalog::from_config(&Config::from_env(&ctx))?;
    catalog.set_server_url(PRODUCTION_SERVER_URL);
    let client = LogisticsClient::new(ctx);

    let mut op = catalog.make_as::<QueryLogisticsOrder>("queries.order")?;
    op.set_all_pay_logistics_id("1718546");
    let action_url = op.action_url();
    client.send(*op).await?;

    let seen = server.seen.lock().unwrap();
    assert_eq!(
        action_url,
        "https://logistics.ecpay.com.tw/Helper/QueryLogisticsTradeInfo/V4"
    );
    assert_eq!(seen[0].0, action_url);
    Ok(())
}

#[tokio::test]
async fn test_invalid_operation_is_never_sent() {
    init();

    let server = MockServer::default();
    let ctx = context(server.clone());
    let config = Config::from_env(&ctx);
    let catalog = OperationCatalog::from_config(&config).unwrap();
    let client = LogisticsClient::new(ctx);

    let op = catalog.make("cvs.create").unwrap();
    let err = client.send_boxed(op).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(err.field(), Some("MerchantTradeNo"));
    assert!(server.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_transport_is_reported() {
    init();

    let client = LogisticsClient::new(Context::new());
    let mut op = super::catalog()
        .make_as::<QueryLogisticsOrder>("queries.order")
        .unwrap();
    op.set_all_pay_logistics_id("1718546");

    let err = client.send(*op).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
