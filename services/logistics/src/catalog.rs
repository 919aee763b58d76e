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

//! Identifier based construction of operations.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use ecpay_logistics_core::Credential;
use ecpay_logistics_core::Error;
use ecpay_logistics_core::Result;
use log::debug;

use crate::check_mac::CheckMacEncoder;
use crate::config::Config;
use crate::constants::STAGE_SERVER_URL;
use crate::content::AsAny;
use crate::operation::OperationKind;
use crate::Operation;

type Constructor = Arc<dyn Fn(Credential) -> Box<dyn Operation> + Send + Sync>;
type Initializer = Arc<dyn Fn(&mut dyn Operation) + Send + Sync>;

/// Builds operations by identifier, seeded with shared credentials.
///
/// Every built-in operation is registered under its
/// [`OperationKind::identifier`]. More can be added with
/// [`OperationCatalog::register`] and [`OperationCatalog::alias`].
///
/// ```
/// use ecpay_logistics::{CreateCvsOrder, OperationCatalog};
/// use ecpay_logistics_core::Credential;
///
/// let catalog = OperationCatalog::new(Credential::new("2000132", "5294y06JbISpM5x9", "v77hoKGq4kWxNNIS"));
/// let op = catalog.make("cvs.create").unwrap();
/// assert!(op.is::<CreateCvsOrder>());
/// ```
#[derive(Clone)]
pub struct OperationCatalog {
    credential: Credential,
    server_url: String,
    constructors: HashMap<String, Constructor>,
    aliases: HashMap<String, String>,
    initializers: Vec<Initializer>,
}

impl Debug for OperationCatalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut identifiers = self.constructors.keys().collect::<Vec<_>>();
        identifiers.sort();

        f.debug_struct("OperationCatalog")
            .field("credential", &self.credential)
            .field("server_url", &self.server_url)
            .field("identifiers", &identifiers)
            .field("aliases", &self.aliases)
            .field("initializers", &self.initializers.len())
            .finish()
    }
}

impl OperationCatalog {
    /// Create a catalog with every built-in operation registered.
    pub fn new(credential: Credential) -> Self {
        let mut catalog = Self {
            credential,
            server_url: STAGE_SERVER_URL.to_string(),
            constructors: HashMap::new(),
            aliases: HashMap::new(),
            initializers: Vec::new(),
        };
        for kind in OperationKind::ALL {
            let kind = *kind;
            catalog.register(kind.identifier(), move |cred| kind.build(cred));
        }
        catalog
    }

    /// Create a catalog from config.
    ///
    /// Configured reply urls and platform id are injected into every
    /// operation the catalog makes.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut catalog = Self::new(config.credential()?);
        catalog.set_server_url(&config.server_url());

        let server_reply_url = config.server_reply_url.clone();
        let client_reply_url = config.client_reply_url.clone();
        let platform_id = config.platform_id.clone();
        if server_reply_url.is_some() || client_reply_url.is_some() || platform_id.is_some() {
            catalog.add_initializer(move |op| {
                let content = op.content_mut();
                if let Some(url) = &server_reply_url {
                    content.set_server_reply_url(url);
                }
                if let Some(url) = &client_reply_url {
                    content.set_client_reply_url(url);
                }
                if let Some(id) = &platform_id {
                    content.set_platform_id(id);
                }
            });
        }
        Ok(catalog)
    }

    /// Register a constructor under an identifier, replacing any previous one.
    pub fn register<F>(&mut self, identifier: &str, constructor: F) -> &mut Self
    where
        F: Fn(Credential) -> Box<dyn Operation> + Send + Sync + 'static,
    {
        let identifier = normalize(identifier);
        self.aliases.remove(&identifier);
        self.constructors.insert(identifier, Arc::new(constructor));
        self
    }

    /// Make `identifier` resolve to an already registered `target`.
    pub fn alias(&mut self, identifier: &str, target: &str) -> Result<&mut Self> {
        let target = self.resolve(target)?;
        self.aliases.insert(normalize(identifier), target);
        Ok(self)
    }

    /// Run `hook` on every operation right after it is made.
    pub fn add_initializer<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut dyn Operation) + Send + Sync + 'static,
    {
        self.initializers.push(Arc::new(hook));
        self
    }

    /// Returns true if the identifier resolves to an operation.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_ok()
    }

    /// Make a fresh operation.
    ///
    /// Identifiers are trimmed and compared case-insensitively.
    pub fn make(&self, identifier: &str) -> Result<Box<dyn Operation>> {
        let key = self.resolve(identifier)?;
        let constructor = self.constructors.get(&key).ok_or_else(|| {
            Error::config_invalid(format!("operation {identifier:?} is not registered"))
        })?;

        let mut op = constructor(self.credential.clone());
        op.content_mut().set_server_url(&self.server_url);
        for hook in &self.initializers {
            hook(&mut *op);
        }
        debug!("catalog made {} for {key:?}", op.name());
        Ok(op)
    }

    /// Make a fresh operation of a known type.
    pub fn make_as<T: Operation>(&self, identifier: &str) -> Result<Box<T>> {
        let op = self.make(identifier)?;
        let name = op.name();
        AsAny::into_any(op).downcast::<T>().map_err(|_| {
            Error::config_invalid(format!(
                "operation {identifier:?} builds {name}, not {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// The credential seeded into every operation.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Replace the credential.
    pub fn set_credential(&mut self, credential: Credential) -> &mut Self {
        self.credential = credential;
        self
    }

    /// Server base url seeded into every operation.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Replace the server base url.
    pub fn set_server_url(&mut self, url: &str) -> &mut Self {
        self.server_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Encoder for the catalog's credential.
    pub fn encoder(&self) -> Result<CheckMacEncoder> {
        CheckMacEncoder::from_credential(&self.credential)
    }

    fn resolve(&self, identifier: &str) -> Result<String> {
        let key = normalize(identifier);
        let key = self.aliases.get(&key).cloned().unwrap_or(key);
        if self.constructors.contains_key(&key) {
            Ok(key)
        } else {
            Err(Error::config_invalid(format!(
                "unknown operation {identifier:?}"
            )))
        }
    }
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::*;
    use ecpay_logistics_core::ErrorKind;
    use pretty_assertions::assert_eq;

    fn catalog() -> OperationCatalog {
        OperationCatalog::new(Credential::new(
            "2000132",
            "5294y06JbISpM5x9",
            "v77hoKGq4kWxNNIS",
        ))
    }

    #[test]
    fn test_make_every_builtin() {
        let catalog = catalog();
        for kind in OperationKind::ALL {
            let op = catalog.make(kind.identifier()).unwrap();
            assert_eq!(op.name(), kind.name());
            assert_eq!(op.content().merchant_id(), "2000132");
        }
    }

    #[test]
    fn test_identifier_is_normalized() {
        let op = catalog().make("  CVS.Create ").unwrap();
        assert!(op.is::<CreateCvsOrder>());
    }

    #[test]
    fn test_unknown_identifier() {
        let err = catalog().make("cvs.teleport").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_alias() {
        let mut catalog = catalog();
        catalog.alias("map", "store_map").unwrap();
        assert!(catalog.make("MAP").unwrap().is::<OpenStoreMap>());

        let err = catalog.alias("nowhere", "missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_register_custom() {
        let mut catalog = catalog();
        catalog.register("cvs.create.fami", |cred| {
            let mut op = CreateCvsOrder::new(cred);
            op.use_fami_c2c();
            Box::new(op)
        });

        let op = catalog.make_as::<CreateCvsOrder>("cvs.create.fami").unwrap();
        assert_eq!(
            op.content().get("LogisticsSubType").map(|v| v.to_string()),
            Some("FAMIC2C".to_string())
        );
    }

    #[test]
    fn test_make_as_wrong_type() {
        let err = catalog().make_as::<CreateHomeOrder>("cvs.create").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_initializer_and_server_url() {
        let mut catalog = catalog();
        catalog
            .set_server_url("https://logistics.ecpay.com.tw/")
            .add_initializer(|op| {
                op.content_mut().set_server_reply_url("https://example.com/notify");
            });

        let op = catalog.make("queries.order").unwrap();
        assert_eq!(
            op.action_url(),
            "https://logistics.ecpay.com.tw/Helper/QueryLogisticsTradeInfo/V4"
        );
        assert_eq!(
            op.content().get("ServerReplyURL").map(|v| v.to_string()),
            Some("https://example.com/notify".to_string())
        );
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            merchant_id: Some("2000132".to_string()),
            hash_key: Some("5294y06JbISpM5x9".to_string()),
            hash_iv: Some("v77hoKGq4kWxNNIS".to_string()),
            platform_id: Some("3002607".to_string()),
            client_reply_url: Some("https://example.com/back".to_string()),
            ..Default::default()
        };
        let catalog = OperationCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.server_url(), STAGE_SERVER_URL);

        let op = catalog.make("store_map").unwrap();
        let fields = op.content().fields();
        assert_eq!(fields.get_str("PlatformID"), Some("3002607".to_string()));
        assert_eq!(
            fields.get_str("ClientReplyURL"),
            Some("https://example.com/back".to_string())
        );
        assert!(!fields.contains_key("ServerReplyURL"));
        assert!(catalog.encoder().is_ok());
    }

    #[test]
    fn test_from_config_without_credential() {
        let err = OperationCatalog::from_config(&Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
