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


//! Core components for signing ECPay logistics API requests.
//!
//! This crate provides the foundational types shared by the logistics signer.
//!
//! ## Overview
//!
//! - **Payload**: an ordered map of wire field names to scalar values
//! - **Credential**: MerchantID plus the HashKey / HashIV pair used for CheckMacValue
//! - **Context**: a container holding implementations for HTTP sending and environment access
//! - **Error**: a single error type whose [`ErrorKind`] tells callers which stage failed
//!
//! ## Utilities
//!
//! - [`hash`]: MD5 digest helpers
//! - [`utils`]: secret redaction for logs and `Debug` output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod credential;
pub use credential::Credential;

mod error;
pub use error::{Error, ErrorKind, Result};

mod payload;
pub use payload::{Payload, Value};
