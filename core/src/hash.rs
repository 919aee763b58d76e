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


//! Hash related utils.

/// Upper-case hex encoded MD5 hash.
///
/// CheckMacValue is always rendered as 32 upper-case hex characters, use
/// this function instead of `hex::encode_upper(md5(content))` to keep the
/// casing in one place.
pub fn hex_md5_upper(content: &[u8]) -> String {
    hex::encode_upper(md5::compute(content).as_ref())
}

/// Compare two hex digests ignoring ASCII case.
pub fn hex_eq_ignore_case(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.eq_ignore_ascii_case(b)
}
