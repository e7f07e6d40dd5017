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

/// Configuration for a [`Tangle`](crate::tangle::Tangle) instance.
///
/// Copied into every session the instance opens, so both directions apply
/// the same limits.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of nested pointer payloads in one session.
    pub max_depth: u32,
    /// Whether `deserialize` rejects bytes left over after the root value.
    pub check_trailing_bytes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 256,
            check_trailing_bytes: true,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline(always)]
    pub fn is_check_trailing_bytes(&self) -> bool {
        self.check_trailing_bytes
    }
}
