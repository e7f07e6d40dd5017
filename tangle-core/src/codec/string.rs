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

use crate::codec::{object_via_codec, Codec};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};

// u32 byte length, then UTF-8 bytes
impl Codec for String {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        s.write_len(self.len())?;
        s.write(self.as_bytes())
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let len = d.read_len()?;
        d.ensure_remaining(len)?;
        let mut bytes = vec![0u8; len];
        d.read(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| Error::invalid_data(format!("invalid utf-8: {}", e)))
    }

    crate::shared_object_views!();
}

object_via_codec!(String);
