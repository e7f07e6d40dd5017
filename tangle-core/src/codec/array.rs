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

use crate::codec::{Codec, Object};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};

// No length prefix: N is known on both sides. Plain element types are one block.
impl<T: Codec, const N: usize> Codec for [T; N] {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        T::write_array(self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let items = T::read_array(N, d)?;
        let len = items.len();
        items.try_into().map_err(|_| {
            Error::invalid_data(format!("expected {} array elements, decoded {}", N, len))
        })
    }

    crate::shared_object_views!();
}

impl<T: Codec, const N: usize> Object for [T; N] {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}
