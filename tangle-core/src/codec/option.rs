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
use crate::types::Category;

// Encoding is chosen by the inner codec: pointers reuse their Null handle.
impl<T: Codec> Codec for Option<T> {
    const CATEGORY: Category = match T::CATEGORY {
        Category::Pointer => Category::Pointer,
        _ => Category::Object,
    };

    #[inline(always)]
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        T::write_option(self.as_ref(), s)
    }

    #[inline(always)]
    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        T::read_option(d)
    }

    crate::shared_object_views!();
}

impl<T: Codec> Object for Option<T> {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}
