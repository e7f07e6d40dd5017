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

use crate::codec::collection::{read_entries, write_entries};
use crate::codec::{Codec, Object};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

impl<K: Codec + Eq + Hash, V: Codec> Codec for HashMap<K, V> {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        write_entries(self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut map = HashMap::new();
        read_entries(d, |key, value| {
            map.insert(key, value);
        })?;
        Ok(map)
    }

    crate::shared_object_views!();
}

impl<K: Codec + Ord, V: Codec> Codec for BTreeMap<K, V> {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        write_entries(self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut map = BTreeMap::new();
        read_entries(d, |key, value| {
            map.insert(key, value);
        })?;
        Ok(map)
    }

    crate::shared_object_views!();
}

impl<K: Codec + Eq + Hash, V: Codec> Object for HashMap<K, V> {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}

impl<K: Codec + Ord, V: Codec> Object for BTreeMap<K, V> {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}
