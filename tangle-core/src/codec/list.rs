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

use crate::codec::collection::{read_collection, write_collection};
use crate::codec::{Codec, Object};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use std::collections::{LinkedList, VecDeque};

// Vec goes through the array hooks so plain element types are copied as one block.
impl<T: Codec> Codec for Vec<T> {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        s.write_len(self.len())?;
        T::write_array(self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let len = d.read_len()?;
        T::read_array(len, d)
    }

    crate::shared_object_views!();
}

impl<T: Codec> Codec for VecDeque<T> {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        s.write_len(self.len())?;
        let (front, back) = self.as_slices();
        T::write_array(front, s)?;
        T::write_array(back, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let len = d.read_len()?;
        Ok(VecDeque::from(T::read_array(len, d)?))
    }

    crate::shared_object_views!();
}

impl<T: Codec> Codec for LinkedList<T> {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        write_collection(self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut list = LinkedList::new();
        read_collection(d, |item| list.push_back(item))?;
        Ok(list)
    }

    crate::shared_object_views!();
}

impl<T: Codec> Object for Vec<T> {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}

impl<T: Codec> Object for VecDeque<T> {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}

impl<T: Codec> Object for LinkedList<T> {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        Codec::write(self, s)
    }

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        Codec::read_in_place(self, d)
    }
}
