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

//! `RefCell<T>` as a pointee, the usual way to build cyclic `Rc` graphs.
//!
//! The cell is transparent on the wire: its payload is the payload of `T`
//! and its name is the name of `T`. Because the cell can be filled through a
//! shared `Rc`, it is published to the handle table before its payload is
//! read.

use crate::codec::pointer::{expect_sized_name, sized_name, Pointee};
use crate::codec::Codec;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::resolver::type_registry::TypeRegistry;
use std::cell::RefCell;

impl<T: Codec + Default> Pointee for RefCell<T> {
    const SHARED_FILL: bool = true;

    fn pointee_name<'r>(&self, registry: &'r TypeRegistry) -> &'r str {
        sized_name::<T>(registry)
    }

    fn write_payload(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        let value = self
            .try_borrow()
            .map_err(|_| Error::not_allowed("RefCell is mutably borrowed during serialization"))?;
        value.write(s)
    }

    fn instantiate(name: &str, d: &mut Deserializer<'_>) -> Result<Box<Self>, Error> {
        expect_sized_name::<T>(name, d.registry())?;
        Ok(Box::new(RefCell::new(T::default())))
    }

    fn read_payload(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        self.get_mut().read_in_place(d)
    }

    fn read_payload_shared(&self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        let mut value = self
            .try_borrow_mut()
            .map_err(|_| Error::not_allowed("RefCell is borrowed while being decoded"))?;
        value.read_in_place(d)
    }
}
