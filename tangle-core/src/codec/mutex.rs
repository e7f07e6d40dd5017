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

//! `Mutex<T>` and `RwLock<T>` as pointees, the `Arc` counterpart of
//! `RefCell`. Transparent on the wire like `RefCell`.
//!
//! Locks are taken with `try_lock` / `try_read` / `try_write`: a graph
//! that points back into a locked value would otherwise deadlock.

use crate::codec::pointer::{expect_sized_name, sized_name, Pointee};
use crate::codec::Codec;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::resolver::type_registry::TypeRegistry;
use std::sync::{Mutex, RwLock, TryLockError};

fn lock_error<G>(what: &'static str, err: TryLockError<G>) -> Error {
    match err {
        TryLockError::Poisoned(_) => Error::not_allowed(format!("{} is poisoned", what)),
        TryLockError::WouldBlock => Error::not_allowed(format!("{} is already locked", what)),
    }
}

impl<T: Codec + Default> Pointee for Mutex<T> {
    const SHARED_FILL: bool = true;

    fn pointee_name<'r>(&self, registry: &'r TypeRegistry) -> &'r str {
        sized_name::<T>(registry)
    }

    fn write_payload(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        let guard = self.try_lock().map_err(|e| lock_error("Mutex", e))?;
        guard.write(s)
    }

    fn instantiate(name: &str, d: &mut Deserializer<'_>) -> Result<Box<Self>, Error> {
        expect_sized_name::<T>(name, d.registry())?;
        Ok(Box::new(Mutex::new(T::default())))
    }

    fn read_payload(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        let value = self
            .get_mut()
            .map_err(|_| Error::not_allowed("Mutex is poisoned"))?;
        value.read_in_place(d)
    }

    fn read_payload_shared(&self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        let mut guard = self.try_lock().map_err(|e| lock_error("Mutex", e))?;
        guard.read_in_place(d)
    }
}

impl<T: Codec + Default> Pointee for RwLock<T> {
    const SHARED_FILL: bool = true;

    fn pointee_name<'r>(&self, registry: &'r TypeRegistry) -> &'r str {
        sized_name::<T>(registry)
    }

    fn write_payload(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        let guard = self.try_read().map_err(|e| lock_error("RwLock", e))?;
        guard.write(s)
    }

    fn instantiate(name: &str, d: &mut Deserializer<'_>) -> Result<Box<Self>, Error> {
        expect_sized_name::<T>(name, d.registry())?;
        Ok(Box::new(RwLock::new(T::default())))
    }

    fn read_payload(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        let value = self
            .get_mut()
            .map_err(|_| Error::not_allowed("RwLock is poisoned"))?;
        value.read_in_place(d)
    }

    fn read_payload_shared(&self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        let mut guard = self.try_write().map_err(|e| lock_error("RwLock", e))?;
        guard.read_in_place(d)
    }
}
