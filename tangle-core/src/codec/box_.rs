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

use crate::codec::pointer::{fill, read_pointee, write_pointer, Pointee};
use crate::codec::Codec;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::types::{Category, Handle, PointerKind};

/// A box is the sole owner of its pointee, so it always takes a fresh id
/// and never appears as a `Reference`.
impl<P: Pointee + ?Sized> Codec for Box<P> {
    const CATEGORY: Category = Category::Pointer;

    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        let handle = s.next_unique_handle();
        write_pointer(handle, &**self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let handle = d.read_handle()?;
        read_box(handle, d)?
            .ok_or_else(|| Error::invalid_data("null handle for a Box; use Option<Box<_>>"))
    }

    fn write_option(value: Option<&Self>, s: &mut Serializer<'_>) -> Result<(), Error> {
        match value {
            None => s.write_handle(Handle::Null),
            Some(boxed) => boxed.write(s),
        }
    }

    fn read_option(d: &mut Deserializer<'_>) -> Result<Option<Self>, Error> {
        let handle = d.read_handle()?;
        read_box(handle, d)
    }
}

fn read_box<P: Pointee + ?Sized>(
    handle: Handle,
    d: &mut Deserializer<'_>,
) -> Result<Option<Box<P>>, Error> {
    match handle {
        Handle::Null => Ok(None),
        Handle::Flesh(_) => {
            let mut boxed = read_pointee::<P>(d)?;
            d.register_pointer(handle, PointerKind::Unique)?;
            fill(&mut *boxed, d)?;
            Ok(Some(boxed))
        }
        Handle::Reference(id) => {
            // surfaces UnknownHandle for ids never written
            let kind = d.resolve_handle(handle)?;
            Err(Error::ownership_conflict(format!(
                "Box cannot alias handle {} already owned by a {:?} pointer",
                id, kind
            )))
        }
    }
}
