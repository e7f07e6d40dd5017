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

use crate::codec::pointer::{fill_shared, publish_arc, read_pointee, write_pointer, Pointee};
use crate::codec::Codec;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::resolver::ref_resolver::PointerKey;
use crate::types::{Category, Handle, PointerKind};
use std::sync::Arc;

impl<P: Pointee + ?Sized> Codec for Arc<P> {
    const CATEGORY: Category = Category::Pointer;

    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        let handle = s.get_or_assign_handle(Some(PointerKey::of_arc(self)));
        write_pointer(handle, &**self, s)
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let handle = d.read_handle()?;
        read_arc(handle, d)?
            .ok_or_else(|| Error::invalid_data("null handle for an Arc; use Option<Arc<_>>"))
    }

    fn write_option(value: Option<&Self>, s: &mut Serializer<'_>) -> Result<(), Error> {
        match value {
            None => s.write_handle(Handle::Null),
            Some(arc) => arc.write(s),
        }
    }

    fn read_option(d: &mut Deserializer<'_>) -> Result<Option<Self>, Error> {
        let handle = d.read_handle()?;
        read_arc(handle, d)
    }
}

/// Rebuild the `Arc` behind `handle`, aliasing the recorded owner for
/// back-references.
pub(crate) fn read_arc<P: Pointee + ?Sized>(
    handle: Handle,
    d: &mut Deserializer<'_>,
) -> Result<Option<Arc<P>>, Error> {
    match handle {
        Handle::Null => Ok(None),
        Handle::Flesh(_) => {
            let boxed = read_pointee::<P>(d)?;
            d.register_pointer(handle, PointerKind::Shared)?;
            if P::SHARED_FILL {
                // publish before filling so the payload can point back here
                let arc: Arc<P> = Arc::from(boxed);
                publish_arc(&arc, handle, d)?;
                fill_shared(&*arc, d)?;
                Ok(Some(arc))
            } else {
                Ok(Some(P::build_arc(boxed, handle, d)?))
            }
        }
        Handle::Reference(_) => Ok(Some(d.shared_owner::<Arc<P>>(handle)?)),
    }
}
