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

//! Pointee dispatch shared by every pointer codec.
//!
//! A pointer is written as its [`Handle`]. A `Flesh` handle is followed by
//! the pointee's type name (`u32` length, then the bytes) and its payload:
//!
//! ```text
//! | tag u8 | id u32 | name_len u32 | name bytes | payload |   Flesh
//! | tag u8 | id u32 |                                        Reference
//! | tag u8 |                                                 Null
//! ```
//!
//! On read the name picks the concrete type, the pointee is
//! default-constructed and registered under its id, and only then is the
//! payload read into it, so payloads may refer back to their own pointer.
//! Sized shared pointees are built with `Rc::new_cyclic`/`Arc::new_cyclic`:
//! their payload may hold weak pointers to themselves. Interior-mutable
//! pointees are published before filling and may be reached strongly.

use crate::codec::{AsObject, Codec, Object};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::resolver::type_registry::TypeRegistry;
use crate::types::{Handle, NAME_STACK_LIMIT};
use std::any::{type_name, Any, TypeId};
use std::rc::Rc;
use std::sync::Arc;

/// Anything a pointer codec can point at.
///
/// Implemented for every sized `Codec + Default` type, for `dyn Object`,
/// for `RefCell`, `Mutex` and `RwLock` around codec types, and for user
/// trait objects through [`polymorphic!`](crate::polymorphic).
pub trait Pointee: 'static {
    /// Whether the pointee can be filled after it is shared. Such pointees
    /// are published to the handle table before their payload is read, which
    /// is what lets shared cycles decode.
    const SHARED_FILL: bool = false;

    /// Type name written ahead of the payload.
    fn pointee_name<'r>(&self, registry: &'r TypeRegistry) -> &'r str;

    fn write_payload(&self, s: &mut Serializer<'_>) -> Result<(), Error>;

    /// Default instance of the type encoded as `name`.
    fn instantiate(name: &str, d: &mut Deserializer<'_>) -> Result<Box<Self>, Error>;

    fn read_payload(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error>;

    /// Fill a pointee that is already shared. Only called when
    /// [`Pointee::SHARED_FILL`] is true.
    fn read_payload_shared(&self, _d: &mut Deserializer<'_>) -> Result<(), Error> {
        Err(Error::not_allowed(format!(
            "{} cannot be filled through a shared pointer",
            type_name::<Self>()
        )))
    }

    /// Fill a first occurrence read into an `Rc` and record it as the owner
    /// of `handle`. Not called when [`Pointee::SHARED_FILL`] is true.
    fn build_rc(
        mut boxed: Box<Self>,
        handle: Handle,
        d: &mut Deserializer<'_>,
    ) -> Result<Rc<Self>, Error> {
        fill(&mut *boxed, d)?;
        let rc: Rc<Self> = Rc::from(boxed);
        publish_rc(&rc, handle, d)?;
        Ok(rc)
    }

    fn build_arc(
        mut boxed: Box<Self>,
        handle: Handle,
        d: &mut Deserializer<'_>,
    ) -> Result<Arc<Self>, Error> {
        fill(&mut *boxed, d)?;
        let arc: Arc<Self> = Arc::from(boxed);
        publish_arc(&arc, handle, d)?;
        Ok(arc)
    }

    /// `dyn Object` view recorded next to a decoded owner.
    fn rc_view(_rc: &Rc<Self>) -> Option<Rc<dyn Object>> {
        None
    }

    fn arc_view(_arc: &Arc<Self>) -> Option<Arc<dyn Object>> {
        None
    }
}

/// Registered name of `T`, or its Rust type name.
#[inline(always)]
pub fn sized_name<T: 'static>(registry: &TypeRegistry) -> &str {
    registry
        .name_of(TypeId::of::<T>())
        .unwrap_or_else(|| type_name::<T>())
}

/// Registered name of the concrete type behind a trait object.
#[inline(always)]
pub fn object_name<'r>(obj: &dyn Object, registry: &'r TypeRegistry) -> &'r str {
    match registry.name_of(obj.as_any().type_id()) {
        Some(name) => name,
        None => obj.type_name(),
    }
}

/// Check that `name` is what a statically known `T` is written as.
#[inline(always)]
pub fn expect_sized_name<T: 'static>(name: &str, registry: &TypeRegistry) -> Result<(), Error> {
    let expected = sized_name::<T>(registry);
    if expected != name {
        return Err(Error::type_mismatch(expected.to_string(), name.to_string()));
    }
    Ok(())
}

impl<T: Codec + Default> Pointee for T {
    #[inline(always)]
    fn pointee_name<'r>(&self, registry: &'r TypeRegistry) -> &'r str {
        sized_name::<T>(registry)
    }

    #[inline(always)]
    fn write_payload(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        self.write(s)
    }

    fn instantiate(name: &str, d: &mut Deserializer<'_>) -> Result<Box<Self>, Error> {
        expect_sized_name::<T>(name, d.registry())?;
        Ok(Box::default())
    }

    #[inline(always)]
    fn read_payload(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        self.read_in_place(d)
    }

    fn build_rc(
        boxed: Box<Self>,
        handle: Handle,
        d: &mut Deserializer<'_>,
    ) -> Result<Rc<Self>, Error> {
        let mut filled = Ok(());
        let rc = Rc::new_cyclic(|weak| {
            let mut value = *boxed;
            filled = fill_pending(&mut value, weak.clone(), handle, d);
            value
        });
        filled?;
        publish_rc(&rc, handle, d)?;
        Ok(rc)
    }

    fn build_arc(
        boxed: Box<Self>,
        handle: Handle,
        d: &mut Deserializer<'_>,
    ) -> Result<Arc<Self>, Error> {
        let mut filled = Ok(());
        let arc = Arc::new_cyclic(|weak| {
            let mut value = *boxed;
            filled = fill_pending(&mut value, weak.clone(), handle, d);
            value
        });
        filled?;
        publish_arc(&arc, handle, d)?;
        Ok(arc)
    }

    #[inline(always)]
    fn rc_view(rc: &Rc<Self>) -> Option<Rc<dyn Object>> {
        T::rc_object(rc)
    }

    #[inline(always)]
    fn arc_view(arc: &Arc<Self>) -> Option<Arc<dyn Object>> {
        T::arc_object(arc)
    }
}

impl Pointee for dyn Object {
    fn pointee_name<'r>(&self, registry: &'r TypeRegistry) -> &'r str {
        object_name(self, registry)
    }

    fn write_payload(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        self.serialize(s)
    }

    fn instantiate(name: &str, d: &mut Deserializer<'_>) -> Result<Box<Self>, Error> {
        d.registry().create(name)
    }

    fn read_payload(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        self.deserialize(d)
    }

    fn rc_view(rc: &Rc<Self>) -> Option<Rc<dyn Object>> {
        Some(rc.clone())
    }

    fn arc_view(arc: &Arc<Self>) -> Option<Arc<dyn Object>> {
        Some(arc.clone())
    }
}

/// Make a trait whose supertrait is [`Object`] usable behind pointers.
///
/// Concrete implementations must be registered for the trait, usually with
/// [`register_impls!`](crate::register_impls), before they can be read back.
///
/// ```rust,ignore
/// trait Shape: Object {
///     fn area(&self) -> f64;
/// }
///
/// polymorphic!(Shape);
/// ```
#[macro_export]
macro_rules! polymorphic {
    ($($trait_name:ident),+ $(,)?) => {
        $(
            impl $crate::codec::Pointee for dyn $trait_name {
                fn pointee_name<'r>(
                    &self,
                    registry: &'r $crate::resolver::type_registry::TypeRegistry,
                ) -> &'r str {
                    $crate::codec::pointer::object_name(
                        $crate::codec::AsObject::as_object(self),
                        registry,
                    )
                }

                fn write_payload(
                    &self,
                    s: &mut $crate::resolver::context::Serializer<'_>,
                ) -> Result<(), $crate::error::Error> {
                    $crate::codec::Object::serialize(self, s)
                }

                fn instantiate(
                    name: &str,
                    d: &mut $crate::resolver::context::Deserializer<'_>,
                ) -> Result<Box<Self>, $crate::error::Error> {
                    d.registry().create_as::<dyn $trait_name>(name)
                }

                fn read_payload(
                    &mut self,
                    d: &mut $crate::resolver::context::Deserializer<'_>,
                ) -> Result<(), $crate::error::Error> {
                    $crate::codec::Object::deserialize(self, d)
                }

                fn rc_view(
                    rc: &::std::rc::Rc<Self>,
                ) -> Option<::std::rc::Rc<dyn $crate::codec::Object>> {
                    Some($crate::codec::AsObject::into_object_rc(rc.clone()))
                }

                fn arc_view(
                    arc: &::std::sync::Arc<Self>,
                ) -> Option<::std::sync::Arc<dyn $crate::codec::Object>> {
                    Some($crate::codec::AsObject::into_object_arc(arc.clone()))
                }
            }
        )+
    };
}

/// Write `handle`, and for a first occurrence the name and payload of `pointee`.
pub fn write_pointer<P: Pointee + ?Sized>(
    handle: Handle,
    pointee: &P,
    s: &mut Serializer<'_>,
) -> Result<(), Error> {
    s.write_handle(handle)?;
    if let Handle::Flesh(_) = handle {
        let name = pointee.pointee_name(s.registry());
        s.write_len(name.len())?;
        s.write(name.as_bytes())?;
        s.enter()?;
        pointee.write_payload(s)?;
        s.leave();
    }
    Ok(())
}

/// Read the type name that follows a `Flesh` handle and instantiate it.
///
/// Names up to [`NAME_STACK_LIMIT`] bytes are decoded from a stack buffer.
pub fn read_pointee<P: Pointee + ?Sized>(d: &mut Deserializer<'_>) -> Result<Box<P>, Error> {
    let len = d.read_len()?;
    if len <= NAME_STACK_LIMIT {
        let mut buf = [0u8; NAME_STACK_LIMIT];
        d.read(&mut buf[..len])?;
        let name = decode_name(&buf[..len])?;
        P::instantiate(name, d)
    } else {
        d.ensure_remaining(len)?;
        let mut buf = vec![0u8; len];
        d.read(&mut buf)?;
        let name = decode_name(&buf)?;
        P::instantiate(name, d)
    }
}

#[inline(always)]
fn decode_name(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes)
        .map_err(|e| Error::invalid_data(format!("type name is not utf-8: {}", e)))
}

/// Fill a freshly instantiated pointee inside one level of nesting.
#[inline(always)]
pub(crate) fn fill<P: Pointee + ?Sized>(
    pointee: &mut P,
    d: &mut Deserializer<'_>,
) -> Result<(), Error> {
    d.enter()?;
    pointee.read_payload(d)?;
    d.leave();
    Ok(())
}

#[inline(always)]
pub(crate) fn fill_shared<P: Pointee + ?Sized>(
    pointee: &P,
    d: &mut Deserializer<'_>,
) -> Result<(), Error> {
    d.enter()?;
    pointee.read_payload_shared(d)?;
    d.leave();
    Ok(())
}

/// Fill a sized pointee whose weak handle is already known.
fn fill_pending<T: Pointee, W: Any>(
    value: &mut T,
    weak: W,
    handle: Handle,
    d: &mut Deserializer<'_>,
) -> Result<(), Error> {
    d.shared_record(handle)?.set_pending(weak)?;
    fill(value, d)
}

/// Record a decoded `Rc` and its `dyn Object` view as the owner of `handle`.
pub(crate) fn publish_rc<P: Pointee + ?Sized>(
    rc: &Rc<P>,
    handle: Handle,
    d: &mut Deserializer<'_>,
) -> Result<(), Error> {
    let record = d.shared_record(handle)?;
    record.set_owner(rc.clone())?;
    if let Some(view) = P::rc_view(rc) {
        record.set_object_view(view);
    }
    Ok(())
}

pub(crate) fn publish_arc<P: Pointee + ?Sized>(
    arc: &Arc<P>,
    handle: Handle,
    d: &mut Deserializer<'_>,
) -> Result<(), Error> {
    let record = d.shared_record(handle)?;
    record.set_owner(arc.clone())?;
    if let Some(view) = P::arc_view(arc) {
        record.set_object_view(view);
    }
    Ok(())
}
