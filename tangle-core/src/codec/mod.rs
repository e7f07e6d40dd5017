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

//! Per-type write and read strategies.
//!
//! Every encodable type implements [`Codec`] exactly once, and its
//! [`Codec::CATEGORY`] says which of the three strategies it follows:
//!
//! - [`Category::Pod`]: raw native bytes; arrays are one contiguous block.
//! - [`Category::Object`]: composite values writing their parts in order.
//! - [`Category::Pointer`]: a [`Handle`](crate::types::Handle), followed on
//!   first occurrence by the pointee's type name and payload.
//!
//! [`Object`] is the object-safe face of composite values. It is what
//! `Box<dyn Object>` and user trait objects made [`polymorphic!`] dispatch
//! through.

use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::types::{Category, MAX_PREALLOC};
use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

mod array;
mod box_;
mod collection;
mod datetime;
mod list;
mod map;
mod mutex;
pub mod number;
mod option;
pub mod pointer;
mod rc;
mod arc;
mod refcell;
mod set;
mod string;
mod tuple;
mod weak;

pub use pointer::Pointee;

/// Write and read strategy for one type.
pub trait Codec: Sized + 'static {
    const CATEGORY: Category = Category::Object;

    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error>;

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error>;

    /// Fill an existing value. Pointee payloads are read this way, after the
    /// pointee has been default-constructed and registered.
    #[inline(always)]
    fn read_in_place(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
        *self = Self::read(d)?;
        Ok(())
    }

    /// Write `items` back to back, without a length.
    fn write_array(items: &[Self], s: &mut Serializer<'_>) -> Result<(), Error> {
        for item in items {
            item.write(s)?;
        }
        Ok(())
    }

    /// Read `count` values written by [`Codec::write_array`].
    fn read_array(count: usize, d: &mut Deserializer<'_>) -> Result<Vec<Self>, Error> {
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(Self::read(d)?);
        }
        Ok(items)
    }

    /// Encoding of `Option<Self>`. Pointers write a `Null` handle for `None`;
    /// everything else a presence byte.
    fn write_option(value: Option<&Self>, s: &mut Serializer<'_>) -> Result<(), Error> {
        match value {
            None => s.write_u8(0),
            Some(v) => {
                s.write_u8(1)?;
                v.write(s)
            }
        }
    }

    fn read_option(d: &mut Deserializer<'_>) -> Result<Option<Self>, Error> {
        match d.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(Self::read(d)?)),
            other => Err(Error::invalid_data(format!(
                "invalid option presence byte {}",
                other
            ))),
        }
    }

    /// `dyn Object` view of a shared value, for types that are also
    /// [`Object`]. A decoded owner records it so that `Rc<dyn Object>`
    /// back-references can alias an owner decoded under its concrete type.
    fn rc_object(_rc: &Rc<Self>) -> Option<Rc<dyn Object>> {
        None
    }

    fn arc_object(_arc: &Arc<Self>) -> Option<Arc<dyn Object>> {
        None
    }
}

/// Object-safe composite value.
///
/// Derive it with `#[derive(Object)]`, which also derives [`Codec`].
pub trait Object: AsObject + 'static {
    fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error>;

    fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error>;

    /// Name written for this value when no registered name exists.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Upcasts available on every [`Object`], including trait objects built on it.
pub trait AsObject {
    fn as_object(&self) -> &dyn Object;
    fn as_object_mut(&mut self) -> &mut dyn Object;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_object_rc(self: Rc<Self>) -> Rc<dyn Object>;
    fn into_object_arc(self: Arc<Self>) -> Arc<dyn Object>;
}

impl<T: Object> AsObject for T {
    #[inline(always)]
    fn as_object(&self) -> &dyn Object {
        self
    }

    #[inline(always)]
    fn as_object_mut(&mut self) -> &mut dyn Object {
        self
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline(always)]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline(always)]
    fn into_object_rc(self: Rc<Self>) -> Rc<dyn Object> {
        self
    }

    #[inline(always)]
    fn into_object_arc(self: Arc<Self>) -> Arc<dyn Object> {
        self
    }
}

/// Category the codec of `T` follows.
#[inline(always)]
pub const fn category_of<T: Codec>() -> Category {
    T::CATEGORY
}

#[inline(always)]
pub fn write<T: Codec>(value: &T, s: &mut Serializer<'_>) -> Result<(), Error> {
    value.write(s)
}

#[inline(always)]
pub fn read<T: Codec>(d: &mut Deserializer<'_>) -> Result<T, Error> {
    T::read(d)
}

#[inline(always)]
pub fn read_in_place<T: Codec>(value: &mut T, d: &mut Deserializer<'_>) -> Result<(), Error> {
    value.read_in_place(d)
}

#[inline(always)]
pub fn write_array<T: Codec>(items: &[T], s: &mut Serializer<'_>) -> Result<(), Error> {
    T::write_array(items, s)
}

#[inline(always)]
pub fn read_array<T: Codec>(count: usize, d: &mut Deserializer<'_>) -> Result<Vec<T>, Error> {
    T::read_array(count, d)
}

/// `Object` for value types whose object form is just their codec.
macro_rules! object_via_codec {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::Object for $ty {
                #[inline(always)]
                fn serialize(
                    &self,
                    s: &mut $crate::resolver::context::Serializer<'_>,
                ) -> Result<(), $crate::error::Error> {
                    $crate::codec::Codec::write(self, s)
                }

                #[inline(always)]
                fn deserialize(
                    &mut self,
                    d: &mut $crate::resolver::context::Deserializer<'_>,
                ) -> Result<(), $crate::error::Error> {
                    $crate::codec::Codec::read_in_place(self, d)
                }
            }
        )+
    };
}

pub(crate) use object_via_codec;

/// Overrides of [`Codec::rc_object`] and [`Codec::arc_object`] for a codec
/// type that also implements [`Object`]. Expands inside the `Codec` impl.
#[doc(hidden)]
#[macro_export]
macro_rules! shared_object_views {
    () => {
        #[inline(always)]
        fn rc_object(
            rc: &::std::rc::Rc<Self>,
        ) -> ::std::option::Option<::std::rc::Rc<dyn $crate::codec::Object>> {
            let view: ::std::rc::Rc<dyn $crate::codec::Object> = rc.clone();
            ::std::option::Option::Some(view)
        }

        #[inline(always)]
        fn arc_object(
            arc: &::std::sync::Arc<Self>,
        ) -> ::std::option::Option<::std::sync::Arc<dyn $crate::codec::Object>> {
            let view: ::std::sync::Arc<dyn $crate::codec::Object> = arc.clone();
            ::std::option::Option::Some(view)
        }
    };
}
