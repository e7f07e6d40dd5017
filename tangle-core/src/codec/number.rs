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

use crate::codec::{object_via_codec, Codec};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::types::Category;
use bytemuck::Pod;

/// Read `count` plain values as one contiguous block.
pub fn read_pod_block<T: Pod>(count: usize, d: &mut Deserializer<'_>) -> Result<Vec<T>, Error> {
    let size = count
        .checked_mul(std::mem::size_of::<T>())
        .ok_or_else(|| Error::invalid_data(format!("array of {} elements overflows", count)))?;
    d.ensure_remaining(size)?;
    let mut items = vec![T::zeroed(); count];
    d.read(bytemuck::cast_slice_mut(&mut items))?;
    Ok(items)
}

/// Implement [`Codec`] with the plain-old-data strategy.
///
/// The types must implement [`bytemuck::Pod`]: they are written as their
/// native in-memory bytes, and arrays of them as one block. Do not use it on
/// types that derive `Object`; those are composite.
///
/// ```rust
/// use tangle_core::{pod, Tangle};
/// use tangle_core::bytemuck::{Pod, Zeroable};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Default)]
/// #[repr(C)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// unsafe impl Zeroable for Point {}
/// unsafe impl Pod for Point {}
///
/// pod!(Point);
///
/// let tangle = Tangle::default();
/// let bytes = tangle.serialize(&Point { x: 1.0, y: 2.0 }).unwrap();
/// assert_eq!(bytes.len(), 8);
/// let back: Point = tangle.deserialize(&bytes).unwrap();
/// assert_eq!(back, Point { x: 1.0, y: 2.0 });
/// ```
#[macro_export]
macro_rules! pod {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::Codec for $ty {
                const CATEGORY: $crate::types::Category = $crate::types::Category::Pod;

                #[inline(always)]
                fn write(
                    &self,
                    s: &mut $crate::resolver::context::Serializer<'_>,
                ) -> Result<(), $crate::error::Error> {
                    s.write($crate::bytemuck::bytes_of(self))
                }

                #[inline(always)]
                fn read(
                    d: &mut $crate::resolver::context::Deserializer<'_>,
                ) -> Result<Self, $crate::error::Error> {
                    let mut value = <$ty as $crate::bytemuck::Zeroable>::zeroed();
                    d.read($crate::bytemuck::bytes_of_mut(&mut value))?;
                    Ok(value)
                }

                #[inline(always)]
                fn write_array(
                    items: &[Self],
                    s: &mut $crate::resolver::context::Serializer<'_>,
                ) -> Result<(), $crate::error::Error> {
                    s.write($crate::bytemuck::cast_slice(items))
                }

                #[inline(always)]
                fn read_array(
                    count: usize,
                    d: &mut $crate::resolver::context::Deserializer<'_>,
                ) -> Result<Vec<Self>, $crate::error::Error> {
                    $crate::codec::number::read_pod_block::<$ty>(count, d)
                }

                $crate::shared_object_views!();
            }

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

pod!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Codec for bool {
    const CATEGORY: Category = Category::Pod;

    #[inline(always)]
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        s.write_u8(*self as u8)
    }

    #[inline(always)]
    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        match d.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::invalid_data(format!("invalid bool byte {}", other))),
        }
    }

    fn write_array(items: &[Self], s: &mut Serializer<'_>) -> Result<(), Error> {
        // bool is one byte of 0 or 1 in memory
        let bytes: Vec<u8> = items.iter().map(|b| *b as u8).collect();
        s.write(&bytes)
    }

    crate::shared_object_views!();
}

impl Codec for char {
    const CATEGORY: Category = Category::Pod;

    #[inline(always)]
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        s.write_u32(*self as u32)
    }

    #[inline(always)]
    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let v = d.read_u32()?;
        char::from_u32(v).ok_or_else(|| Error::invalid_data(format!("invalid char {:#x}", v)))
    }

    crate::shared_object_views!();
}

impl Codec for () {
    #[inline(always)]
    fn write(&self, _s: &mut Serializer<'_>) -> Result<(), Error> {
        Ok(())
    }

    #[inline(always)]
    fn read(_d: &mut Deserializer<'_>) -> Result<Self, Error> {
        Ok(())
    }

    crate::shared_object_views!();
}

object_via_codec!(bool, char, ());
