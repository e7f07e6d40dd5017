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

//! Length-prefixed element runs shared by the sequence, set and map codecs.

use crate::codec::Codec;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};

/// `u32` count followed by each element in iteration order.
pub(crate) fn write_collection<'a, T, I>(items: I, s: &mut Serializer<'_>) -> Result<(), Error>
where
    T: Codec + 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: ExactSizeIterator,
{
    let iter = items.into_iter();
    s.write_len(iter.len())?;
    for item in iter {
        item.write(s)?;
    }
    Ok(())
}

/// Read a count, then that many elements, handing each to `push` in
/// encoded order.
pub(crate) fn read_collection<T, F>(d: &mut Deserializer<'_>, mut push: F) -> Result<(), Error>
where
    T: Codec,
    F: FnMut(T),
{
    let len = d.read_len()?;
    for _ in 0..len {
        push(T::read(d)?);
    }
    Ok(())
}

/// `u32` count followed by key, value pairs in iteration order.
pub(crate) fn write_entries<'a, K, V, I>(entries: I, s: &mut Serializer<'_>) -> Result<(), Error>
where
    K: Codec + 'a,
    V: Codec + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    I::IntoIter: ExactSizeIterator,
{
    let iter = entries.into_iter();
    s.write_len(iter.len())?;
    for (key, value) in iter {
        key.write(s)?;
        value.write(s)?;
    }
    Ok(())
}

pub(crate) fn read_entries<K, V, F>(d: &mut Deserializer<'_>, mut insert: F) -> Result<(), Error>
where
    K: Codec,
    V: Codec,
    F: FnMut(K, V),
{
    let len = d.read_len()?;
    for _ in 0..len {
        let key = K::read(d)?;
        let value = V::read(d)?;
        insert(key, value);
    }
    Ok(())
}
