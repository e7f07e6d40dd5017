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

use std::fmt;

/// Encoding strategy selected for a codec type at compile time.
///
/// Every type has exactly one [`Codec`](crate::codec::Codec) impl, so exactly
/// one category applies to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Plain bytes in native layout, copied as one block in arrays.
    Pod,
    /// Composite value that writes its parts through nested codecs.
    Object,
    /// Owning, shared or weak pointer encoded behind a [`Handle`].
    Pointer,
}

/// Wire tag preceding every pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum HandleTag {
    Null = 0,
    Flesh = 1,
    Reference = 2,
}

impl TryFrom<u8> for HandleTag {
    type Error = u8;

    #[inline(always)]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HandleTag::Null),
            1 => Ok(HandleTag::Flesh),
            2 => Ok(HandleTag::Reference),
            other => Err(other),
        }
    }
}

/// Token written in place of every pointer.
///
/// `Flesh` marks the authoritative first occurrence and is followed by the
/// pointee's type name and payload. `Reference` points back to an earlier
/// `Flesh` with the same id and carries nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    Null,
    Flesh(u32),
    Reference(u32),
}

impl Handle {
    #[inline(always)]
    pub fn id(&self) -> Option<u32> {
        match self {
            Handle::Null => None,
            Handle::Flesh(id) | Handle::Reference(id) => Some(*id),
        }
    }

    #[inline(always)]
    pub fn tag(&self) -> HandleTag {
        match self {
            Handle::Null => HandleTag::Null,
            Handle::Flesh(_) => HandleTag::Flesh,
            Handle::Reference(_) => HandleTag::Reference,
        }
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Handle::Null)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Null => write!(f, "Null"),
            Handle::Flesh(id) => write!(f, "Flesh({id})"),
            Handle::Reference(id) => write!(f, "Reference({id})"),
        }
    }
}

/// How a reconstructed pointer owns its pointee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Unique,
    Shared,
}

/// Type names up to this many bytes are decoded without a heap allocation.
pub const NAME_STACK_LIMIT: usize = 1024;

/// Upper bound on up-front allocation driven by a length read from the wire.
pub(crate) const MAX_PREALLOC: usize = 4096;
