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

//! Per-pass session state.
//!
//! A [`Serializer`] or [`Deserializer`] lives for exactly one top-level
//! call. It owns the handle table for that pass, borrows the byte channel and
//! the type registry, and tracks pointer nesting depth.

use crate::channel::{ByteSink, ByteSource};
use crate::config::Config;
use crate::error::Error;
use crate::resolver::ref_resolver::{HandleReader, HandleWriter, PointerKey, SharedRecord};
use crate::resolver::type_registry::TypeRegistry;
use crate::types::{Handle, HandleTag, PointerKind};
use byteorder::{ByteOrder, NativeEndian};
use std::any::Any;

/// Writing side of a session.
pub struct Serializer<'a> {
    sink: &'a mut dyn ByteSink,
    registry: &'a TypeRegistry,
    handles: HandleWriter,
    max_depth: u32,
    depth: u32,
    written: usize,
}

impl<'a> Serializer<'a> {
    pub fn new(sink: &'a mut dyn ByteSink, registry: &'a TypeRegistry, config: &Config) -> Self {
        Serializer {
            sink,
            registry,
            handles: HandleWriter::new(),
            max_depth: config.max_depth,
            depth: 0,
            written: 0,
        }
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline(always)]
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write_bytes(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.write(&[value])
    }

    #[inline(always)]
    pub fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        let mut buf = [0u8; 4];
        NativeEndian::write_u32(&mut buf, value);
        self.write(&buf)
    }

    /// Write a container length or name length as `u32`.
    #[inline(always)]
    pub fn write_len(&mut self, len: usize) -> Result<(), Error> {
        let len = u32::try_from(len)
            .map_err(|_| Error::invalid_data(format!("length {} does not fit in u32", len)))?;
        self.write_u32(len)
    }

    /// `Null` for `None`; otherwise `Reference` to a known identity or a
    /// fresh `Flesh` id.
    #[inline(always)]
    pub fn get_or_assign_handle(&mut self, key: Option<PointerKey>) -> Handle {
        self.handles.get_or_assign(key)
    }

    /// Fresh `Flesh` id for a pointer that cannot be aliased.
    #[inline(always)]
    pub fn next_unique_handle(&mut self) -> Handle {
        self.handles.next_unique()
    }

    pub fn write_handle(&mut self, handle: Handle) -> Result<(), Error> {
        self.write_u8(handle.tag() as u8)?;
        match handle {
            Handle::Null => Ok(()),
            Handle::Flesh(id) | Handle::Reference(id) => self.write_u32(id),
        }
    }

    /// Enter one level of pointer nesting.
    #[inline(always)]
    pub fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        crate::ensure!(
            self.depth <= self.max_depth,
            Error::depth_exceed(format!(
                "maximum pointer nesting depth {} exceeded while writing",
                self.max_depth
            ))
        );
        Ok(())
    }

    #[inline(always)]
    pub fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(self) -> usize {
        log::debug!(
            "serialized {} bytes with {} handles",
            self.written,
            self.handles.assigned()
        );
        self.written
    }
}

/// Reading side of a session.
pub struct Deserializer<'a> {
    source: &'a mut dyn ByteSource,
    registry: &'a TypeRegistry,
    handles: HandleReader,
    max_depth: u32,
    depth: u32,
    consumed: usize,
}

impl<'a> Deserializer<'a> {
    pub fn new(
        source: &'a mut dyn ByteSource,
        registry: &'a TypeRegistry,
        config: &Config,
    ) -> Self {
        Deserializer {
            source,
            registry,
            handles: HandleReader::new(),
            max_depth: config.max_depth,
            depth: 0,
            consumed: 0,
        }
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline(always)]
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.source.read_bytes(buf)?;
        self.consumed += buf.len();
        Ok(())
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let mut buf = [0u8; 1];
        self.read(&mut buf)?;
        Ok(buf[0])
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        let mut buf = [0u8; 4];
        self.read(&mut buf)?;
        Ok(NativeEndian::read_u32(&buf))
    }

    #[inline(always)]
    pub fn read_len(&mut self) -> Result<usize, Error> {
        Ok(self.read_u32()? as usize)
    }

    /// Fail early when the source knows it holds fewer than `n` bytes.
    #[inline(always)]
    pub fn ensure_remaining(&self, n: usize) -> Result<(), Error> {
        match self.source.remaining() {
            Some(available) if available < n => Err(Error::truncated_input(n, available)),
            _ => Ok(()),
        }
    }

    pub fn remaining(&self) -> Option<usize> {
        self.source.remaining()
    }

    pub fn read_handle(&mut self) -> Result<Handle, Error> {
        let tag = HandleTag::try_from(self.read_u8()?)
            .map_err(|tag| Error::invalid_data(format!("invalid handle tag {}", tag)))?;
        let handle = match tag {
            HandleTag::Null => return Ok(Handle::Null),
            HandleTag::Flesh => Handle::Flesh(self.read_u32()?),
            HandleTag::Reference => Handle::Reference(self.read_u32()?),
        };
        crate::ensure!(
            handle.id() != Some(0),
            Error::invalid_data("handle id 0 is never assigned")
        );
        Ok(handle)
    }

    /// Kind of pointer registered for a previously seen id.
    #[inline(always)]
    pub fn resolve_handle(&self, handle: Handle) -> Result<PointerKind, Error> {
        self.handles.resolve(handle)
    }

    /// Register a `Flesh` id before its pointee payload is read.
    #[inline(always)]
    pub fn register_pointer(&mut self, handle: Handle, kind: PointerKind) -> Result<(), Error> {
        self.handles.register(handle, kind)
    }

    #[inline(always)]
    pub fn shared_record(&mut self, handle: Handle) -> Result<&mut SharedRecord, Error> {
        self.handles.shared_record(handle)
    }

    #[inline(always)]
    pub fn shared_owner<P: Any + Clone>(&mut self, handle: Handle) -> Result<P, Error> {
        self.handles.shared_owner(handle)
    }

    #[inline(always)]
    pub fn shared_weak<S, W>(
        &mut self,
        handle: Handle,
        downgrade: impl FnOnce(&S) -> W,
    ) -> Result<W, Error>
    where
        S: Any + Clone,
        W: Any + Clone,
    {
        self.handles.shared_weak(handle, downgrade)
    }

    #[inline(always)]
    pub fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        crate::ensure!(
            self.depth <= self.max_depth,
            Error::depth_exceed(format!(
                "maximum pointer nesting depth {} exceeded while reading",
                self.max_depth
            ))
        );
        Ok(())
    }

    #[inline(always)]
    pub fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn finish(self) -> usize {
        log::debug!(
            "deserialized {} bytes with {} handles",
            self.consumed,
            self.handles.len()
        );
        self.consumed
    }
}
