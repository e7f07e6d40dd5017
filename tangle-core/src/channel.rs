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

//! Byte channels sessions read from and write to.
//!
//! The engine only needs sequential access: a sink that appends bytes and a
//! source that fills buffers in order. In-memory channels live in
//! [`crate::buffer`]; this module adds adapters over `std::io`.

use crate::error::Error;
use std::io::{ErrorKind, Read, Write};

/// Sequential byte destination.
pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// Sequential byte origin.
pub trait ByteSource {
    /// Fill `buf` completely or fail with [`Error::TruncatedInput`].
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Error>;

    /// Bytes left, when the source knows. Used to reject impossible lengths
    /// before allocating for them.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

impl ByteSink for Vec<u8> {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).write_bytes(bytes)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_bytes(buf)
    }

    #[inline(always)]
    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }
}

/// [`ByteSink`] over any [`std::io::Write`].
///
/// ```rust
/// use tangle_core::channel::{ByteSink, IoSink};
///
/// let mut sink = IoSink::new(Vec::new());
/// sink.write_bytes(&[1, 2, 3]).unwrap();
/// assert_eq!(sink.into_inner(), vec![1, 2, 3]);
/// ```
pub struct IoSink<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }
}

/// [`ByteSource`] over any [`std::io::Read`].
///
/// End of stream in the middle of a value surfaces as
/// [`Error::TruncatedInput`], with `available` counting the bytes that did
/// arrive.
pub struct IoSource<R: Read> {
    inner: R,
    consumed: usize,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => return Err(Error::truncated_input(buf.len(), filled)),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.consumed += filled;
        Ok(())
    }
}
