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

use crate::channel::{ByteSink, ByteSource};
use crate::error::Error;

/// Growable in-memory sink.
#[derive(Default)]
pub struct Writer {
    bf: Vec<u8>,
}

impl Writer {
    pub fn into_bytes(self) -> Vec<u8> {
        self.bf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bf
    }
}

impl ByteSink for Writer {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.bf.extend_from_slice(bytes);
        Ok(())
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Default)]
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    #[inline(always)]
    pub fn remaining_len(&self) -> usize {
        self.bf.len() - self.cursor
    }
}

impl ByteSource for Reader<'_> {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        if self.remaining_len() < buf.len() {
            return Err(Error::truncated_input(buf.len(), self.remaining_len()));
        }
        let end = self.cursor + buf.len();
        buf.copy_from_slice(&self.bf[self.cursor..end]);
        self.cursor = end;
        Ok(())
    }

    #[inline(always)]
    fn remaining(&self) -> Option<usize> {
        Some(self.remaining_len())
    }
}
