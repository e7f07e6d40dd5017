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

//! Non-owning pointers.
//!
//! A live weak pointer is written exactly like a strong pointer to the same
//! allocation, sharing its handle id, so whichever of them comes first
//! carries the payload. A dead one is `Null`. On read the strong owner lives
//! in the session's shared record and the weak pointer is downgraded from
//! it; the allocation survives the session only if some strong pointer in
//! the decoded graph keeps it. A weak back-reference into a value whose
//! payload is still being read gets the weak handle `new_cyclic` handed out.

use crate::codec::arc::read_arc;
use crate::codec::pointer::Pointee;
use crate::codec::rc::read_rc;
use crate::codec::Codec;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::types::{Category, Handle};
use std::rc::{self, Rc};
use std::sync::{self, Arc};

impl<P: Pointee> Codec for rc::Weak<P> {
    const CATEGORY: Category = Category::Pointer;

    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        match self.upgrade() {
            None => s.write_handle(Handle::Null),
            Some(strong) => strong.write(s),
        }
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let handle = d.read_handle()?;
        if let Handle::Reference(_) = handle {
            return d.shared_weak::<Rc<P>, _>(handle, Rc::downgrade);
        }
        Ok(match read_rc::<P>(handle, d)? {
            None => rc::Weak::new(),
            Some(strong) => Rc::downgrade(&strong),
        })
    }
}

impl<P: Pointee> Codec for sync::Weak<P> {
    const CATEGORY: Category = Category::Pointer;

    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        match self.upgrade() {
            None => s.write_handle(Handle::Null),
            Some(strong) => strong.write(s),
        }
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let handle = d.read_handle()?;
        if let Handle::Reference(_) = handle {
            return d.shared_weak::<Arc<P>, _>(handle, Arc::downgrade);
        }
        Ok(match read_arc::<P>(handle, d)? {
            None => sync::Weak::new(),
            Some(strong) => Arc::downgrade(&strong),
        })
    }
}
