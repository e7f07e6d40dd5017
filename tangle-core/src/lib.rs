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

//! # Tangle Core
//!
//! This is the core implementation of the tangle object-graph serializer.
//! It turns a graph of values, containers and owning, shared or weak
//! pointers into a compact binary encoding and rebuilds an equivalent graph,
//! preserving pointer identity and the runtime type behind trait objects.
//!
//! ## Architecture
//!
//! - **`tangle`**: Main serialization engine and public API
//! - **`codec`**: Per-type write/read strategies and pointer dispatch
//! - **`resolver`**: Sessions, handle tables and the type registry
//! - **`buffer`**: In-memory Writer/Reader
//! - **`channel`**: Byte sink/source traits and `std::io` adapters
//! - **`config`**: Engine configuration
//! - **`types`**: Handles, categories and wire constants
//! - **`error`**: Error handling and result types
//!
//! ## Key Concepts
//!
//! ### Handles
//!
//! Every pointer is written as a handle. The first occurrence of an
//! allocation is a `Flesh(id)` handle followed by the pointee's type name and
//! payload; every later pointer to it is a `Reference(id)`; an absent pointer
//! is `Null`. Payloads are therefore written once, and cycles terminate.
//!
//! ### Categories
//!
//! Each [`Codec`] declares a [`Category`](types::Category): plain-old-data
//! copied as raw bytes, composite objects written field by field, or
//! pointers written as handles.
//!
//! ### Polymorphism
//!
//! Pointers to trait objects (`Box<dyn Object>`, or user traits made
//! [`polymorphic!`]) carry the concrete type name; the
//! [`TypeRegistry`](resolver::type_registry::TypeRegistry) turns it back into
//! an instance of the right type.
//!
//! ## Wire format
//!
//! Values are written in host-native byte order, with no header. Lengths and
//! handle ids are `u32`.
//!
//! ## Usage
//!
//! ```rust
//! use tangle_core::Tangle;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let tangle = Tangle::default();
//! let cell = Rc::new(RefCell::new(vec![1u8, 2, 3]));
//! let bytes = tangle.serialize(&vec![cell.clone(), cell]).unwrap();
//!
//! let back: Vec<Rc<RefCell<Vec<u8>>>> = tangle.deserialize(&bytes).unwrap();
//! back[0].borrow_mut().push(4);
//! assert_eq!(*back[1].borrow(), vec![1, 2, 3, 4]);
//! ```

pub mod buffer;
pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod resolver;
pub mod tangle;
pub mod types;

pub use bytemuck;

pub use crate::channel::{ByteSink, ByteSource, IoSink, IoSource};
pub use crate::codec::{AsObject, Codec, Object, Pointee};
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::resolver::context::{Deserializer, Serializer};
pub use crate::resolver::type_registry::TypeRegistry;
pub use crate::tangle::Tangle;
pub use crate::types::{Category, Handle};
